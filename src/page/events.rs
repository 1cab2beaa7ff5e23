//! Event bindings for enhanced pages
//!
//! Listeners are plain data: each [`Binding`] names the node it is attached
//! to, the selector that found it, the event type and the [`Effect`] to run.
//! The page walks the table during dispatch, so tests can inspect and drive
//! it without simulating real input.

use crate::dom::{ElementData, NodeId};

/// Event types the enhancer listens for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    /// Document finished parsing
    DomContentLoaded,
    /// Custom event
    Custom(String),
}

/// A DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    /// Node the event was dispatched at
    pub target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl Event {
    /// Create a new event
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            bubbles: true,
            cancelable: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create a click event
    pub fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, target)
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop event propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// A smooth `scrollIntoView` request aligning the target's top edge with
/// the top of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollIntoView {
    pub target: NodeId,
}

/// Inline style declarations applied together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch(Vec<(String, String)>);

impl StylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration
    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((property.into(), value.into()));
        self
    }

    /// Write every declaration into an element's inline style
    pub fn apply(&self, element: &mut ElementData) {
        for (property, value) in &self.0 {
            element.style.set(property.as_str(), value.as_str());
        }
    }
}

/// What a binding does when its event reaches the bound node
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Toggle `class` on `node`
    ToggleClass { node: NodeId, class: String },
    /// Only when the event target itself carries `trigger_class`: prevent
    /// default and toggle `class` on `node`
    ToggleOnDirectHit {
        node: NodeId,
        trigger_class: String,
        class: String,
    },
    /// Anchor navigation. `#` alone is left to the default action; anything
    /// else prevents default and smoothly scrolls to the matching element.
    ScrollToHash { href: String },
}

/// A listener registration
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Node the listener is attached to
    pub node: NodeId,
    /// Selector that located the node
    pub selector: String,
    pub event_type: EventType,
    pub effect: Effect,
}

/// Declarative listener table
#[derive(Debug, Clone, Default)]
pub struct EventDispatcher {
    bindings: Vec<Binding>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding
    pub fn add(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// All bindings in registration order
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Effects attached to `node` for `event_type`, in registration order
    pub fn effects_on(&self, node: NodeId, event_type: &EventType) -> Vec<Effect> {
        self.bindings
            .iter()
            .filter(|b| b.node == node && &b.event_type == event_type)
            .map(|b| b.effect.clone())
            .collect()
    }

    /// Get listener count for an event type
    pub fn listener_count(&self, event_type: &EventType) -> usize {
        self.bindings
            .iter()
            .filter(|b| &b.event_type == event_type)
            .count()
    }
}

/// Result of dispatching one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    /// Scroll requests issued by the listeners
    pub scrolls: Vec<ScrollIntoView>,
    /// Number of listeners that ran
    pub listeners_run: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_prevent_default_respects_cancelable() {
        let doc = Document::new();
        let mut event = Event::click(doc.root());
        event.prevent_default();
        assert!(event.default_prevented);

        let mut fixed = Event::click(doc.root());
        fixed.cancelable = false;
        fixed.prevent_default();
        assert!(!fixed.default_prevented);
    }

    #[test]
    fn test_effects_filtered_by_node_and_type() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        let b = doc.create_element("button");
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add(Binding {
            node: a,
            selector: "a".to_string(),
            event_type: EventType::Click,
            effect: Effect::ScrollToHash { href: "#top".to_string() },
        });
        dispatcher.add(Binding {
            node: b,
            selector: "button".to_string(),
            event_type: EventType::Custom("hover".to_string()),
            effect: Effect::ToggleClass { node: b, class: "on".to_string() },
        });

        assert_eq!(dispatcher.effects_on(a, &EventType::Click).len(), 1);
        assert!(dispatcher.effects_on(b, &EventType::Click).is_empty());
        assert_eq!(dispatcher.listener_count(&EventType::Click), 1);
    }

    #[test]
    fn test_style_patch_overwrites() {
        let mut el = ElementData::new("div");
        el.set_attribute("style", "opacity: 0");
        StylePatch::new()
            .set("opacity", "1")
            .set("transform", "translateY(0)")
            .apply(&mut el);
        assert_eq!(el.style.get("opacity"), Some("1"));
        assert_eq!(el.style.get("transform"), Some("translateY(0)"));
    }
}
