//! Page context
//!
//! A [`Page`] bundles everything the enhancer routines touch: the location,
//! the document, the viewport, host-supplied layout, the listener table and
//! the intersection observers. Routines take it explicitly instead of
//! reaching for globals.

mod events;
mod geometry;
mod observer;

pub use events::{
    Binding, DispatchOutcome, Effect, Event, EventDispatcher, EventType, ScrollIntoView,
    StylePatch,
};
pub use geometry::{Rect, RootMargin, Viewport};
pub use observer::{IntersectionEntry, IntersectionObserver, ObserverOptions};

use crate::dom::{Document, HtmlParser, NodeId};
use crate::utils::Result;
use std::collections::HashMap;
use url::Url;

/// Document loading state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// Current page location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Parse an absolute URL
    pub fn parse(url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(url)?))
    }

    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Path component, always starting with `/`
    pub fn pathname(&self) -> &str {
        self.url.path()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Resolve a relative reference against this location
    pub fn resolve(&self, reference: &str) -> Result<Url> {
        Ok(self.url.join(reference)?)
    }
}

/// A loaded page and its runtime state
#[derive(Debug, Clone)]
pub struct Page {
    location: Location,
    document: Document,
    viewport: Viewport,
    ready_state: ReadyState,
    dispatcher: EventDispatcher,
    observers: Vec<IntersectionObserver>,
    layout: HashMap<NodeId, Rect>,
    scroll_log: Vec<ScrollIntoView>,
    deferred_boot: bool,
}

impl Page {
    /// Create an interactive page
    pub fn new(location: Location, document: Document) -> Self {
        Self {
            location,
            document,
            viewport: Viewport::default(),
            ready_state: ReadyState::Interactive,
            dispatcher: EventDispatcher::new(),
            observers: Vec::new(),
            layout: HashMap::new(),
            scroll_log: Vec::new(),
            deferred_boot: false,
        }
    }

    /// Parse `html` as the page at `url`
    pub fn from_html(url: &str, html: &str) -> Result<Self> {
        let location = Location::parse(url)?;
        let document = HtmlParser::new().parse(html)?;
        Ok(Self::new(location, document))
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Resize the viewport. Bindings made at setup are not revisited.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.run_intersection_observers();
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    pub(crate) fn defer_boot(&mut self) {
        self.deferred_boot = true;
    }

    pub(crate) fn take_deferred_boot(&mut self) -> bool {
        std::mem::take(&mut self.deferred_boot)
    }

    /// Register a listener
    pub fn add_binding(&mut self, binding: Binding) {
        log::debug!(
            "bound {:?} on {} ({:?})",
            binding.event_type,
            binding.selector,
            binding.node
        );
        self.dispatcher.add(binding);
    }

    /// The listener table
    pub fn bindings(&self) -> &[Binding] {
        self.dispatcher.bindings()
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Register an observer and deliver its initial entries
    pub fn add_observer(&mut self, observer: IntersectionObserver) -> usize {
        self.observers.push(observer);
        self.run_intersection_observers()
    }

    pub fn observers(&self) -> &[IntersectionObserver] {
        &self.observers
    }

    /// Record the document-space box of a node
    pub fn set_layout(&mut self, node: NodeId, rect: Rect) {
        self.layout.insert(node, rect);
    }

    pub fn layout_of(&self, node: NodeId) -> Option<Rect> {
        self.layout.get(&node).copied()
    }

    /// Scroll to a vertical offset and notify observers
    pub fn scroll_to(&mut self, y: f32) -> usize {
        self.viewport.scroll_y = y.max(0.0);
        self.run_intersection_observers()
    }

    /// Every `scrollIntoView` request issued so far
    pub fn scroll_log(&self) -> &[ScrollIntoView] {
        &self.scroll_log
    }

    /// Deliver pending intersection entries, applying each observer's entry
    /// styles to intersecting targets. Returns the number of targets styled.
    pub fn run_intersection_observers(&mut self) -> usize {
        let mut styled = 0;
        for observer in &mut self.observers {
            for entry in observer.take_entries(&self.layout, &self.viewport) {
                if !entry.is_intersecting {
                    continue;
                }
                if let Some(element) = self.document.element_mut(entry.target) {
                    observer.on_enter().apply(element);
                    styled += 1;
                }
            }
        }
        styled
    }

    /// Click a node
    pub fn click(&mut self, target: NodeId) -> DispatchOutcome {
        self.dispatch(Event::click(target))
    }

    /// Dispatch an event at its target, bubbling through the ancestors
    pub fn dispatch(&mut self, mut event: Event) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        let mut path = vec![event.target];
        if event.bubbles {
            path.extend(self.document.ancestors(event.target));
        }

        for node in path {
            for effect in self.dispatcher.effects_on(node, &event.event_type) {
                self.apply_effect(&effect, &mut event, &mut outcome);
                outcome.listeners_run += 1;
            }
            if event.propagation_stopped {
                break;
            }
        }

        outcome.default_prevented = event.default_prevented;
        outcome
    }

    fn apply_effect(&mut self, effect: &Effect, event: &mut Event, outcome: &mut DispatchOutcome) {
        match effect {
            Effect::ToggleClass { node, class } => {
                if let Some(element) = self.document.element_mut(*node) {
                    element.toggle_class(class);
                }
            }
            Effect::ToggleOnDirectHit {
                node,
                trigger_class,
                class,
            } => {
                let direct_hit = self
                    .document
                    .element(event.target)
                    .is_some_and(|e| e.has_class(trigger_class));
                if direct_hit {
                    event.prevent_default();
                    if let Some(element) = self.document.element_mut(*node) {
                        element.toggle_class(class);
                    }
                }
            }
            Effect::ScrollToHash { href } => {
                if href == "#" {
                    return;
                }
                event.prevent_default();
                // An href that is not a valid selector has no target
                let target = self.document.query_selector(href).ok().flatten();
                if let Some(target) = target {
                    let request = ScrollIntoView { target };
                    self.scroll_into_view(request);
                    outcome.scrolls.push(request);
                }
            }
        }
    }

    fn scroll_into_view(&mut self, request: ScrollIntoView) {
        self.scroll_log.push(request);
        if let Some(rect) = self.layout_of(request.target) {
            self.scroll_to(rect.y);
        }
    }
}
