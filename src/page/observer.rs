//! Viewport intersection observation

use super::events::StylePatch;
use super::geometry::{Rect, RootMargin, Viewport};
use crate::dom::NodeId;
use std::collections::HashMap;

/// Observer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction that counts as crossing
    pub threshold: f32,
    pub root_margin: RootMargin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::default(),
        }
    }
}

/// One observation delivered to the observer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    /// Visible fraction of the target, in [0, 1]
    pub ratio: f32,
    pub is_intersecting: bool,
}

/// Watches targets against the viewport and styles them on entry
///
/// Every target gets one entry the first time it has layout; after that an
/// entry is delivered only when the target crosses the threshold. Targets
/// stay observed after they are revealed.
#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Vec<NodeId>,
    above_threshold: HashMap<NodeId, bool>,
    on_enter: StylePatch,
}

impl IntersectionObserver {
    /// Create an observer applying `on_enter` to intersecting targets
    pub fn new(options: ObserverOptions, on_enter: StylePatch) -> Self {
        Self {
            options,
            targets: Vec::new(),
            above_threshold: HashMap::new(),
            on_enter,
        }
    }

    /// Start watching a target
    pub fn observe(&mut self, target: NodeId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Styles applied when an entry reports an intersection
    pub fn on_enter(&self) -> &StylePatch {
        &self.on_enter
    }

    /// Compute entries for the current layout and scroll position
    pub fn take_entries(
        &mut self,
        layout: &HashMap<NodeId, Rect>,
        viewport: &Viewport,
    ) -> Vec<IntersectionEntry> {
        let root = self.options.root_margin.apply(viewport.rect());
        let mut entries = Vec::new();

        for target in &self.targets {
            let Some(rect) = layout.get(target) else {
                continue;
            };
            let overlap = rect.intersection(&root);
            let is_intersecting = overlap.is_some();
            let ratio = match overlap {
                Some(o) if rect.area() > 0.0 => (o.area() / rect.area()).min(1.0),
                Some(_) => 1.0,
                None => 0.0,
            };
            let above = is_intersecting && ratio >= self.options.threshold;

            if self.above_threshold.insert(*target, above) != Some(above) {
                entries.push(IntersectionEntry {
                    target: *target,
                    ratio,
                    is_intersecting,
                });
            }
        }

        entries
    }
}
