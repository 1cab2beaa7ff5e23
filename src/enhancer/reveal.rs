//! Scroll reveal animation

use crate::config::RevealConfig;
use crate::page::{IntersectionObserver, ObserverOptions, Page, RootMargin, StylePatch};
use crate::utils::Result;
use serde::Serialize;

const ANIMATED: &str = ".card, .section";

/// What reveal setup did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevealReport {
    /// Elements hidden and observed
    pub observed: usize,
    /// Elements already in view at setup
    pub revealed: usize,
}

/// Hide every card and section and reveal each as it scrolls into view
pub fn init_scroll_reveal(page: &mut Page, config: &RevealConfig) -> Result<RevealReport> {
    let hidden = StylePatch::new()
        .set("opacity", "0")
        .set("transform", format!("translateY({}px)", config.offset))
        .set("transition", config.transition.as_str());
    let shown = StylePatch::new()
        .set("opacity", "1")
        .set("transform", "translateY(0)");

    let mut observer = IntersectionObserver::new(
        ObserverOptions {
            threshold: config.threshold,
            root_margin: RootMargin::bottom(config.root_margin_bottom),
        },
        shown,
    );

    let targets = page.document().query_selector_all(ANIMATED)?;
    for target in &targets {
        if let Some(element) = page.document_mut().element_mut(*target) {
            hidden.apply(element);
        }
        observer.observe(*target);
    }

    let revealed = page.add_observer(observer);
    Ok(RevealReport {
        observed: targets.len(),
        revealed,
    })
}
