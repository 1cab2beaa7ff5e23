//! Smooth scrolling for in-page anchors

use crate::page::{Binding, Effect, EventType, Page};
use crate::utils::Result;

const IN_PAGE_ANCHORS: &str = r##"a[href^="#"]"##;

/// Bind every `a[href^="#"]` in the document. Returns the number bound.
pub fn init_smooth_scroll(page: &mut Page) -> Result<usize> {
    let anchors = page.document().query_selector_all(IN_PAGE_ANCHORS)?;
    for anchor in &anchors {
        let href = page
            .document()
            .element(*anchor)
            .and_then(|e| e.get_attribute("href"))
            .unwrap_or_default()
            .to_string();
        page.add_binding(Binding {
            node: *anchor,
            selector: IN_PAGE_ANCHORS.to_string(),
            event_type: EventType::Click,
            effect: Effect::ScrollToHash { href },
        });
    }
    Ok(anchors.len())
}
