//! Current-page link highlighting

use crate::page::Page;
use crate::utils::Result;

const NAV_LINKS: &str = ".nav-link, .dropdown-link";

/// Strip one leading `./` or `../` from an href
fn strip_relative_prefix(href: &str) -> &str {
    href.strip_prefix("./")
        .or_else(|| href.strip_prefix("../"))
        .unwrap_or(href)
}

/// Color every navigation link whose href occurs in the current path.
///
/// Matching is plain substring containment, so a short href can match
/// unrelated paths, and an href that strips to nothing (`./`) matches every
/// page. Returns the number of links colored.
pub fn highlight_current_page(page: &mut Page, accent_color: &str) -> Result<usize> {
    let path = page.location().pathname().to_string();
    let mut highlighted = 0;

    for link in page.document().query_selector_all(NAV_LINKS)? {
        let Some(element) = page.document_mut().element_mut(link) else {
            continue;
        };
        let matches = element
            .get_attribute("href")
            .filter(|href| !href.is_empty())
            .is_some_and(|href| path.contains(strip_relative_prefix(href)));
        if matches {
            element.style.set("color", accent_color);
            highlighted += 1;
        }
    }

    Ok(highlighted)
}
