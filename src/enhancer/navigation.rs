//! Mobile menu toggle and dropdown accordion

use super::highlight::highlight_current_page;
use crate::config::NavigationConfig;
use crate::page::{Binding, Effect, EventType, Page};
use crate::utils::Result;
use serde::Serialize;

const MOBILE_TOGGLE: &str = ".mobile-menu-toggle";
const NAV_MENU: &str = ".nav-menu";
const NAV_ITEM: &str = ".nav-item";
const DROPDOWN: &str = ".dropdown";
const NAV_LINK_CLASS: &str = "nav-link";

/// What navigation setup attached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationReport {
    /// Whether the mobile toggle was bound
    pub mobile_toggle: bool,
    /// Dropdown items bound as accordions
    pub dropdowns: usize,
    /// Links highlighted as the current page
    pub highlighted: usize,
}

/// Bind the mobile menu toggle and, on narrow viewports, the dropdown
/// accordion; then highlight the current page.
///
/// The viewport width is read once here. Resizing afterwards neither adds
/// nor removes accordion bindings.
pub fn init_navigation(page: &mut Page, config: &NavigationConfig) -> Result<NavigationReport> {
    let mut report = NavigationReport::default();

    let toggle = page.document().query_selector(MOBILE_TOGGLE)?;
    let menu = page.document().query_selector(NAV_MENU)?;
    if let (Some(toggle), Some(menu)) = (toggle, menu) {
        page.add_binding(Binding {
            node: toggle,
            selector: MOBILE_TOGGLE.to_string(),
            event_type: EventType::Click,
            effect: Effect::ToggleClass {
                node: menu,
                class: config.active_class.clone(),
            },
        });
        report.mobile_toggle = true;
    }

    let is_mobile = page.viewport().width <= config.breakpoint;
    for item in page.document().query_selector_all(NAV_ITEM)? {
        let has_dropdown = page.document().query_selector_in(item, DROPDOWN)?.is_some();
        if has_dropdown && is_mobile {
            page.add_binding(Binding {
                node: item,
                selector: NAV_ITEM.to_string(),
                event_type: EventType::Click,
                effect: Effect::ToggleOnDirectHit {
                    node: item,
                    trigger_class: NAV_LINK_CLASS.to_string(),
                    class: config.active_class.clone(),
                },
            });
            report.dropdowns += 1;
        }
    }

    report.highlighted = highlight_current_page(page, &config.accent_color)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAV: &str = r#"
        <button class="mobile-menu-toggle"><span id="bar"></span></button>
        <ul class="nav-menu">
            <li class="nav-item" id="about">
                <a class="nav-link" id="about-link" href="/about/">About</a>
                <ul class="dropdown"><li><a class="dropdown-link" id="team" href="/about/team.html">Team</a></li></ul>
            </li>
            <li class="nav-item" id="plain"><a class="nav-link" href="/contact.html">Contact</a></li>
        </ul>
    "#;

    fn page(width: f32) -> Page {
        let mut page = Page::from_html("https://example.com/", NAV).unwrap();
        page.set_viewport_size(width, 800.0);
        page
    }

    fn has_class(page: &Page, id: &str, class: &str) -> bool {
        let node = page.document().get_element_by_id(id).unwrap();
        page.document().element(node).unwrap().has_class(class)
    }

    #[test]
    fn test_mobile_toggle_flips_once_per_click() {
        let mut page = page(1280.0);
        let report = init_navigation(&mut page, &NavigationConfig::default()).unwrap();
        assert!(report.mobile_toggle);

        let toggle = page.document().query_selector(".mobile-menu-toggle").unwrap().unwrap();
        let menu = page.document().query_selector(".nav-menu").unwrap().unwrap();
        let active = |p: &Page| p.document().element(menu).unwrap().has_class("active");

        page.click(toggle);
        assert!(active(&page));
        page.click(toggle);
        assert!(!active(&page));

        // Clicks on the icon inside the button bubble to it
        let bar = page.document().get_element_by_id("bar").unwrap();
        page.click(bar);
        assert!(active(&page));
    }

    #[test]
    fn test_missing_menu_binds_nothing() {
        let mut page = Page::from_html(
            "https://example.com/",
            r#"<button class="mobile-menu-toggle"></button>"#,
        )
        .unwrap();
        let report = init_navigation(&mut page, &NavigationConfig::default()).unwrap();
        assert!(!report.mobile_toggle);
        assert!(page.bindings().is_empty());
    }

    #[test]
    fn test_dropdown_accordion_on_mobile() {
        let mut page = page(768.0);
        let report = init_navigation(&mut page, &NavigationConfig::default()).unwrap();
        assert_eq!(report.dropdowns, 1);

        let link = page.document().get_element_by_id("about-link").unwrap();
        let outcome = page.click(link);
        assert!(outcome.default_prevented);
        assert!(has_class(&page, "about", "active"));

        // A nested element is not the direct link: default kept, no toggle
        let team = page.document().get_element_by_id("team").unwrap();
        let outcome = page.click(team);
        assert!(!outcome.default_prevented);
        assert!(has_class(&page, "about", "active"));
    }

    #[test]
    fn test_no_accordion_on_desktop() {
        let mut page = page(769.0);
        let report = init_navigation(&mut page, &NavigationConfig::default()).unwrap();
        assert_eq!(report.dropdowns, 0);

        let link = page.document().get_element_by_id("about-link").unwrap();
        assert!(!page.click(link).default_prevented);
        assert!(!has_class(&page, "about", "active"));
    }

    #[test]
    fn test_breakpoint_read_once() {
        let mut page = page(1280.0);
        init_navigation(&mut page, &NavigationConfig::default()).unwrap();
        page.set_viewport_size(375.0, 800.0);

        let link = page.document().get_element_by_id("about-link").unwrap();
        assert!(!page.click(link).default_prevented);
    }
}
