//! Integration tests for Veneer
//!
//! These tests run the enhancer against a small site on disk, loaded through
//! the same network stack the binary uses.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tempfile::TempDir;
use url::Url;
use veneer::enhancer::FragmentOutcome;
use veneer::page::Rect;
use veneer::{EnhancerConfig, Page, PageEnhancer, component_path, create_particles};

const HEADER: &str = r#"
<header class="site-header">
  <nav>
    <button class="mobile-menu-toggle">Menu</button>
    <ul class="nav-menu">
      <li class="nav-item"><a class="nav-link" href="/pages/about.html">About</a></li>
      <li class="nav-item">
        <a class="nav-link" href="/pages/work.html">Work</a>
        <ul class="dropdown">
          <li><a class="dropdown-link" href="/pages/work.html#print">Print</a></li>
        </ul>
      </li>
    </ul>
  </nav>
</header>
"#;

const FOOTER: &str = r#"<footer><p class="copyright">Veneer Studio</p></footer>"#;

const PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>About</title></head>
<body>
  <div id="header"></div>
  <main>
    <a class="skip" href="#team">Team</a>
    <a class="top" href="#">Top</a>
    <section class="section" id="intro"><p>Intro</p></section>
    <section class="section" id="team">
      <div class="card" id="card-1">One</div>
      <div class="card" id="card-2">Two</div>
    </section>
    <div id="hero-particles"></div>
  </main>
  <div id="footer"></div>
</body>
</html>
"##;

/// Write a small site: shared fragments plus one nested page
fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("components")).unwrap();
    std::fs::create_dir_all(root.join("pages")).unwrap();
    std::fs::write(root.join("components/header.html"), HEADER).unwrap();
    std::fs::write(root.join("components/footer.html"), FOOTER).unwrap();
    std::fs::write(root.join("pages/about.html"), PAGE).unwrap();
    dir
}

fn load(path: &Path) -> Page {
    let url = Url::from_file_path(path).unwrap();
    let html = std::fs::read_to_string(path).unwrap();
    Page::from_html(url.as_str(), &html).unwrap()
}

fn enhancer() -> PageEnhancer {
    let mut config = EnhancerConfig::default();
    config.reveal.settle_delay_ms = 0;
    PageEnhancer::with_network(config).unwrap()
}

fn style(page: &Page, id: &str, property: &str) -> Option<String> {
    let node = page.document().get_element_by_id(id).unwrap();
    page.document()
        .element(node)
        .unwrap()
        .style
        .get(property)
        .map(String::from)
}

#[tokio::test]
async fn test_nested_page_end_to_end() {
    let site = site();
    let mut page = load(&site.path().join("pages/about.html"));
    let report = enhancer().init(&mut page).await;

    assert!(matches!(report.fragments.header, FragmentOutcome::Injected { .. }));
    assert!(matches!(report.fragments.footer, FragmentOutcome::Injected { .. }));
    assert!(report.navigation.mobile_toggle);
    assert_eq!(report.navigation.dropdowns, 0);
    // The absolute About href is a substring of the on-disk path
    assert_eq!(report.navigation.highlighted, 1);
    assert_eq!(report.anchors, 2);
    assert_eq!(report.reveal.observed, 4);

    let footer = page.document().get_element_by_id("footer").unwrap();
    assert_eq!(page.document().text_content(footer), "Veneer Studio");
    assert_eq!(style(&page, "intro", "opacity").as_deref(), Some("0"));
}

#[tokio::test]
async fn test_navigation_toggles_after_injection() {
    let site = site();
    let mut page = load(&site.path().join("pages/about.html"));
    enhancer().init(&mut page).await;

    let toggle = page.document().query_selector(".mobile-menu-toggle").unwrap().unwrap();
    let menu = page.document().query_selector(".nav-menu").unwrap().unwrap();
    page.click(toggle);
    assert!(page.document().element(menu).unwrap().has_class("active"));
    page.click(toggle);
    assert!(!page.document().element(menu).unwrap().has_class("active"));
}

#[tokio::test]
async fn test_mobile_dropdown_accordion() {
    let site = site();
    let mut page = load(&site.path().join("pages/about.html"));
    page.set_viewport_size(375.0, 667.0);
    let report = enhancer().init(&mut page).await;
    assert_eq!(report.navigation.dropdowns, 1);

    let link = page
        .document()
        .query_selector(r#".nav-link[href="/pages/work.html"]"#)
        .unwrap()
        .unwrap();
    let item = page.document().parent(link).unwrap();
    let outcome = page.click(link);
    assert!(outcome.default_prevented);
    assert!(page.document().element(item).unwrap().has_class("active"));

    // Clicks inside the dropdown do not toggle the item
    let inner = page.document().query_selector(".dropdown-link").unwrap().unwrap();
    let outcome = page.click(inner);
    assert!(!outcome.default_prevented);
    assert!(page.document().element(item).unwrap().has_class("active"));
}

#[tokio::test]
async fn test_reveal_on_scroll() {
    let site = site();
    let mut page = load(&site.path().join("pages/about.html"));
    let intro = page.document().get_element_by_id("intro").unwrap();
    let team = page.document().get_element_by_id("team").unwrap();
    page.set_layout(intro, Rect::new(0.0, 100.0, 1280.0, 400.0));
    page.set_layout(team, Rect::new(0.0, 2000.0, 1280.0, 600.0));

    let report = enhancer().init(&mut page).await;
    assert_eq!(report.reveal.revealed, 1);
    assert_eq!(style(&page, "intro", "opacity").as_deref(), Some("1"));
    assert_eq!(style(&page, "team", "opacity").as_deref(), Some("0"));

    page.scroll_to(1800.0);
    assert_eq!(style(&page, "team", "opacity").as_deref(), Some("1"));
    assert_eq!(style(&page, "team", "transform").as_deref(), Some("translateY(0)"));
}

#[tokio::test]
async fn test_smooth_scroll_to_section() {
    let site = site();
    let mut page = load(&site.path().join("pages/about.html"));
    let team = page.document().get_element_by_id("team").unwrap();
    page.set_layout(team, Rect::new(0.0, 2000.0, 1280.0, 600.0));
    enhancer().init(&mut page).await;

    let skip = page.document().query_selector(".skip").unwrap().unwrap();
    let outcome = page.click(skip);
    assert!(outcome.default_prevented);
    assert_eq!(outcome.scrolls.len(), 1);
    assert_eq!(outcome.scrolls[0].target, team);
    assert_eq!(page.viewport().scroll_y, 2000.0);

    let top = page.document().query_selector(".top").unwrap().unwrap();
    let outcome = page.click(top);
    assert!(!outcome.default_prevented);
    assert!(outcome.scrolls.is_empty());
}

#[tokio::test]
async fn test_missing_fragments_leave_page_usable() {
    let site = site();
    std::fs::remove_file(site.path().join("components/header.html")).unwrap();
    let mut page = load(&site.path().join("pages/about.html"));
    let report = enhancer().init(&mut page).await;

    assert_eq!(report.fragments.header, FragmentOutcome::Skipped { status: 404 });
    assert!(matches!(report.fragments.footer, FragmentOutcome::Injected { .. }));
    assert!(!report.navigation.mobile_toggle);
    assert_eq!(report.anchors, 2);
}

#[test]
fn test_enhanced_markup_serializes() {
    let site = site();
    let mut page = load(&site.path().join("pages/about.html"));
    let report = tokio_test::block_on(enhancer().init(&mut page));
    assert!(matches!(report.fragments.header, FragmentOutcome::Injected { .. }));

    let html = page.document().to_html();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<button class="mobile-menu-toggle">Menu</button>"#));
    assert!(html.contains("opacity: 0;"));
}

#[test]
fn test_report_serializes_to_json() {
    let site = site();
    let mut page = load(&site.path().join("pages/about.html"));
    let report = tokio_test::block_on(enhancer().init(&mut page));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["fragments"]["header"]["outcome"], "injected");
    assert_eq!(json["anchors"], 2);
}

proptest! {
    #[test]
    fn test_component_path_is_one_of_two_prefixes(path in "(/[a-z.]{0,8}){0,4}") {
        let prefix = component_path(&path, "components");
        let depth = path
            .split('/')
            .filter(|s| !s.is_empty() && *s != "index.html")
            .count();
        if depth == 0 {
            prop_assert_eq!(prefix, "./components/");
        } else {
            prop_assert_eq!(prefix, "../components/");
        }
    }

    #[test]
    fn test_particle_styles_stay_in_range(seed in any::<u64>(), count in 0usize..12) {
        let mut page = Page::from_html("https://example.com/", r#"<div id="fx"></div>"#).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert_eq!(create_particles(&mut page, "fx", count, &mut rng), count);

        let fx = page.document().get_element_by_id("fx").unwrap();
        let particles = page.document().children(fx);
        prop_assert_eq!(particles.len(), count);
        for &particle in particles {
            let element = page.document().element(particle).unwrap();
            prop_assert!(element.has_class("particle"));
            let number = |property: &str, unit: &str| -> f64 {
                element
                    .style
                    .get(property)
                    .and_then(|v| v.strip_suffix(unit))
                    .and_then(|v| v.parse().ok())
                    .unwrap()
            };
            let size = number("width", "px");
            prop_assert!((2.0..6.0).contains(&size));
            prop_assert_eq!(number("height", "px"), size);
            prop_assert!((0.0..100.0).contains(&number("left", "%")));
            prop_assert!((0.0..10.0).contains(&number("animation-delay", "s")));
            prop_assert!((10.0..20.0).contains(&number("animation-duration", "s")));
            prop_assert_eq!(element.style.get("bottom"), Some("0"));
        }
    }

    #[test]
    fn test_missing_container_creates_nothing(count in 0usize..50) {
        let mut page = Page::from_html("https://example.com/", "<p></p>").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        prop_assert_eq!(create_particles(&mut page, "fx", count, &mut rng), 0);
    }
}
