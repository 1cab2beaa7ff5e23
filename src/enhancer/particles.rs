//! Decorative floating particles

use crate::page::Page;
use rand::Rng;

/// Append `count` randomized `div.particle` nodes to the element with id
/// `container_id`. Returns how many were appended; a missing container
/// appends nothing.
pub fn create_particles<R: Rng>(
    page: &mut Page,
    container_id: &str,
    count: usize,
    rng: &mut R,
) -> usize {
    let document = page.document_mut();
    let Some(container) = document.get_element_by_id(container_id) else {
        log::debug!("no #{} container for particles", container_id);
        return 0;
    };

    for _ in 0..count {
        let size: f64 = rng.gen_range(2.0..6.0);
        let left: f64 = rng.gen_range(0.0..100.0);
        let delay: f64 = rng.gen_range(0.0..10.0);
        let duration: f64 = rng.gen_range(10.0..20.0);

        let particle = document.create_element("div");
        if let Some(element) = document.element_mut(particle) {
            element.set_attribute("class", "particle");
            element.style.set("width", format!("{}px", size));
            element.style.set("height", format!("{}px", size));
            element.style.set("left", format!("{}%", left));
            element.style.set("bottom", "0");
            element.style.set("animation-delay", format!("{}s", delay));
            element.style.set("animation-duration", format!("{}s", duration));
        }
        document.append_child(container, particle);
    }

    count
}
