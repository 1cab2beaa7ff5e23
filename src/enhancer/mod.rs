//! Page enhancement routines
//!
//! [`PageEnhancer`] runs once per page:
//! 1. Bind smooth scrolling on in-page anchors
//! 2. Load the header and footer fragments, then set up navigation
//! 3. Once loading is done and the settle delay has passed, hide cards and
//!    sections and reveal them as they enter the viewport
//!
//! The particle emitter is a separate utility and never runs on its own.

mod fragments;
mod highlight;
mod navigation;
mod particles;
mod reveal;
mod smooth_scroll;

pub use fragments::{FragmentLoader, FragmentOutcome, FragmentReport, component_path};
pub use highlight::highlight_current_page;
pub use navigation::{NavigationReport, init_navigation};
pub use particles::create_particles;
pub use reveal::{RevealReport, init_scroll_reveal};
pub use smooth_scroll::init_smooth_scroll;

use crate::config::EnhancerConfig;
use crate::network::{NetworkStack, ResourceLoader};
use crate::page::{Event, EventType, Page, ReadyState};
use crate::utils::Result;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Summary of one enhancement run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitReport {
    pub fragments: FragmentReport,
    pub navigation: NavigationReport,
    /// In-page anchors bound for smooth scrolling
    pub anchors: usize,
    pub reveal: RevealReport,
}

/// Log a routine failure and fall back to an empty result
fn or_log<T: Default>(routine: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        log::error!("{} failed: {}", routine, e);
        T::default()
    })
}

/// Runs the enhancement routines against a page
pub struct PageEnhancer<L = NetworkStack> {
    loader: L,
    config: EnhancerConfig,
}

impl PageEnhancer<NetworkStack> {
    /// Enhancer fetching fragments over HTTP or from disk
    pub fn with_network(config: EnhancerConfig) -> Result<Self> {
        let loader = NetworkStack::new(&config.network)?;
        Ok(Self::new(loader, config))
    }
}

impl<L: ResourceLoader> PageEnhancer<L> {
    pub fn new(loader: L, config: EnhancerConfig) -> Self {
        Self { loader, config }
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Run now if the document is past loading, otherwise wait for
    /// [`document_ready`](Self::document_ready).
    pub async fn boot(&self, page: &mut Page) -> Option<InitReport> {
        if page.ready_state() == ReadyState::Loading {
            log::debug!("document still loading, deferring enhancement");
            page.defer_boot();
            return None;
        }
        Some(self.init(page).await)
    }

    /// Signal that the document finished parsing. Runs a deferred boot, once.
    pub async fn document_ready(&self, page: &mut Page) -> Option<InitReport> {
        if page.ready_state() == ReadyState::Loading {
            page.set_ready_state(ReadyState::Interactive);
            let root = page.document().root();
            page.dispatch(Event::new(EventType::DomContentLoaded, root));
        }
        if !page.take_deferred_boot() {
            return None;
        }
        Some(self.init(page).await)
    }

    /// Run every routine in order
    pub async fn init(&self, page: &mut Page) -> InitReport {
        let started = Instant::now();
        let mut report = InitReport {
            anchors: or_log("smooth scroll", init_smooth_scroll(page)),
            ..Default::default()
        };

        let (fragments, navigation) = self.load_components(page).await;
        report.fragments = fragments;
        report.navigation = navigation;

        // Reveal waits for the loader, and for the settle delay on top
        let settle = Duration::from_millis(self.config.reveal.settle_delay_ms);
        tokio::time::sleep_until(started + settle).await;
        report.reveal = or_log("scroll reveal", init_scroll_reveal(page, &self.config.reveal));

        log::info!(
            "enhanced {}: header {:?}, footer {:?}, {} anchors, {} observed",
            page.location().href(),
            report.fragments.header,
            report.fragments.footer,
            report.anchors,
            report.reveal.observed
        );
        report
    }

    /// Load both fragments, then set up navigation whatever the outcome
    pub async fn load_components(&self, page: &mut Page) -> (FragmentReport, NavigationReport) {
        let fragments = FragmentLoader::new(&self.loader, &self.config.fragments)
            .load(page)
            .await;
        let navigation = or_log("navigation", init_navigation(page, &self.config.navigation));
        (fragments, navigation)
    }

    /// Particle emitter with the thread RNG; `None` uses the configured count
    pub fn create_particles(&self, page: &mut Page, container_id: &str, count: Option<usize>) -> usize {
        let count = count.unwrap_or(self.config.particles.count);
        create_particles(page, container_id, count, &mut rand::thread_rng())
    }
}
