//! # Veneer - Static Site Page Enhancer
//!
//! Progressive enhancement for statically served multi-page sites, run
//! against an in-memory page model.
//!
//! ## Architecture
//!
//! The crate is organized into the following modules:
//!
//! - **dom**: HTML parsing, selector queries and serialization
//! - **page**: Page context with events, viewport and intersection observers
//! - **network**: Resource loading over HTTP and from disk
//! - **enhancer**: Fragment loading, navigation, reveal, particles, smooth scroll
//! - **config**: JSON configuration with defaults
//! - **utils**: Shared utilities and error types

pub mod config;
pub mod dom;
pub mod enhancer;
pub mod network;
pub mod page;
pub mod utils;

// Re-export main types for convenience
pub use config::EnhancerConfig;
pub use enhancer::{InitReport, PageEnhancer, component_path, create_particles};
pub use page::{Location, Page, ReadyState};
pub use utils::error::{Result, VeneerError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "Veneer";

/// Stock site constants
pub mod defaults {
    /// Widest viewport treated as mobile, in px
    pub const MOBILE_BREAKPOINT: f32 = 768.0;
    /// Minimum delay from init start before reveal setup, in ms
    pub const SETTLE_DELAY_MS: u64 = 100;
    /// Particles created when no count is given
    pub const PARTICLE_COUNT: usize = 20;
    /// Color of links pointing at the current page
    pub const ACCENT_COLOR: &str = "var(--color-gold)";
}
