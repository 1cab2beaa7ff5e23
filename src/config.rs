//! Enhancer configuration
//!
//! Every field has a default matching the stock site layout; a JSON file only
//! needs the keys it wants to change.

use crate::utils::{Result, VeneerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One fragment: the file to fetch and the element it fills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentSlot {
    /// File name under the component directory
    pub file: String,
    /// Id of the placeholder element
    pub placeholder: String,
}

impl FragmentSlot {
    fn new(file: &str, placeholder: &str) -> Self {
        Self {
            file: file.to_string(),
            placeholder: placeholder.to_string(),
        }
    }
}

/// Shared header/footer loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentConfig {
    /// Directory holding the fragments, relative to the site root
    pub dir: String,
    pub header: FragmentSlot,
    pub footer: FragmentSlot,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            dir: "components".to_string(),
            header: FragmentSlot::new("header.html", "header"),
            footer: FragmentSlot::new("footer.html", "footer"),
        }
    }
}

/// Navigation behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Widest viewport that gets the dropdown accordion
    pub breakpoint: f32,
    /// Class toggled on the menu and on dropdown items
    pub active_class: String,
    /// Color applied to links pointing at the current page
    pub accent_color: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            breakpoint: crate::defaults::MOBILE_BREAKPOINT,
            active_class: "active".to_string(),
            accent_color: crate::defaults::ACCENT_COLOR.to_string(),
        }
    }
}

/// Scroll reveal animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of an element that must be visible
    pub threshold: f32,
    /// Bottom root margin in px, negative to trigger before full entry
    pub root_margin_bottom: f32,
    /// Initial downward offset in px
    pub offset: f32,
    /// CSS transition applied to hidden elements
    pub transition: String,
    /// Minimum time from init start before reveal setup, in ms
    pub settle_delay_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_bottom: -100.0,
            offset: 30.0,
            transition: "opacity 0.6s ease, transform 0.6s ease".to_string(),
            settle_delay_ms: crate::defaults::SETTLE_DELAY_MS,
        }
    }
}

/// Particle emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles created when the caller gives no count
    pub count: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: crate::defaults::PARTICLE_COUNT,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

/// Complete enhancer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    pub fragments: FragmentConfig,
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub particles: ParticleConfig,
    pub network: NetworkConfig,
}

impl EnhancerConfig {
    /// Parse a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(VeneerError::Config(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        if self.fragments.header.placeholder.is_empty() || self.fragments.footer.placeholder.is_empty() {
            return Err(VeneerError::Config("fragment placeholders must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnhancerConfig::default();
        assert_eq!(config.fragments.dir, "components");
        assert_eq!(config.fragments.header.file, "header.html");
        assert_eq!(config.fragments.footer.placeholder, "footer");
        assert_eq!(config.navigation.breakpoint, 768.0);
        assert_eq!(config.reveal.settle_delay_ms, 100);
        assert_eq!(config.particles.count, 20);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EnhancerConfig::from_json(r#"{"navigation": {"breakpoint": 1024}}"#).unwrap();
        assert_eq!(config.navigation.breakpoint, 1024.0);
        assert_eq!(config.navigation.active_class, "active");
        assert_eq!(config.reveal, RevealConfig::default());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = EnhancerConfig::from_json(r#"{"reveal": {"threshold": 1.5}}"#).unwrap_err();
        assert!(matches!(err, VeneerError::Config(_)));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = EnhancerConfig::from_json("{").unwrap_err();
        assert!(matches!(err, VeneerError::Serialization(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("veneer.json");
        std::fs::write(&path, r#"{"fragments": {"dir": "partials"}}"#).unwrap();
        let config = EnhancerConfig::load(&path).unwrap();
        assert_eq!(config.fragments.dir, "partials");
        assert_eq!(config.fragments.header, FragmentSlot::new("header.html", "header"));
    }
}
