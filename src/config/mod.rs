//! Configuration of the ordering analysis
//!
//! Settings live in `.method-order.toml`; every field is optional:
//!
//! ```toml
//! screen_lines_count = 50
//! constructor_cohesion = true
//!
//! [weights]
//! declaration_before_usage = 4.0
//! overload_split = 5.0
//! ```

pub mod loader;
pub mod weights;

pub use loader::{
    directory_ancestors, find_config_from, load_config, load_config_from, parse_and_validate_config,
};
pub use weights::PenaltyWeights;

use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up by [`load_config`]
pub const CONFIG_FILE_NAME: &str = ".method-order.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodOrderConfig {
    /// Lines visible at once; calls further away count as distant
    #[serde(default = "default_screen_lines_count")]
    pub screen_lines_count: usize,

    #[serde(default)]
    pub weights: PenaltyWeights,

    /// Keep constructors together at the top of the class
    #[serde(default = "default_constructor_cohesion")]
    pub constructor_cohesion: bool,
}

impl Default for MethodOrderConfig {
    fn default() -> Self {
        Self {
            screen_lines_count: default_screen_lines_count(),
            weights: PenaltyWeights::default(),
            constructor_cohesion: default_constructor_cohesion(),
        }
    }
}

impl MethodOrderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.screen_lines_count == 0 {
            return Err("screen_lines_count must be at least 1".to_string());
        }
        self.weights.validate()
    }

    pub fn with_screen_lines_count(mut self, screen_lines_count: usize) -> Self {
        self.screen_lines_count = screen_lines_count;
        self
    }

    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_constructor_cohesion(mut self, constructor_cohesion: bool) -> Self {
        self.constructor_cohesion = constructor_cohesion;
        self
    }
}

pub fn default_screen_lines_count() -> usize {
    50
}

pub fn default_constructor_cohesion() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MethodOrderConfig::default();
        assert_eq!(config.screen_lines_count, 50);
        assert!(config.constructor_cohesion);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_screen_is_rejected() {
        let config = MethodOrderConfig::default().with_screen_lines_count(0);
        assert!(config.validate().is_err());
    }
}
