//! Configuration for the serving pipeline

use crate::error::{RagError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a serving pipeline instance
///
/// Capacities bound the two long-lived caches; the latency budget is the
/// per-request target the adaptive tuner steers against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Maximum number of entries in the retrieval cache (query -> doc ids)
    pub retrieval_cache_entries: usize,

    /// Maximum number of entries in the fragment cache (doc id -> text)
    pub fragment_cache_entries: usize,

    /// Per-request latency target in milliseconds, fed to the knob selector
    pub latency_budget_ms: f64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            retrieval_cache_entries: 512,
            fragment_cache_entries: 4096,
            latency_budget_ms: 40.0,
        }
    }
}

impl ServeConfig {
    /// Create a new builder for serving configuration
    pub fn builder() -> ServeConfigBuilder {
        ServeConfigBuilder::default()
    }

    /// Validate the configuration
    ///
    /// Zero cache capacities are allowed: a zero-capacity cache is a defined
    /// pass-through where every insert is immediately dropped.
    pub fn validate(&self) -> Result<()> {
        if !self.latency_budget_ms.is_finite() || self.latency_budget_ms <= 0.0 {
            return Err(RagError::Config(
                "latency_budget_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Configuration for memory-constrained runs
    pub fn small() -> Self {
        Self {
            retrieval_cache_entries: 64,
            fragment_cache_entries: 256,
            ..Default::default()
        }
    }
}

/// Builder for serving configuration
#[derive(Debug, Default)]
pub struct ServeConfigBuilder {
    retrieval_cache_entries: Option<usize>,
    fragment_cache_entries: Option<usize>,
    latency_budget_ms: Option<f64>,
}

impl ServeConfigBuilder {
    /// Set the retrieval cache capacity (entries)
    pub fn retrieval_cache_entries(mut self, entries: usize) -> Self {
        self.retrieval_cache_entries = Some(entries);
        self
    }

    /// Set the fragment cache capacity (entries)
    pub fn fragment_cache_entries(mut self, entries: usize) -> Self {
        self.fragment_cache_entries = Some(entries);
        self
    }

    /// Set the per-request latency budget in milliseconds
    pub fn latency_budget_ms(mut self, budget: f64) -> Self {
        self.latency_budget_ms = Some(budget);
        self
    }

    /// Build the serving configuration
    pub fn build(self) -> ServeConfig {
        let defaults = ServeConfig::default();

        ServeConfig {
            retrieval_cache_entries: self
                .retrieval_cache_entries
                .unwrap_or(defaults.retrieval_cache_entries),
            fragment_cache_entries: self
                .fragment_cache_entries
                .unwrap_or(defaults.fragment_cache_entries),
            latency_budget_ms: self.latency_budget_ms.unwrap_or(defaults.latency_budget_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServeConfig::default();
        assert_eq!(config.retrieval_cache_entries, 512);
        assert_eq!(config.fragment_cache_entries, 4096);
        assert_eq!(config.latency_budget_ms, 40.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ServeConfig::builder()
            .retrieval_cache_entries(8)
            .fragment_cache_entries(32)
            .latency_budget_ms(25.0)
            .build();

        assert_eq!(config.retrieval_cache_entries, 8);
        assert_eq!(config.fragment_cache_entries, 32);
        assert_eq!(config.latency_budget_ms, 25.0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServeConfig::default();
        config.latency_budget_ms = 0.0;
        assert!(config.validate().is_err());

        config.latency_budget_ms = f64::NAN;
        assert!(config.validate().is_err());

        // Zero capacities are degenerate but legal
        let config = ServeConfig::builder()
            .retrieval_cache_entries(0)
            .fragment_cache_entries(0)
            .build();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_small_preset() {
        let config = ServeConfig::small();
        assert_eq!(config.retrieval_cache_entries, 64);
        assert_eq!(config.fragment_cache_entries, 256);
        assert_eq!(config.latency_budget_ms, 40.0);
    }
}
