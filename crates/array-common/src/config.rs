//! Configuration for primitive-array storage.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::{ArrayError, ArrayResult};

static GLOBAL: OnceLock<ArrayConfig> = OnceLock::new();

/// Tuning knobs for array storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    /// Capacity of an array created without an explicit capacity.
    pub initial_capacity: usize,

    /// Arrays with at least this many elements are sorted in parallel.
    pub parallel_sort_threshold: usize,

    /// Upper bound for a single allocation in megabytes (0 = no explicit budget).
    pub memory_limit_mb: usize,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 8,
            parallel_sort_threshold: 8192,
            memory_limit_mb: 0,
        }
    }
}

impl ArrayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("PA_INITIAL_CAPACITY") {
            if let Ok(capacity) = val.parse() {
                config.initial_capacity = capacity;
            }
        }

        if let Ok(val) = std::env::var("PA_PARALLEL_SORT_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                config.parallel_sort_threshold = threshold;
            }
        }

        if let Ok(val) = std::env::var("PA_MEMORY_LIMIT_MB") {
            if let Ok(limit) = val.parse() {
                config.memory_limit_mb = limit;
            }
        }

        config
    }

    /// Parse configuration from a JSON document. Missing fields use defaults.
    pub fn from_json(json: &str) -> ArrayResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(ArrayError::InvalidArgument)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.parallel_sort_threshold < 2 {
            return Err("parallel_sort_threshold must be >= 2".to_string());
        }

        if self.initial_capacity > 1 << 20 {
            return Err("initial_capacity must be <= 1048576".to_string());
        }

        Ok(())
    }

    /// Get the allocation budget in bytes, if one is configured.
    pub fn memory_limit_bytes(&self) -> Option<u64> {
        if self.memory_limit_mb == 0 {
            None
        } else {
            Some(self.memory_limit_mb as u64 * 1024 * 1024)
        }
    }
}

/// Install the process-wide configuration.
///
/// Must happen before the first array reads the configuration; afterwards the
/// installed value is fixed.
pub fn install(config: ArrayConfig) -> ArrayResult<()> {
    config.validate().map_err(ArrayError::InvalidArgument)?;
    GLOBAL
        .set(config)
        .map_err(|_| ArrayError::invalid_argument("array configuration is already installed"))
}

/// The process-wide configuration, loaded from the environment on first use.
pub fn global() -> &'static ArrayConfig {
    GLOBAL.get_or_init(|| {
        let config = ArrayConfig::from_env();
        match config.validate() {
            Ok(()) => config,
            Err(_) => ArrayConfig::default(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ArrayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_capacity, 8);
        assert_eq!(config.parallel_sort_threshold, 8192);
        assert_eq!(config.memory_limit_bytes(), None);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ArrayConfig::from_json(r#"{"memory_limit_mb": 16}"#).unwrap();
        assert_eq!(config.memory_limit_bytes(), Some(16 * 1024 * 1024));
        assert_eq!(config.parallel_sort_threshold, 8192);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(ArrayConfig::from_json(r#"{"parallel_sort_threshold": 1}"#).is_err());
        assert!(ArrayConfig::from_json("not json").is_err());
    }
}
