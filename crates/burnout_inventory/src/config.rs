//! Inventory configuration
//!
//! # Example Config File
//!
//! ```toml
//! capacity = 5
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Slot count used when nothing is configured
pub const DEFAULT_CAPACITY: usize = 5;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Construction-time settings for an inventory store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryConfig {
    /// Number of item slots
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl InventoryConfig {
    /// Config with a specific slot count
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Parse and validate from a TOML string
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded inventory config from {} (capacity {})",
            path.as_ref().display(),
            config.capacity
        );
        Ok(config)
    }

    /// Reject settings the store cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.capacity == 0 {
            return Err(ConfigError::Validation(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
