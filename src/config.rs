//! System configuration parameters
//!
//! Tunables for the alarm controller.  Values are persisted through
//! [`ConfigPort`](crate::app::ports::ConfigPort) and can be seeded from a
//! JSON file by the console binary.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core system configuration
///
/// The cat-detection threshold is not a tunable; see
/// [`CAT_CONFIDENCE_THRESHOLD`](crate::app::service::CAT_CONFIDENCE_THRESHOLD).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    /// Maximum number of sensors the store may hold
    pub max_sensors: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self { max_sensors: 4 }
    }
}

impl SystemConfig {
    /// Range-check every field.  Called before any config is persisted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=64).contains(&self.max_sensors) {
            return Err(ConfigError::ValidationFailed("max_sensors must be 1–64"));
        }
        Ok(())
    }
}
