//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmController (domain)
//! ```
//!
//! Driven adapters (state store, classifier, listeners, raw storage)
//! implement these traits.  The [`AlarmController`](super::service::AlarmController)
//! consumes them via generics, so the decision core never touches storage
//! or image analysis directly.
//!
//! All port errors are typed; callers must handle every variant explicitly.

use crate::config::SystemConfig;
use crate::model::{AlarmStatus, ArmingStatus, Sensor};

// ───────────────────────────────────────────────────────────────
// State store (driven adapter: domain ↔ persisted system state)
// ───────────────────────────────────────────────────────────────

/// Owner of the persisted system state: both statuses and the sensor set.
///
/// The controller keeps no copy of any of this and re-reads it on every
/// operation.  Sensors are unique by name.
pub trait StateStore {
    fn arming_status(&self) -> Result<ArmingStatus, StorageError>;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError>;

    fn alarm_status(&self) -> Result<AlarmStatus, StorageError>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError>;

    /// Every stored sensor, sorted by name.
    fn sensors(&self) -> Result<Vec<Sensor>, StorageError>;

    /// Insert a sensor, replacing any stored sensor with the same name.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StorageError>;

    /// Remove the sensor with this name.  Removing an absent sensor is `Ok`.
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError>;

    /// Persist the current state of an already-stored sensor.
    /// Returns [`StorageError::NotFound`] if no sensor has this name.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Cat classifier (driven adapter: domain → image analysis)
// ───────────────────────────────────────────────────────────────

/// Answers whether an image shows a cat with at least the given confidence.
pub trait CatClassifier {
    /// `confidence_threshold` is on a 0–100 scale.
    fn contains_cat(&self, image: &[u8], confidence_threshold: f32)
    -> Result<bool, ClassifierError>;
}

// ───────────────────────────────────────────────────────────────
// Status listener (driven adapter: domain → presentation / logging)
// ───────────────────────────────────────────────────────────────

/// Observer of controller state changes.
///
/// Each signal is optional to act upon; the default bodies do nothing.
/// Listeners are registered behind an `Arc` and identified by pointer, so
/// any state they keep needs interior mutability.
pub trait StatusListener: Send + Sync {
    /// The alarm status moved to `status`.
    fn alarm_status_changed(&self, _status: AlarmStatus) {}

    /// An image was classified; carries the verdict.
    fn cat_detected(&self, _detected: bool) {}

    /// The arming status changed and sensors may have been reset.
    /// Carries no payload; listeners re-query the controller.
    fn sensors_changed(&self) {}
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate before persisting.  Invalid values are
/// rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&mut self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: ↔ raw blob storage)
// ───────────────────────────────────────────────────────────────

/// Namespaced key-value blob storage underneath the state store.
///
/// Keys are namespaced to keep state, sensors and config apart.  Writes
/// must be atomic: a failed write leaves the previous value in place.
pub trait StoragePort {
    /// Read a value into a freshly allocated buffer.
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;

    /// Every key in `namespace`, sorted.
    fn keys(&self, namespace: &str) -> Result<Vec<String>, StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`StateStore`] and [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key or sensor does not exist.
    NotFound,
    /// Storage is full.
    Full,
    /// Generic I/O error.
    IoError,
    /// Stored bytes failed to decode.
    Corrupted,
}

/// Errors from [`CatClassifier`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierError {
    /// The image payload was empty.
    EmptyImage,
    /// The image could not be decoded.
    UnreadableImage,
    /// The classification backend is unreachable or failed.
    Unavailable,
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Underlying storage failed.
    Storage(StorageError),
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
            Self::Corrupted => write!(f, "stored data corrupted"),
        }
    }
}

impl core::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyImage => write!(f, "empty image"),
            Self::UnreadableImage => write!(f, "unreadable image"),
            Self::Unavailable => write!(f, "classifier unavailable"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl std::error::Error for StorageError {}
impl std::error::Error for ClassifierError {}
impl std::error::Error for ConfigError {}
