//! Unified error type for the controller.
//!
//! A single `Error` enum that every port error converts into, keeping the
//! caller's handling uniform.  Collaborator failures are surfaced as-is;
//! the controller never retries or swallows them.

use core::fmt;

use crate::app::ports::{ClassifierError, ConfigError, StorageError};

/// Every fallible controller operation funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A missing or empty argument, rejected before any state mutation.
    InvalidArgument(&'static str),
    /// A state store read or write failed.
    Storage(StorageError),
    /// The cat classifier failed; the detection result is unknown.
    Classification(ClassifierError),
    /// The store already holds the configured maximum number of sensors.
    SensorLimitReached(usize),
    /// A command named a sensor the store does not hold.
    UnknownSensor(String),
    /// Configuration could not be loaded or saved.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Classification(e) => write!(f, "classification: {e}"),
            Self::SensorLimitReached(max) => {
                write!(f, "sensor limit reached ({max} sensors)")
            }
            Self::UnknownSensor(name) => write!(f, "unknown sensor: {name}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            Self::Classification(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ClassifierError> for Error {
    fn from(e: ClassifierError) -> Self {
        Self::Classification(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
