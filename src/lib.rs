//! Catpoint alarm controller library.
//!
//! Derives an alarm status from arming mode, sensor activity and camera
//! cat detection.  The decision core lives in [`app`]; [`adapters`] holds
//! the storage, classifier and logging implementations of its ports.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod model;

pub use app::service::AlarmController;
pub use error::{Error, Result};
