//! Application core: pure decision logic, zero I/O.
//!
//! This module contains the business rules for the Catpoint system: how
//! arming mode, sensor activity and cat detection combine into an alarm
//! status.  All interaction with storage and image analysis happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! with in-memory fakes.

pub mod commands;
pub mod events;
pub mod listeners;
pub mod ports;
pub mod service;
