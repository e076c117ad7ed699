//! Inbound commands to the alarm controller.
//!
//! These represent actions requested by the outside world (console,
//! control panel, camera feed) that the
//! [`AlarmController`](super::service::AlarmController) interprets through
//! [`handle_command`](super::service::AlarmController::handle_command).
//! Sensors are addressed by name and resolved against the store at
//! dispatch time.

use crate::model::{ArmingStatus, Sensor};

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Change the arming mode.
    SetArming(ArmingStatus),

    /// Register a new sensor.
    AddSensor(Sensor),

    /// Remove the named sensor.
    RemoveSensor(String),

    /// Drive the named sensor to an explicit activation state.
    SetSensorActive { name: String, active: bool },

    /// Flip the named sensor's activation state.
    ToggleSensor(String),

    /// Classify a camera frame.
    ProcessImage(Vec<u8>),
}
