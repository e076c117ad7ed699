//! Presentation lookup table.
//!
//! Labels and RGB colours for each status, kept out of the model so the
//! decision core carries no rendering concerns.  Anything that draws the
//! system state (console, panel, log line) reads from here.

use crate::model::{AlarmStatus, ArmingStatus, Sensor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub rgb: (u8, u8, u8),
}

pub const fn arming_style(status: ArmingStatus) -> StatusStyle {
    match status {
        ArmingStatus::Disarmed => StatusStyle {
            label: "Disarmed",
            rgb: (102, 204, 0),
        },
        ArmingStatus::ArmedHome => StatusStyle {
            label: "Armed - At Home",
            rgb: (51, 153, 255),
        },
        ArmingStatus::ArmedAway => StatusStyle {
            label: "Armed - Away",
            rgb: (255, 102, 178),
        },
    }
}

pub const fn alarm_style(status: AlarmStatus) -> StatusStyle {
    match status {
        AlarmStatus::NoAlarm => StatusStyle {
            label: "Cool and Good",
            rgb: (120, 200, 30),
        },
        AlarmStatus::PendingAlarm => StatusStyle {
            label: "I'm in Danger...",
            rgb: (200, 150, 20),
        },
        AlarmStatus::Alarm => StatusStyle {
            label: "Awooga!",
            rgb: (250, 80, 50),
        },
    }
}

/// One-line description: `"<name> (<TYPE>): Active|Inactive"`.
pub fn sensor_line(sensor: &Sensor) -> String {
    format!(
        "{} ({}): {}",
        sensor.name(),
        sensor.kind(),
        if sensor.is_active() { "Active" } else { "Inactive" }
    )
}
