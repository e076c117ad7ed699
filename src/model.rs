//! Core data model shared by the controller, the storage adapters and
//! whatever presentation layer sits on top.
//!
//! These types carry status values only.  Labels and colours for display
//! live in [`crate::display`].

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// How the user has armed the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub const ALL: [Self; 3] = [Self::Disarmed, Self::ArmedHome, Self::ArmedAway];

    pub fn is_armed(self) -> bool {
        self != Self::Disarmed
    }
}

/// Current threat-response level.
///
/// `Alarm` is sticky: sensor events never move the system out of it, only
/// an explicit disarm does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    pub const ALL: [Self; 3] = [Self::NoAlarm, Self::PendingAlarm, Self::Alarm];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl SensorType {
    pub const ALL: [Self; 3] = [Self::Door, Self::Window, Self::Motion];

    /// Parse the lowercase name used by the console (`door`, `window`, `motion`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "door" => Some(Self::Door),
            "window" => Some(Self::Window),
            "motion" => Some(Self::Motion),
            _ => None,
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door => write!(f, "DOOR"),
            Self::Window => write!(f, "WINDOW"),
            Self::Motion => write!(f, "MOTION"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor
// ---------------------------------------------------------------------------

/// A named physical-presence indicator.
///
/// Identity is the name: equality, ordering and hashing ignore `kind` and
/// `active`, so a set of sensors is a set of names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    name: String,
    kind: SensorType,
    active: bool,
}

impl Sensor {
    /// New sensors start inactive.
    pub fn new(name: impl Into<String>, kind: SensorType) -> Self {
        Self {
            name: name.into(),
            kind,
            active: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SensorType {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
