//! Outbound application events.
//!
//! The [`AlarmController`](super::service::AlarmController) queues these
//! while an operation runs and hands them to the
//! [`ListenerRegistry`](super::listeners::ListenerRegistry) once every
//! storage write has succeeded.  Each variant maps onto one
//! [`StatusListener`](super::ports::StatusListener) callback.

use crate::model::AlarmStatus;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The alarm status changed to a new value.
    AlarmStatusChanged(AlarmStatus),

    /// An image was classified.
    CatDetection(bool),

    /// Arming status changed; sensor flags may have been reset.
    SensorsChanged,
}
