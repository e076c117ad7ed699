//! Observer registry.
//!
//! Listeners are held as `Arc<dyn StatusListener>` and keyed by the address
//! of the shared allocation, so registering the same listener twice is a
//! no-op and removal needs only a clone of the same `Arc`.  Fan-out order
//! across listeners is unspecified.

use std::sync::Arc;

use log::debug;

use super::events::AppEvent;
use super::ports::StatusListener;

#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Arc<dyn StatusListener>>,
}

/// Data address of the listener, ignoring the vtable half of the fat pointer.
fn identity(listener: &Arc<dyn StatusListener>) -> *const () {
    Arc::as_ptr(listener).cast::<()>()
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`.  Returns `false` if it was already registered.
    pub fn add(&mut self, listener: Arc<dyn StatusListener>) -> bool {
        if self.contains(&listener) {
            debug!("listener already registered");
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Unregister `listener`.  Returns `false` if it was not registered.
    pub fn remove(&mut self, listener: &Arc<dyn StatusListener>) -> bool {
        let id = identity(listener);
        let before = self.listeners.len();
        self.listeners.retain(|l| identity(l) != id);
        self.listeners.len() != before
    }

    pub fn contains(&self, listener: &Arc<dyn StatusListener>) -> bool {
        let id = identity(listener);
        self.listeners.iter().any(|l| identity(l) == id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver one event to every registered listener.
    pub fn broadcast(&self, event: AppEvent) {
        for listener in &self.listeners {
            match event {
                AppEvent::AlarmStatusChanged(status) => listener.alarm_status_changed(status),
                AppEvent::CatDetection(detected) => listener.cat_detected(detected),
                AppEvent::SensorsChanged => listener.sensors_changed(),
            }
        }
    }
}
