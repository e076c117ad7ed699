//! Alarm controller: the hexagonal core.
//!
//! [`AlarmController`] couples arming mode, sensor activity and the most
//! recent cat-detection verdict into a single alarm status, and tells every
//! registered listener when something they care about changed.
//!
//! ```text
//!   StateStore ◀──▶ ┌────────────────────────┐ ──▶ StatusListener(s)
//!                   │    AlarmController     │
//! CatClassifier ◀── │  arming · sensors · cat│
//!                   └────────────────────────┘
//! ```
//!
//! Every operation runs to completion before returning.  Events raised
//! during an operation are queued and only delivered once all of its
//! storage writes have succeeded; a storage failure therefore produces no
//! notifications at all (and no rollback of writes already made).

use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::SystemConfig;
use crate::error::{Error, Result};
use crate::model::{AlarmStatus, ArmingStatus, Sensor};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::listeners::ListenerRegistry;
use super::ports::{CatClassifier, StateStore, StatusListener};

/// Minimum classifier confidence (0-100) for an image to count as a cat.
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// Point-in-time view of the system, suitable for display or logging.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub arming: ArmingStatus,
    pub alarm: AlarmStatus,
    pub cat_detected: bool,
    pub sensors: Vec<Sensor>,
}

// ───────────────────────────────────────────────────────────────
// AlarmController
// ───────────────────────────────────────────────────────────────

pub struct AlarmController<S, C> {
    store: S,
    classifier: C,
    config: SystemConfig,
    listeners: ListenerRegistry,
    /// Verdict of the last successful classification.  The only state the
    /// controller owns; everything else is re-read from `store`.
    cat_detected: bool,
}

impl<S: StateStore, C: CatClassifier> AlarmController<S, C> {
    pub fn new(store: S, classifier: C, config: SystemConfig) -> Self {
        Self {
            store,
            classifier,
            config,
            listeners: ListenerRegistry::new(),
            cat_detected: false,
        }
    }

    // ── Arming ────────────────────────────────────────────────

    /// Change the arming mode.  Always accepted.
    ///
    /// Disarming clears the alarm.  Arming (home or away) deactivates every
    /// sensor; arming home while a cat is remembered raises the alarm.
    pub fn set_arming_status(&mut self, new_status: ArmingStatus) -> Result<()> {
        let mut pending = Vec::new();

        if !new_status.is_armed() {
            self.transition_alarm(AlarmStatus::NoAlarm, &mut pending)?;
        } else {
            self.deactivate_all_sensors()?;
            if new_status == ArmingStatus::ArmedHome && self.cat_detected {
                self.transition_alarm(AlarmStatus::Alarm, &mut pending)?;
            }
        }

        self.store.set_arming_status(new_status)?;
        info!("Arming status set to {:?}", new_status);

        pending.push(AppEvent::SensorsChanged);
        self.dispatch(pending);
        Ok(())
    }

    fn deactivate_all_sensors(&mut self) -> Result<()> {
        for mut sensor in self.store.sensors()? {
            if sensor.is_active() {
                sensor.set_active(false);
                self.store.update_sensor(&sensor)?;
                debug!("Sensor '{}' reset on arming", sensor.name());
            }
        }
        Ok(())
    }

    // ── Sensors ───────────────────────────────────────────────

    /// Drive `sensor` to `active`, persist it, and re-evaluate the alarm.
    ///
    /// `sensor` is updated in place.  Requesting the state it already has
    /// is a no-op: nothing is written and nobody is notified.
    pub fn change_sensor_activation_status(
        &mut self,
        sensor: &mut Sensor,
        active: bool,
    ) -> Result<()> {
        if sensor.name().trim().is_empty() {
            return Err(Error::InvalidArgument("sensor name is empty"));
        }
        if sensor.is_active() == active {
            debug!("Sensor '{}' already active={}, ignoring", sensor.name(), active);
            return Ok(());
        }

        sensor.set_active(active);
        self.store.update_sensor(sensor)?;
        info!("Sensor '{}' active={}", sensor.name(), active);

        let mut pending = Vec::new();
        let current = self.store.alarm_status()?;
        if active {
            match current {
                AlarmStatus::NoAlarm => {
                    self.transition_alarm(AlarmStatus::PendingAlarm, &mut pending)?;
                }
                AlarmStatus::PendingAlarm => {
                    if self.any_sensor_active()? {
                        self.transition_alarm(AlarmStatus::Alarm, &mut pending)?;
                    }
                }
                AlarmStatus::Alarm => {}
            }
        } else if current == AlarmStatus::PendingAlarm && !self.any_sensor_active()? {
            self.transition_alarm(AlarmStatus::NoAlarm, &mut pending)?;
        }

        self.dispatch(pending);
        Ok(())
    }

    /// Store a new sensor.  No alarm side effects, no notification.
    ///
    /// Re-adding a name the store already holds replaces that sensor and is
    /// not counted against the sensor limit.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        if sensor.name().trim().is_empty() {
            return Err(Error::InvalidArgument("sensor name is empty"));
        }
        let sensors = self.store.sensors()?;
        let limit = usize::from(self.config.max_sensors);
        if !sensors.contains(&sensor) && sensors.len() >= limit {
            warn!("Rejecting sensor '{}': limit of {} reached", sensor.name(), limit);
            return Err(Error::SensorLimitReached(limit));
        }
        info!("Adding sensor '{}' ({})", sensor.name(), sensor.kind());
        self.store.add_sensor(sensor)?;
        Ok(())
    }

    /// Remove a sensor.  No alarm side effects, no notification.
    pub fn remove_sensor(&mut self, sensor: &Sensor) -> Result<()> {
        self.store.remove_sensor(sensor)?;
        info!("Removed sensor '{}'", sensor.name());
        Ok(())
    }

    // ── Camera ────────────────────────────────────────────────

    /// Classify a camera frame and fold the verdict into the alarm status.
    ///
    /// A cat while armed home raises the alarm.  Otherwise, if no sensor is
    /// active, the alarm is cleared, whatever level it was at.  Listeners
    /// always hear the verdict.  Returns the verdict.
    pub fn process_image(&mut self, image: &[u8]) -> Result<bool> {
        if image.is_empty() {
            return Err(Error::InvalidArgument("image is empty"));
        }

        let detected = self
            .classifier
            .contains_cat(image, CAT_CONFIDENCE_THRESHOLD)
            .inspect_err(|e| warn!("Classification failed: {}", e))?;
        self.cat_detected = detected;
        info!("Image classified: cat_detected={}", detected);

        let mut pending = Vec::new();
        if detected && self.store.arming_status()? == ArmingStatus::ArmedHome {
            self.transition_alarm(AlarmStatus::Alarm, &mut pending)?;
        } else if !self.any_sensor_active()? {
            self.transition_alarm(AlarmStatus::NoAlarm, &mut pending)?;
        }

        pending.push(AppEvent::CatDetection(detected));
        self.dispatch(pending);
        Ok(detected)
    }

    // ── Listeners ─────────────────────────────────────────────

    /// Register a listener.  Adding the same `Arc` twice has no effect.
    pub fn add_status_listener(&mut self, listener: Arc<dyn StatusListener>) {
        self.listeners.add(listener);
    }

    pub fn remove_status_listener(&mut self, listener: &Arc<dyn StatusListener>) {
        self.listeners.remove(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command, resolving sensor names against the store.
    pub fn handle_command(&mut self, cmd: AppCommand) -> Result<()> {
        match cmd {
            AppCommand::SetArming(status) => self.set_arming_status(status),
            AppCommand::AddSensor(sensor) => self.add_sensor(sensor),
            AppCommand::RemoveSensor(name) => {
                let sensor = self.find_sensor(&name)?;
                self.remove_sensor(&sensor)
            }
            AppCommand::SetSensorActive { name, active } => {
                let mut sensor = self.find_sensor(&name)?;
                self.change_sensor_activation_status(&mut sensor, active)
            }
            AppCommand::ToggleSensor(name) => {
                let mut sensor = self.find_sensor(&name)?;
                let active = !sensor.is_active();
                self.change_sensor_activation_status(&mut sensor, active)
            }
            AppCommand::ProcessImage(image) => self.process_image(&image).map(|_| ()),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.store.alarm_status()?)
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.store.arming_status()?)
    }

    /// Every sensor, sorted by name.
    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        let mut sensors = self.store.sensors()?;
        sensors.sort();
        Ok(sensors)
    }

    /// Verdict of the last successful classification (`false` before any).
    pub fn cat_detected(&self) -> bool {
        self.cat_detected
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Result<StatusSnapshot> {
        Ok(StatusSnapshot {
            arming: self.arming_status()?,
            alarm: self.alarm_status()?,
            cat_detected: self.cat_detected,
            sensors: self.sensors()?,
        })
    }

    // ── Internal ──────────────────────────────────────────────

    fn find_sensor(&self, name: &str) -> Result<Sensor> {
        self.store
            .sensors()?
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::UnknownSensor(name.to_owned()))
    }

    fn any_sensor_active(&self) -> Result<bool> {
        Ok(self.store.sensors()?.iter().any(Sensor::is_active))
    }

    /// Persist `target` and queue a notification, unless it is already current.
    fn transition_alarm(&mut self, target: AlarmStatus, pending: &mut Vec<AppEvent>) -> Result<()> {
        let current = self.store.alarm_status()?;
        if current == target {
            return Ok(());
        }
        self.store.set_alarm_status(target)?;
        info!("Alarm status: {:?} -> {:?}", current, target);
        pending.push(AppEvent::AlarmStatusChanged(target));
        Ok(())
    }

    fn dispatch(&self, events: Vec<AppEvent>) {
        for event in events {
            self.listeners.broadcast(event);
        }
    }
}
