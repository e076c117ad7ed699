//! Mock port adapters for integration tests.
//!
//! `FlakyStore` wraps a real [`KvStateStore`] and can be told to fail a
//! specific kind of write, so tests can check what the controller does
//! when persistence breaks mid-operation.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use catpoint::adapters::memory::MemoryStorage;
use catpoint::adapters::repository::KvStateStore;
use catpoint::app::events::AppEvent;
use catpoint::app::ports::{
    CatClassifier, ClassifierError, StateStore, StatusListener, StorageError,
};
use catpoint::model::{AlarmStatus, ArmingStatus, Sensor};

// ── Store with targeted failures ──────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Nothing,
    AlarmWrite,
    ArmingWrite,
    SensorWrite,
    Reads,
}

pub struct FlakyStore {
    pub inner: KvStateStore<MemoryStorage>,
    pub fail_on: FailOn,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: KvStateStore::new(MemoryStorage::new()),
            fail_on: FailOn::Nothing,
        }
    }

    fn gate(&self, op: FailOn) -> Result<(), StorageError> {
        if self.fail_on == op {
            Err(StorageError::IoError)
        } else {
            Ok(())
        }
    }
}

impl StateStore for FlakyStore {
    fn arming_status(&self) -> Result<ArmingStatus, StorageError> {
        self.gate(FailOn::Reads)?;
        self.inner.arming_status()
    }
    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError> {
        self.gate(FailOn::ArmingWrite)?;
        self.inner.set_arming_status(status)
    }
    fn alarm_status(&self) -> Result<AlarmStatus, StorageError> {
        self.gate(FailOn::Reads)?;
        self.inner.alarm_status()
    }
    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError> {
        self.gate(FailOn::AlarmWrite)?;
        self.inner.set_alarm_status(status)
    }
    fn sensors(&self) -> Result<Vec<Sensor>, StorageError> {
        self.gate(FailOn::Reads)?;
        self.inner.sensors()
    }
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StorageError> {
        self.gate(FailOn::SensorWrite)?;
        self.inner.add_sensor(sensor)
    }
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        self.gate(FailOn::SensorWrite)?;
        self.inner.remove_sensor(sensor)
    }
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        self.gate(FailOn::SensorWrite)?;
        self.inner.update_sensor(sensor)
    }
}

// ── Scripted classifier ───────────────────────────────────────

/// Returns whatever the shared cell holds: `Ok(verdict)` or the error.
#[derive(Clone)]
pub struct ScriptedClassifier {
    pub next: Rc<Cell<Result<bool, ClassifierError>>>,
    pub calls: Rc<Cell<u32>>,
}

#[allow(dead_code)]
impl ScriptedClassifier {
    pub fn new(initial: Result<bool, ClassifierError>) -> Self {
        Self {
            next: Rc::new(Cell::new(initial)),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn set(&self, next: Result<bool, ClassifierError>) {
        self.next.set(next);
    }
}

impl CatClassifier for ScriptedClassifier {
    fn contains_cat(&self, _image: &[u8], _threshold: f32) -> Result<bool, ClassifierError> {
        self.calls.set(self.calls.get() + 1);
        self.next.get()
    }
}

// ── Recording listener ────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<AppEvent>>,
}

#[allow(dead_code)]
impl EventLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take(&self) -> Vec<AppEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl StatusListener for EventLog {
    fn alarm_status_changed(&self, status: AlarmStatus) {
        self.events
            .lock()
            .unwrap()
            .push(AppEvent::AlarmStatusChanged(status));
    }
    fn cat_detected(&self, detected: bool) {
        self.events.lock().unwrap().push(AppEvent::CatDetection(detected));
    }
    fn sensors_changed(&self) {
        self.events.lock().unwrap().push(AppEvent::SensorsChanged);
    }
}
