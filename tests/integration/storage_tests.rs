//! Controller over the on-disk store: state must survive a restart while
//! the cat verdict, which is never persisted, must not.

use catpoint::AlarmController;
use catpoint::adapters::classifier::DigestCatClassifier;
use catpoint::adapters::file_storage::FileStorage;
use catpoint::adapters::repository::KvStateStore;
use catpoint::app::ports::{ConfigPort, StoragePort};
use catpoint::app::service::CAT_CONFIDENCE_THRESHOLD;
use catpoint::config::SystemConfig;
use catpoint::model::{AlarmStatus, ArmingStatus, Sensor, SensorType};

use super::mock_ports::EventLog;

type DiskController = AlarmController<KvStateStore<FileStorage>, DigestCatClassifier>;

fn open(dir: &std::path::Path) -> DiskController {
    let storage = FileStorage::open(dir).unwrap();
    let store = KvStateStore::new(storage);
    let config = store.load().unwrap();
    AlarmController::new(store, DigestCatClassifier::new(), config)
}

/// Some one-byte frame the digest classifier scores at or above `threshold`.
fn cat_frame(threshold: f32) -> Vec<u8> {
    (0..=u8::MAX)
        .map(|b| vec![b])
        .find(|f| DigestCatClassifier::confidence(f) >= threshold)
        .expect("some byte scores above threshold")
}

#[test]
fn state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut c = open(dir.path());
        c.add_sensor(Sensor::new("Front Door", SensorType::Door)).unwrap();
        c.add_sensor(Sensor::new("Back Window", SensorType::Window)).unwrap();
        let mut door = c
            .sensors()
            .unwrap()
            .into_iter()
            .find(|s| s.name() == "Front Door")
            .unwrap();
        c.change_sensor_activation_status(&mut door, true).unwrap();
        assert_eq!(c.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    }

    let c = open(dir.path());
    assert_eq!(c.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    assert_eq!(c.arming_status().unwrap(), ArmingStatus::Disarmed);
    let sensors = c.sensors().unwrap();
    assert_eq!(sensors.len(), 2);
    assert_eq!(sensors[0].name(), "Back Window");
    assert!(!sensors[0].is_active());
    assert_eq!(sensors[1].name(), "Front Door");
    assert!(sensors[1].is_active());
}

#[test]
fn cat_verdict_is_forgotten_on_restart() {
    let dir = tempfile::tempdir().unwrap();
    let frame = cat_frame(CAT_CONFIDENCE_THRESHOLD);
    {
        let mut c = open(dir.path());
        assert!(c.process_image(&frame).unwrap());
        assert!(c.cat_detected());
    }

    let mut c = open(dir.path());
    assert!(!c.cat_detected());
    c.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    assert_eq!(c.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

#[test]
fn cat_while_armed_home_raises_persisted_alarm() {
    let dir = tempfile::tempdir().unwrap();
    let frame = cat_frame(CAT_CONFIDENCE_THRESHOLD);
    {
        let mut c = open(dir.path());
        let log = EventLog::new();
        c.add_status_listener(log.clone());
        c.set_arming_status(ArmingStatus::ArmedHome).unwrap();
        c.process_image(&frame).unwrap();
        assert_eq!(c.alarm_status().unwrap(), AlarmStatus::Alarm);
        assert!(!log.take().is_empty());
    }

    let c = open(dir.path());
    assert_eq!(c.arming_status().unwrap(), ArmingStatus::ArmedHome);
    assert_eq!(c.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn removed_sensor_stays_removed() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut c = open(dir.path());
        let hall = Sensor::new("hall", SensorType::Motion);
        c.add_sensor(hall.clone()).unwrap();
        c.remove_sensor(&hall).unwrap();
    }
    assert!(open(dir.path()).sensors().unwrap().is_empty());
}

#[test]
fn stored_config_governs_next_start() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = KvStateStore::new(FileStorage::open(dir.path()).unwrap());
        store
            .save(&SystemConfig { max_sensors: 1 })
            .unwrap();
    }

    let mut c = open(dir.path());
    assert_eq!(c.config().max_sensors, 1);
    c.add_sensor(Sensor::new("only", SensorType::Door)).unwrap();
    assert!(c.add_sensor(Sensor::new("second", SensorType::Door)).is_err());
}

#[test]
fn sensor_names_with_path_characters_are_stored_safely() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = open(dir.path());
    c.add_sensor(Sensor::new("../garage/door", SensorType::Door)).unwrap();

    let keys = c.store().storage().keys("sensors").unwrap();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].bytes().all(|b| b.is_ascii_hexdigit()));
    assert_eq!(c.sensors().unwrap()[0].name(), "../garage/door");
}

#[test]
fn long_sensor_names_fit_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let name = "Upstairs Master Bedroom North Window ".repeat(6);
    assert!(name.len() > 200);
    {
        let mut c = open(dir.path());
        c.add_sensor(Sensor::new(name.clone(), SensorType::Window)).unwrap();
        let mut window = c.sensors().unwrap().remove(0);
        c.change_sensor_activation_status(&mut window, true).unwrap();
    }

    let mut c = open(dir.path());
    let sensors = c.sensors().unwrap();
    assert_eq!(sensors.len(), 1);
    assert_eq!(sensors[0].name(), name);
    assert!(sensors[0].is_active());

    c.remove_sensor(&sensors[0]).unwrap();
    assert!(c.sensors().unwrap().is_empty());
}
