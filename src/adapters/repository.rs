//! Key-value backed state store.
//!
//! Implements [`StateStore`] and [`ConfigPort`] on top of any
//! [`StoragePort`], so the same persistence rules apply whether the bytes
//! live in memory or on disk.
//!
//! | Namespace | Key                  | Value (postcard)   |
//! |-----------|----------------------|--------------------|
//! | `state`   | `arming`             | `ArmingStatus`     |
//! | `state`   | `alarm`              | `AlarmStatus`      |
//! | `sensors` | hex of sensor name   | `Sensor`           |
//! | `config`  | `syscfg`             | `SystemConfig`     |
//!
//! Sensor names up to 100 bytes are hex-encoded so any name is a valid
//! storage key.  Longer names are keyed by `sha-` plus the hex SHA-256 of
//! the name, which keeps every key within file-name limits.  The `-` keeps
//! the two forms apart.  The full name lives in the record either way.
//! Missing status keys read as the enum defaults (`Disarmed`, `NoAlarm`).

use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::app::ports::{ConfigError, ConfigPort, StateStore, StorageError, StoragePort};
use crate::config::SystemConfig;
use crate::model::{AlarmStatus, ArmingStatus, Sensor};

const STATE_NAMESPACE: &str = "state";
const SENSOR_NAMESPACE: &str = "sensors";
const CONFIG_NAMESPACE: &str = "config";

const ARMING_KEY: &str = "arming";
const ALARM_KEY: &str = "alarm";
const CONFIG_KEY: &str = "syscfg";

pub struct KvStateStore<S> {
    storage: S,
}

/// Longest name, in bytes, that is stored under its plain hex encoding.
const MAX_HEX_KEYED_NAME: usize = 100;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn sensor_key(name: &str) -> String {
    if name.len() <= MAX_HEX_KEYED_NAME {
        hex(name.as_bytes())
    } else {
        format!("sha-{}", hex(&hmac_sha256::Hash::hash(name.as_bytes())))
    }
}

impl<S: StoragePort> KvStateStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Decode `namespace::key`, or `T::default()` if it was never written.
    fn load_or_default<T>(&self, namespace: &str, key: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        match self.storage.read(namespace, key) {
            Ok(bytes) => postcard::from_bytes(&bytes).map_err(|_| {
                warn!("KvStateStore: {}::{} failed to decode", namespace, key);
                StorageError::Corrupted
            }),
            Err(StorageError::NotFound) => Ok(T::default()),
            Err(e) => Err(e),
        }
    }

    fn put<T: Serialize>(&mut self, namespace: &str, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = postcard::to_allocvec(value).map_err(|_| StorageError::IoError)?;
        self.storage.write(namespace, key, &bytes)
    }
}

impl<S: StoragePort> StateStore for KvStateStore<S> {
    fn arming_status(&self) -> Result<ArmingStatus, StorageError> {
        self.load_or_default(STATE_NAMESPACE, ARMING_KEY)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError> {
        self.put(STATE_NAMESPACE, ARMING_KEY, &status)
    }

    fn alarm_status(&self) -> Result<AlarmStatus, StorageError> {
        self.load_or_default(STATE_NAMESPACE, ALARM_KEY)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError> {
        self.put(STATE_NAMESPACE, ALARM_KEY, &status)
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StorageError> {
        let mut sensors = Vec::new();
        for key in self.storage.keys(SENSOR_NAMESPACE)? {
            let bytes = self.storage.read(SENSOR_NAMESPACE, &key)?;
            let sensor: Sensor = postcard::from_bytes(&bytes).map_err(|_| {
                warn!("KvStateStore: sensor record {} failed to decode", key);
                StorageError::Corrupted
            })?;
            sensors.push(sensor);
        }
        sensors.sort();
        Ok(sensors)
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StorageError> {
        self.put(SENSOR_NAMESPACE, &sensor_key(sensor.name()), &sensor)
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        self.storage
            .delete(SENSOR_NAMESPACE, &sensor_key(sensor.name()))
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StorageError> {
        let key = sensor_key(sensor.name());
        if !self.storage.exists(SENSOR_NAMESPACE, &key) {
            return Err(StorageError::NotFound);
        }
        self.put(SENSOR_NAMESPACE, &key, sensor)
    }
}

impl<S: StoragePort> ConfigPort for KvStateStore<S> {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        match self.storage.read(CONFIG_NAMESPACE, CONFIG_KEY) {
            Ok(bytes) => {
                let cfg: SystemConfig =
                    postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
                info!("KvStateStore: loaded config from store");
                Ok(cfg)
            }
            Err(StorageError::NotFound) => {
                info!("KvStateStore: no stored config, using defaults");
                Ok(SystemConfig::default())
            }
            Err(e) => Err(ConfigError::Storage(e)),
        }
    }

    fn save(&mut self, config: &SystemConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.put(CONFIG_NAMESPACE, CONFIG_KEY, config)?;
        info!("KvStateStore: config saved");
        Ok(())
    }
}
