//! Log-based status listener adapter.
//!
//! Implements [`StatusListener`] by writing every controller notification
//! to the `log` facade.  A panel or push-notification adapter would
//! implement the same trait.

use core::sync::atomic::{AtomicU64, Ordering};

use log::{info, warn};

use crate::app::ports::StatusListener;
use crate::display::alarm_style;
use crate::model::AlarmStatus;

/// Adapter that logs every notification and counts how many it has seen.
#[derive(Default)]
pub struct LogStatusListener {
    notifications: AtomicU64,
}

impl LogStatusListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total notifications received since construction.
    pub fn notifications(&self) -> u64 {
        self.notifications.load(Ordering::Relaxed)
    }

    fn bump(&self) {
        self.notifications.fetch_add(1, Ordering::Relaxed);
    }
}

impl StatusListener for LogStatusListener {
    fn alarm_status_changed(&self, status: AlarmStatus) {
        self.bump();
        let style = alarm_style(status);
        if status == AlarmStatus::Alarm {
            warn!("ALARM | {:?} ({})", status, style.label);
        } else {
            info!("ALARM | {:?} ({})", status, style.label);
        }
    }

    fn cat_detected(&self, detected: bool) {
        self.bump();
        info!("CAMERA | cat_detected={}", detected);
    }

    fn sensors_changed(&self) {
        self.bump();
        info!("SENSORS | arming changed, sensor list refreshed");
    }
}
