//! Catpoint console: Main Entry Point
//!
//! Wires the adapters around the controller and feeds it one command per
//! stdin line.  The single read loop is the only caller, which keeps every
//! controller operation serialized.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  FileStorage ─▶ KvStateStore   DigestCatClassifier       │
//! │                 (State+Config) (CatClassifier)           │
//! │  LogStatusListener (StatusListener)                      │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ──────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │         AlarmController (pure logic)               │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use log::{info, warn};

use catpoint::AlarmController;
use catpoint::adapters::classifier::DigestCatClassifier;
use catpoint::adapters::file_storage::FileStorage;
use catpoint::adapters::log_sink::LogStatusListener;
use catpoint::adapters::repository::KvStateStore;
use catpoint::app::commands::AppCommand;
use catpoint::app::ports::{ConfigPort, StatusListener};
use catpoint::config::SystemConfig;
use catpoint::display::{alarm_style, arming_style, sensor_line};
use catpoint::model::{ArmingStatus, Sensor, SensorType};

type Controller = AlarmController<KvStateStore<FileStorage>, DigestCatClassifier>;

const HELP: &str = "\
commands:
  arm disarmed|home|away
  add <name> door|window|motion
  remove <name>
  activate <name> | deactivate <name> | toggle <name>
  scan <image-path>
  status | json
  help | quit";

/// What a console line asks for.
enum Line {
    Command(AppCommand),
    Status,
    Json,
    Help,
    Quit,
    Empty,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("CATPOINT_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("catpoint-data"));

    let storage = FileStorage::open(&data_dir)
        .map_err(|e| anyhow!("opening {}: {}", data_dir.display(), e))?;
    let mut store = KvStateStore::new(storage);
    let config = load_config(&mut store)?;
    info!("Config: max {} sensors", config.max_sensors);

    let mut controller = AlarmController::new(store, DigestCatClassifier::new(), config);
    let listener: Arc<dyn StatusListener> = Arc::new(LogStatusListener::new());
    controller.add_status_listener(listener);

    print_status(&controller)?;
    println!("{HELP}");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        match parse_line(&line) {
            Ok(Line::Command(cmd)) => {
                if let Err(e) = controller.handle_command(cmd) {
                    warn!("Command '{}' failed: {}", line.trim(), e);
                }
            }
            Ok(Line::Status) => print_status(&controller)?,
            Ok(Line::Json) => {
                let snapshot = controller.snapshot()?;
                println!("{}", serde_json::to_string(&snapshot)?);
            }
            Ok(Line::Help) => println!("{HELP}"),
            Ok(Line::Quit) => break,
            Ok(Line::Empty) => {}
            Err(e) => warn!("{e}"),
        }
        io::stdout().flush()?;
    }

    info!("Catpoint console exiting");
    Ok(())
}

/// Stored config wins; otherwise `CATPOINT_CONFIG` seeds it from JSON.
fn load_config(store: &mut KvStateStore<FileStorage>) -> Result<SystemConfig> {
    if let Some(path) = std::env::var_os("CATPOINT_CONFIG") {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", PathBuf::from(&path).display()))?;
        let config: SystemConfig = serde_json::from_str(&text).context("parsing config JSON")?;
        store.save(&config)?;
        info!("Config seeded from {}", PathBuf::from(&path).display());
        return Ok(config);
    }
    Ok(store.load()?)
}

fn print_status(controller: &Controller) -> Result<()> {
    let snapshot = controller.snapshot()?;
    println!("Arming: {}", arming_style(snapshot.arming).label);
    println!("Alarm:  {}", alarm_style(snapshot.alarm).label);
    println!("Cat:    {}", if snapshot.cat_detected { "detected" } else { "none" });
    for sensor in &snapshot.sensors {
        println!("  {}", sensor_line(sensor));
    }
    Ok(())
}

fn parse_line(line: &str) -> Result<Line> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Line::Empty);
    };
    let rest: Vec<&str> = words.collect();
    let name = || -> Result<String> {
        if rest.is_empty() {
            bail!("'{verb}' needs a sensor name");
        }
        Ok(rest.join(" "))
    };

    let cmd = match verb {
        "arm" => {
            let status = match rest.as_slice() {
                ["disarmed" | "off"] => ArmingStatus::Disarmed,
                ["home"] => ArmingStatus::ArmedHome,
                ["away"] => ArmingStatus::ArmedAway,
                _ => bail!("usage: arm disarmed|home|away"),
            };
            AppCommand::SetArming(status)
        }
        "add" => {
            let Some((kind, name_parts)) = rest.split_last() else {
                bail!("usage: add <name> door|window|motion");
            };
            let kind = SensorType::from_name(kind)
                .ok_or_else(|| anyhow!("unknown sensor type '{kind}'"))?;
            if name_parts.is_empty() {
                bail!("usage: add <name> door|window|motion");
            }
            AppCommand::AddSensor(Sensor::new(name_parts.join(" "), kind))
        }
        "remove" => AppCommand::RemoveSensor(name()?),
        "activate" => AppCommand::SetSensorActive {
            name: name()?,
            active: true,
        },
        "deactivate" => AppCommand::SetSensorActive {
            name: name()?,
            active: false,
        },
        "toggle" => AppCommand::ToggleSensor(name()?),
        "scan" => {
            let path = name()?;
            let image = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
            AppCommand::ProcessImage(image)
        }
        "status" => return Ok(Line::Status),
        "json" => return Ok(Line::Json),
        "help" => return Ok(Line::Help),
        "quit" | "exit" => return Ok(Line::Quit),
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Line::Command(cmd))
}
