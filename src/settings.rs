use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::DEFAULT_TICK_INTERVAL_MS;
use crate::sensor::DEFAULT_DEVICE_PATH;
use crate::tilt::DEFAULT_TILT_THRESHOLD;

const APP_DIR_NAME: &str = "tilt-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Optional per-machine configuration: sensor wiring and calibration.
///
/// Read-only at startup; unknown or absent fields fall back to defaults,
/// so a settings file only needs the values it wants to override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// I2C device node the accelerometer is wired to.
    pub device: PathBuf,
    /// Calibration offset added to the raw x axis.
    pub offset_x: i16,
    /// Calibration offset added to the raw y axis.
    pub offset_y: i16,
    /// Tilt threshold in raw sensor units.
    pub threshold: i16,
    /// Tick interval in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE_PATH),
            offset_x: 0,
            offset_y: 0,
            threshold: DEFAULT_TILT_THRESHOLD,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from disk.
///
/// Returns defaults when the file does not exist. Returns `Err` when the
/// file exists but cannot be read or parsed, so the caller can surface a
/// warning before entering raw terminal mode.
pub fn load_settings() -> io::Result<Settings> {
    load_settings_from_path(&settings_path())
}

fn load_settings_from_path(path: &Path) -> io::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<Settings>(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
