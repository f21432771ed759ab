use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::PaintRiskError;

const CONFIG_DIR_NAME: &str = "paintrisk";
const CONFIG_FILE_NAME: &str = "config.json";
const ANALYSIS_DELAY_MS: u64 = 1500;
const SUGGESTION_HIDE_DELAY_MS: u64 = 200;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct WindowPosition {
    pub x: f32,
    pub y: f32,
}

impl From<WindowPosition> for egui::Pos2 {
    fn from(value: WindowPosition) -> Self {
        egui::Pos2::new(value.x, value.y)
    }
}

impl From<egui::Pos2> for WindowPosition {
    fn from(value: egui::Pos2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Vehicle dataset to use instead of the built-in one
    pub dataset_path: Option<PathBuf>,
    pub analysis_delay_ms: u64,
    pub suggestion_hide_delay_ms: u64,
    pub window_position: Option<WindowPosition>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            analysis_delay_ms: ANALYSIS_DELAY_MS,
            suggestion_hide_delay_ms: SUGGESTION_HIDE_DELAY_MS,
            window_position: None,
        }
    }
}

impl AppConfig {
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn suggestion_hide_delay(&self) -> Duration {
        Duration::from_millis(self.suggestion_hide_delay_ms)
    }

    fn default_path() -> Option<PathBuf> {
        Some(
            dirs::config_dir()?
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        )
    }

    /// Read the config from the user's config directory, if there is one.
    pub fn from_local_file() -> Option<Self> {
        Self::from_file(&Self::default_path()?)
    }

    /// Read the config at `config_path`. A file that can't be read or parsed
    /// is logged and ignored.
    pub fn from_file(config_path: &Path) -> Option<Self> {
        if !config_path.exists() {
            return None;
        }

        let file = match std::fs::File::open(config_path) {
            Ok(file) => file,
            Err(e) => {
                error!("Could not open config file {:?}: {}", config_path, e);
                return None;
            }
        };
        match serde_json::from_reader(file) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring unreadable config file {:?}: {}", config_path, e);
                None
            }
        }
    }

    pub fn save(&self) -> Result<(), PaintRiskError> {
        let config_path = Self::default_path().ok_or(PaintRiskError::NoConfigDir)?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), PaintRiskError> {
        if let Some(parent) = config_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| PaintRiskError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| PaintRiskError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| PaintRiskError::ConfigSerializeError { source: e })
    }
}
