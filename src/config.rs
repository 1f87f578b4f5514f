use crate::evaluator::{Direction, InputMode};
use crate::generator::{DifficultyModes, Mode};
use directories::ProjectDirs;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PLAYER_NAME: &str = "De Speler";

/// Game settings as chosen on the settings screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub input_mode: InputMode,
    pub direction: Direction,
    pub use_24_hour: bool,
    pub hours: bool,
    pub half: bool,
    pub quarter: bool,
    pub five: bool,
    pub minutes: bool,
    pub player_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Digital,
            direction: Direction::Reading,
            use_24_hour: false,
            hours: true,
            half: true,
            quarter: true,
            five: false,
            minutes: false,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

impl Config {
    fn flag(&self, mode: Mode) -> bool {
        match mode {
            Mode::Hours => self.hours,
            Mode::Half => self.half,
            Mode::Quarter => self.quarter,
            Mode::Five => self.five,
            Mode::Minutes => self.minutes,
        }
    }

    /// Enabled difficulty flags as a mode set
    pub fn modes(&self) -> DifficultyModes {
        Mode::ALL.into_iter().filter(|m| self.flag(*m)).collect()
    }

    /// Replace all five difficulty flags
    pub fn set_modes(&mut self, modes: &DifficultyModes) {
        self.hours = modes.contains(Mode::Hours);
        self.half = modes.contains(Mode::Half);
        self.quarter = modes.contains(Mode::Quarter);
        self.five = modes.contains(Mode::Five);
        self.minutes = modes.contains(Mode::Minutes);
    }

    /// One line description stored with a leaderboard entry,
    /// e.g. `Lezen (12u) - Hele uren, Kwartieren`
    pub fn settings_summary(&self) -> String {
        let direction = match self.direction {
            Direction::Reading => "Lezen",
            Direction::Setting => "Zetten",
        };
        let input = match (self.input_mode, self.use_24_hour) {
            (InputMode::Digital, true) => "24u",
            (InputMode::Digital, false) => "12u",
            (InputMode::Text, _) => "Woorden",
        };
        let difficulty = self.modes().iter().map(|m| m.label()).join(", ");
        format!("{direction} ({input}) - {difficulty}")
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "klokkijken") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("klokkijken_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice::<Config>(&bytes).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable config {}: {e}", self.path.display());
                Config::default()
            }),
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
