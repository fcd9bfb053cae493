//! # Settings Module
//!
//! ## Purpose
//! Persistent configuration of the MolMass command-line tool: which element table is loaded,
//! how the formula scanner moves past subscripts and where log messages go.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "table_path": "periodic_table.csv",
//!   "subscript_advance": "ScannedDigits",
//!   "log_level": "info",
//!   "log_file": null
//! }
//! ```
//! A missing configuration file means defaults; a present but malformed one is an error.

use crate::MolarMass::MolMassError;
use crate::MolarMass::formula_scanner::SubscriptAdvance;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "molmass_config.json";

/// User settings of the command-line tool.
///
/// # Fields
/// * `table_path` - comma-delimited file with element symbols and atomic masses
/// * `subscript_advance` - see `SubscriptAdvance`
/// * `log_level` - one of off, error, warn, info, debug, trace
/// * `log_file` - if set, log messages are also written to this file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub table_path: String,
    pub subscript_advance: SubscriptAdvance,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            table_path: "periodic_table.csv".to_string(),
            subscript_advance: SubscriptAdvance::ScannedDigits,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file, falls back to defaults if the file doesn't exist.
    pub fn load<P: AsRef<Path>>(config_file: P) -> Result<Self, MolMassError> {
        let path = config_file.as_ref();
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            MolMassError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| MolMassError::Config(format!("cannot parse '{}': {}", path.display(), e)))
    }

    /// Saves settings as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, config_file: P) -> Result<(), MolMassError> {
        let path = config_file.as_ref();
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| MolMassError::Config(e.to_string()))?;
        fs::write(path, content).map_err(|e| {
            MolMassError::Config(format!("cannot write '{}': {}", path.display(), e))
        })
    }

    /// unknown levels fall back to Info
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
