//! # Settings Module
//!
//! ## Purpose
//! Persistent defaults for a HofCalc session: temperature, unit cell volume,
//! how the input is split into fragments, which volume table is used, the
//! compound lookup service and where summaries are exported.
//!
//! The settings are passed explicitly to the pipeline; nothing here is global.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "temperature": 298.0,
//!   "unit_cell_volume": null,
//!   "split_mode": "semicolon",
//!   "volume_table": null,
//!   "lookup": {
//!     "enabled": true,
//!     "base_url": "https://pubchem.ncbi.nlm.nih.gov/rest/pug",
//!     "timeout_secs": 10
//!   },
//!   "export_dir": null
//! }
//! ```
//! Missing fields take their default values, so a file may hold only the
//! entries a user wants to change.
//!
//! ## Usage Pattern
//! ```rust, ignore
//! use hofcalc::settings::Settings;
//!
//! let mut settings = Settings::load(Path::new(DEFAULT_CONFIG_FILE))?;
//! settings.set_option("temperature", "293")?;
//! settings.save(Path::new(DEFAULT_CONFIG_FILE))?;
//! ```
use crate::Resolver::fragment_resolver::SplitMode;
use crate::Resolver::pubchem_api::PUBCHEM_REST_URL;
use crate::Volumes::hofmann_table::HofmannTable;
use crate::errors::HofCalcError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "hofcalc_config.json";

/// Compound lookup service options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// false restricts resolution to formulas
    pub enabled: bool,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: PUBCHEM_REST_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Session defaults, stored in `hofcalc_config.json`.
///
/// # Fields
/// * `temperature` - K, used when the query does not give one
/// * `unit_cell_volume` - Å³, enables the V_Cell / V_Hofmann ratio
/// * `split_mode` - how the input is cut into fragments
/// * `volume_table` - JSON file replacing the built-in Hofmann volumes
/// * `lookup` - compound lookup service
/// * `export_dir` - summaries are written here when set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub temperature: f64,
    pub unit_cell_volume: Option<f64>,
    pub split_mode: SplitMode,
    pub volume_table: Option<String>,
    pub lookup: LookupSettings,
    pub export_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature: 298.0,
            unit_cell_volume: None,
            split_mode: SplitMode::Semicolon,
            volume_table: None,
            lookup: LookupSettings::default(),
            export_dir: None,
        }
    }
}

impl Settings {
    /// Reads the settings file. An absent file gives the defaults; a file that
    /// exists but cannot be parsed is an error.
    pub fn load(path: &Path) -> Result<Self, HofCalcError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let settings: Settings = serde_json::from_str(&content)?;
            info!("settings loaded from {}", path.display());
            Ok(settings)
        } else {
            info!("no settings file at {}, using defaults", path.display());
            Ok(Settings::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), HofCalcError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("settings saved to {}", path.display());
        Ok(())
    }

    /// The user-supplied table if one is configured, the built-in one otherwise.
    pub fn load_volume_table(&self) -> Result<HofmannTable, HofCalcError> {
        match &self.volume_table {
            Some(path) => HofmannTable::load_json(Path::new(path)),
            None => Ok(HofmannTable::builtin()),
        }
    }

    /// Sets one option from its text form, as typed in the interactive menu.
    /// `none` (or an empty value) clears the optional ones.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), HofCalcError> {
        let value = value.trim();
        let invalid = || HofCalcError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
        };
        let cleared = value.is_empty() || value.eq_ignore_ascii_case("none");
        match key {
            "temperature" => {
                self.temperature = value.parse::<f64>().map_err(|_| invalid())?;
            }
            "unit_cell_volume" => {
                self.unit_cell_volume = if cleared {
                    None
                } else {
                    Some(value.parse::<f64>().map_err(|_| invalid())?)
                };
            }
            "split_mode" => {
                self.split_mode = match value.to_lowercase().as_str() {
                    "semicolon" => SplitMode::Semicolon,
                    "auto" => SplitMode::Auto,
                    _ => return Err(invalid()),
                };
            }
            "volume_table" => {
                self.volume_table = if cleared { None } else { Some(value.to_string()) };
            }
            "lookup" => {
                self.lookup.enabled = match value.to_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    _ => return Err(invalid()),
                };
            }
            "timeout_secs" => {
                self.lookup.timeout_secs = value.parse::<u64>().map_err(|_| invalid())?;
            }
            "base_url" => {
                if cleared {
                    return Err(invalid());
                }
                self.lookup.base_url = value.to_string();
            }
            "export_dir" => {
                self.export_dir = if cleared { None } else { Some(value.to_string()) };
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }

    /// `(name, value)` pairs for display
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let optional = |v: &Option<String>| v.clone().unwrap_or_else(|| "none".to_string());
        vec![
            ("temperature", format!("{} K", self.temperature)),
            (
                "unit_cell_volume",
                self.unit_cell_volume
                    .map(|v| format!("{} Å3", v))
                    .unwrap_or_else(|| "none".to_string()),
            ),
            (
                "split_mode",
                match self.split_mode {
                    SplitMode::Semicolon => "semicolon".to_string(),
                    SplitMode::Auto => "auto".to_string(),
                },
            ),
            ("volume_table", optional(&self.volume_table)),
            (
                "lookup",
                if self.lookup.enabled { "on" } else { "off" }.to_string(),
            ),
            ("base_url", self.lookup.base_url.clone()),
            ("timeout_secs", self.lookup.timeout_secs.to_string()),
            ("export_dir", optional(&self.export_dir)),
        ]
    }
}
