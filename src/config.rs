//! TOML-based scenario configuration and preset definitions.
//!
//! A scenario is one input snapshot: the site parameters plus the appliance
//! inventory. Parsing checks structure only; physical ranges are the
//! validator's concern.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Appliance, Inventory, SystemParameters};

/// Scenario loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid scenario TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown preset \"{name}\", available: {}", Scenario::PRESETS.join(", "))]
    UnknownPreset { name: String },
}

/// Top-level scenario parsed from TOML.
///
/// ```toml
/// [system]
/// sun_hours = 5.0
/// system_loss = 25.0
///
/// [[appliance]]
/// name = "Fridge"
/// power = 200.0
/// quantity = 1
/// hours = 8.0
/// ```
///
/// Omitted `[system]` fields fall back to [`SystemParameters::default`];
/// an appliance without `id` gets a generated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub system: SystemParameters,
    #[serde(default, rename = "appliance")]
    pub appliances: Vec<Appliance>,
}

impl Scenario {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["household", "cabin", "workshop"];

    /// The reference household: lighting, TV, fridge and phone chargers on a 24 V bank.
    pub fn household() -> Self {
        Self {
            system: SystemParameters::default(),
            appliances: vec![
                Appliance::new("LED lamp", 10.0, 5, 6.0),
                Appliance::new("Television", 150.0, 1, 4.0),
                Appliance::new("Refrigerator", 200.0, 1, 8.0),
                Appliance::new("Phone charger", 15.0, 2, 3.0),
            ],
        }
    }

    /// Weekend cabin on a 12 V bus with two days of autonomy and lead-acid cells.
    pub fn cabin() -> Self {
        Self {
            system: SystemParameters {
                sun_hours: 4.0,
                panel_wattage: 200.0,
                system_voltage: 12.0,
                battery_capacity: 100.0,
                battery_voltage: 12.0,
                dod: 50.0,
                autonomy_days: 2.0,
                system_loss: 20.0,
            },
            appliances: vec![
                Appliance::new("LED lamp", 7.0, 4, 5.0),
                Appliance::new("Water pump", 60.0, 1, 1.0),
                Appliance::new("Radio", 20.0, 1, 3.0),
                Appliance::new("Phone charger", 10.0, 2, 2.0),
            ],
        }
    }

    /// Small workshop on a 48 V bus with heavy intermittent tools.
    pub fn workshop() -> Self {
        Self {
            system: SystemParameters {
                sun_hours: 5.5,
                panel_wattage: 450.0,
                system_voltage: 48.0,
                battery_capacity: 100.0,
                battery_voltage: 12.0,
                dod: 90.0,
                autonomy_days: 1.0,
                system_loss: 22.0,
            },
            appliances: vec![
                Appliance::new("Air compressor", 1500.0, 1, 1.5),
                Appliance::new("Bench grinder", 370.0, 1, 0.5),
                Appliance::new("Shop lights", 40.0, 8, 8.0),
                Appliance::new("Laptop", 65.0, 1, 8.0),
                Appliance::new("Fan", 75.0, 2, 6.0),
            ],
        }
    }

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPreset`] if the name is not in [`Scenario::PRESETS`].
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "household" => Ok(Self::household()),
            "cabin" => Ok(Self::cabin()),
            "workshop" => Ok(Self::workshop()),
            _ => Err(ConfigError::UnknownPreset {
                name: name.to_string(),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Appliance list as an editable inventory.
    pub fn inventory(&self) -> Inventory {
        Inventory::from(self.appliances.clone())
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::household()
    }
}
