//! Site and equipment parameters for one sizing run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Site and equipment parameters.
///
/// All fields have defaults matching the reference household scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemParameters {
    /// Effective peak-sun hours per day at the site.
    pub sun_hours: f64,
    /// Rated output of one panel (W).
    pub panel_wattage: f64,
    /// Nominal DC bus voltage (V).
    pub system_voltage: f64,
    /// Rated capacity of one battery unit (Ah).
    pub battery_capacity: f64,
    /// Nominal voltage of one battery unit (V).
    pub battery_voltage: f64,
    /// Allowed depth of discharge (%, 0 < dod <= 100).
    pub dod: f64,
    /// Sunless days the battery bank must cover.
    pub autonomy_days: f64,
    /// Cumulative system losses (%, 0 < system_loss <= 100).
    pub system_loss: f64,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            sun_hours: 5.0,
            panel_wattage: 350.0,
            system_voltage: 24.0,
            battery_capacity: 200.0,
            battery_voltage: 12.0,
            dod: 80.0,
            autonomy_days: 1.0,
            system_loss: 25.0,
        }
    }
}

impl SystemParameters {
    /// Reads one field by tag.
    pub fn get(&self, field: SystemField) -> f64 {
        match field {
            SystemField::SunHours => self.sun_hours,
            SystemField::PanelWattage => self.panel_wattage,
            SystemField::SystemVoltage => self.system_voltage,
            SystemField::BatteryCapacity => self.battery_capacity,
            SystemField::BatteryVoltage => self.battery_voltage,
            SystemField::Dod => self.dod,
            SystemField::AutonomyDays => self.autonomy_days,
            SystemField::SystemLoss => self.system_loss,
        }
    }
}

/// Tag for each scalar of [`SystemParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SystemField {
    SunHours,
    PanelWattage,
    SystemVoltage,
    BatteryCapacity,
    BatteryVoltage,
    Dod,
    AutonomyDays,
    SystemLoss,
}

impl SystemField {
    /// All fields in declaration order.
    pub const ALL: [SystemField; 8] = [
        SystemField::SunHours,
        SystemField::PanelWattage,
        SystemField::SystemVoltage,
        SystemField::BatteryCapacity,
        SystemField::BatteryVoltage,
        SystemField::Dod,
        SystemField::AutonomyDays,
        SystemField::SystemLoss,
    ];

    /// Key used by form layers to attach an error to an input.
    pub fn key(self) -> &'static str {
        match self {
            SystemField::SunHours => "sunHours",
            SystemField::PanelWattage => "panelWattage",
            SystemField::SystemVoltage => "systemVoltage",
            SystemField::BatteryCapacity => "batteryCapacity",
            SystemField::BatteryVoltage => "batteryVoltage",
            SystemField::Dod => "dod",
            SystemField::AutonomyDays => "autonomyDays",
            SystemField::SystemLoss => "systemLoss",
        }
    }
}

impl fmt::Display for SystemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_household_scenario() {
        let p = SystemParameters::default();
        assert_eq!(p.sun_hours, 5.0);
        assert_eq!(p.panel_wattage, 350.0);
        assert_eq!(p.system_voltage, 24.0);
        assert_eq!(p.battery_capacity, 200.0);
        assert_eq!(p.battery_voltage, 12.0);
        assert_eq!(p.dod, 80.0);
        assert_eq!(p.autonomy_days, 1.0);
        assert_eq!(p.system_loss, 25.0);
    }

    #[test]
    fn get_reads_every_field() {
        let p = SystemParameters {
            sun_hours: 1.0,
            panel_wattage: 2.0,
            system_voltage: 3.0,
            battery_capacity: 4.0,
            battery_voltage: 5.0,
            dod: 6.0,
            autonomy_days: 7.0,
            system_loss: 8.0,
        };
        let values: Vec<f64> = SystemField::ALL.iter().map(|&f| p.get(f)).collect();
        assert_eq!(values, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn keys_are_camel_case() {
        assert_eq!(SystemField::SunHours.key(), "sunHours");
        assert_eq!(SystemField::SystemLoss.to_string(), "systemLoss");
    }
}
