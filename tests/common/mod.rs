//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_sizer::model::{Appliance, ApplianceId, SystemParameters};

/// Default site parameters (5 sun-hours, 350 W panels, 24 V bus, 12 V 200 Ah units).
pub fn default_params() -> SystemParameters {
    SystemParameters::default()
}

/// Appliance with a fixed id so error keys are predictable.
pub fn appliance(id: &str, name: &str, power: f64, quantity: i64, hours: f64) -> Appliance {
    Appliance::with_id(ApplianceId::new(id), name, power, quantity, hours)
}

/// The reference household inventory (2590 Wh/day, 430 W peak).
pub fn household() -> Vec<Appliance> {
    vec![
        appliance("led", "LED", 10.0, 5, 6.0),
        appliance("tv", "TV", 150.0, 1, 4.0),
        appliance("fridge", "Fridge", 200.0, 1, 8.0),
        appliance("charger", "Charger", 15.0, 2, 3.0),
    ]
}
