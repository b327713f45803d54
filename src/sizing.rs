//! Off-grid system sizing from an appliance inventory.
//!
//! [`calculate`] is a pure function over an already-validated snapshot. It
//! performs no range checks of its own: boundary inputs such as
//! `system_loss == 100` propagate as `inf`/`NaN` in the result.

use tracing::{debug, warn};

use crate::model::{Appliance, BreakdownEntry, SizingResult, SystemParameters};
use crate::validate::{Locale, ValidationErrors, validate_with};

/// Inverter headroom over the simultaneous peak load.
pub const INVERTER_SAFETY_FACTOR: f64 = 1.25;

/// Assumed footprint of one panel (m², 1.7 m x 1 m).
pub const PANEL_AREA_M2: f64 = 1.7;

/// Rounds to two decimal places.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Computes the recommended system for one input snapshot.
///
/// Callers must run [`crate::validate::validate`] first; see
/// [`size_system`] for the gated entry point.
///
/// # Examples
///
/// ```
/// use solar_sizer::model::{Appliance, SystemParameters};
/// use solar_sizer::sizing::calculate;
///
/// let apps = [Appliance::new("Fridge", 200.0, 1, 8.0)];
/// let r = calculate(&SystemParameters::default(), &apps);
/// assert_eq!(r.total_consumption_wh, 1600.0);
/// assert_eq!(r.required_inverter_size_w, 250.0);
/// ```
pub fn calculate(params: &SystemParameters, appliances: &[Appliance]) -> SizingResult {
    let total_consumption_wh = appliances
        .iter()
        .fold(0.0, |sum, a| sum + a.daily_energy_wh());
    let peak_load_w = appliances.iter().fold(0.0, |sum, a| sum + a.load_w());

    // Panels
    let required_daily_production_wh = total_consumption_wh / (1.0 - params.system_loss / 100.0);
    let required_panel_count =
        (required_daily_production_wh / (params.panel_wattage * params.sun_hours)).ceil();

    let required_inverter_size_w = (peak_load_w * INVERTER_SAFETY_FACTOR).ceil();

    // Battery bank
    let battery_bank_wh = (total_consumption_wh * params.autonomy_days) / (params.dod / 100.0);
    let total_battery_capacity_ah = battery_bank_wh / params.system_voltage;
    let batteries_in_series = (params.system_voltage / params.battery_voltage).round();
    let strings_in_parallel = (total_battery_capacity_ah / params.battery_capacity).ceil();
    let total_batteries = batteries_in_series * strings_in_parallel;

    let consumption_breakdown = appliances
        .iter()
        .filter(|a| a.daily_energy_wh() > 0.0)
        .map(|a| BreakdownEntry {
            name: a.name.clone(),
            value_wh: a.daily_energy_wh(),
        })
        .collect();

    SizingResult {
        total_consumption_wh,
        total_consumption_kwh: total_consumption_wh / 1000.0,
        peak_load_w,
        required_daily_production_wh,
        required_panel_count,
        required_inverter_size_w,
        total_battery_capacity_ah,
        batteries_in_series,
        strings_in_parallel,
        total_batteries,
        total_panel_area: round2(required_panel_count * PANEL_AREA_M2),
        consumption_breakdown,
    }
}

/// Validates the snapshot and, if it passes, sizes the system.
///
/// # Errors
///
/// Returns every violated rule when validation fails; [`calculate`] is not
/// invoked in that case.
pub fn size_system(
    locale: Locale,
    params: &SystemParameters,
    appliances: &[Appliance],
) -> Result<SizingResult, ValidationErrors> {
    if let Err(errors) = validate_with(locale, params, appliances).into_result() {
        debug!(errors = errors.len(), "inputs rejected by validation");
        return Err(errors);
    }

    let result = calculate(params, appliances);
    if !result.is_finite() {
        warn!(
            system_loss = params.system_loss,
            dod = params.dod,
            "sizing produced non-finite values at a range boundary"
        );
    }
    debug!(
        appliances = appliances.len(),
        total_wh = result.total_consumption_wh,
        panels = result.required_panel_count,
        batteries = result.total_batteries,
        "sizing complete"
    );
    Ok(result)
}
