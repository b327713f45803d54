//! Plain-text rendering of a sizing result.

use std::fmt;

use crate::model::{SizingResult, SystemParameters};

/// A sizing result paired with the site parameters it was computed from.
///
/// The summary echoes the system voltage, which the result itself does not carry.
#[derive(Debug, Clone, Copy)]
pub struct SizingReport<'a> {
    pub params: &'a SystemParameters,
    pub result: &'a SizingResult,
}

impl<'a> SizingReport<'a> {
    pub fn new(params: &'a SystemParameters, result: &'a SizingResult) -> Self {
        Self { params, result }
    }
}

impl fmt::Display for SizingReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        writeln!(f, "--- Solar System Sizing ---")?;
        writeln!(f, "Panels required:       {}", r.required_panel_count)?;
        writeln!(
            f,
            "Inverter:              {:.2} kW (min {} W)",
            r.required_inverter_size_w / 1000.0,
            r.required_inverter_size_w
        )?;
        writeln!(
            f,
            "Batteries:             {} ({} series x {} parallel)",
            r.total_batteries, r.batteries_in_series, r.strings_in_parallel
        )?;
        writeln!(f, "Panel area:            {} m²", r.total_panel_area)?;
        writeln!(f)?;
        writeln!(f, "Daily consumption:     {:.2} kWh", r.total_consumption_kwh)?;
        writeln!(f, "Peak load:             {} W", r.peak_load_w)?;
        writeln!(
            f,
            "Daily production:      {:.2} kWh",
            r.required_daily_production_wh / 1000.0
        )?;
        writeln!(
            f,
            "Battery bank:          {:.0} Ah",
            r.total_battery_capacity_ah
        )?;
        write!(f, "System voltage:        {} V", self.params.system_voltage)?;

        if !r.consumption_breakdown.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "--- Consumption Breakdown (Wh/day) ---")?;
            for entry in &r.consumption_breakdown {
                write!(
                    f,
                    "\n{:<22} {:>10.1} Wh  {:>5.1}%",
                    entry.name,
                    entry.value_wh,
                    entry.share_pct(r.total_consumption_wh)
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SizingReport;
    use crate::model::{Appliance, SystemParameters};
    use crate::sizing::calculate;

    fn render(params: &SystemParameters, apps: &[Appliance]) -> String {
        SizingReport::new(params, &calculate(params, apps)).to_string()
    }

    fn household_report() -> String {
        let apps = [
            Appliance::new("LED", 10.0, 5, 6.0),
            Appliance::new("TV", 150.0, 1, 4.0),
            Appliance::new("Fridge", 200.0, 1, 8.0),
            Appliance::new("Charger", 15.0, 2, 3.0),
        ];
        render(&SystemParameters::default(), &apps)
    }

    #[test]
    fn summary_lines() {
        let text = household_report();
        assert!(text.contains("Panels required:       2\n"));
        assert!(text.contains("Inverter:              0.54 kW (min 538 W)"));
        assert!(text.contains("Batteries:             2 (2 series x 1 parallel)"));
        assert!(text.contains("Panel area:            3.4 m²"));
        assert!(text.contains("Daily consumption:     2.59 kWh"));
        assert!(text.contains("Peak load:             430 W"));
        assert!(text.contains("Daily production:      3.45 kWh"));
        assert!(text.contains("Battery bank:          135 Ah"));
        assert!(text.contains("System voltage:        24 V"));
    }

    #[test]
    fn system_voltage_follows_the_parameters() {
        let params = SystemParameters {
            system_voltage: 48.0,
            ..SystemParameters::default()
        };
        let text = render(&params, &[Appliance::new("Fan", 75.0, 2, 6.0)]);
        assert!(text.contains("System voltage:        48 V\n"));
        assert!(text.contains("Batteries:             4 (4 series x 1 parallel)"));
    }

    #[test]
    fn breakdown_table_has_one_row_per_entry() {
        let text = household_report();
        let rows: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with("--- Consumption Breakdown"))
            .skip(1)
            .collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[2].starts_with("Fridge"));
        assert!(rows[2].contains("1600.0 Wh"));
        assert!(rows[2].contains("61.8%"));
    }

    #[test]
    fn empty_result_has_no_breakdown_section() {
        let text = render(&SystemParameters::default(), &[]);
        assert!(!text.contains("Breakdown"));
        assert!(text.contains("Panels required:       0"));
    }
}
