//! CSV export for sizing results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::model::SizingResult;

/// Column header for the consumption breakdown export.
const BREAKDOWN_HEADER: [&str; 3] = ["name", "energy_wh", "share_pct"];

/// Column header for the summary export.
const SUMMARY_HEADER: [&str; 2] = ["metric", "value"];

/// Exports the consumption breakdown to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_breakdown_csv(result: &SizingResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_breakdown_csv(result, io::BufWriter::new(file))
}

/// Writes one row per breakdown entry: name, daily Wh, share of the total in percent.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_breakdown_csv(result: &SizingResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(BREAKDOWN_HEADER)?;

    for entry in &result.consumption_breakdown {
        wtr.write_record(&[
            entry.name.clone(),
            format!("{:.2}", entry.value_wh),
            format!("{:.2}", entry.share_pct(result.total_consumption_wh)),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the scalar sizing figures to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_summary_csv(result: &SizingResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_summary_csv(result, io::BufWriter::new(file))
}

/// Writes one `metric,value` row per scalar field of the result.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_summary_csv(result: &SizingResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SUMMARY_HEADER)?;

    let rows: [(&str, f64); 11] = [
        ("total_consumption_wh", result.total_consumption_wh),
        ("total_consumption_kwh", result.total_consumption_kwh),
        ("peak_load_w", result.peak_load_w),
        (
            "required_daily_production_wh",
            result.required_daily_production_wh,
        ),
        ("required_panel_count", result.required_panel_count),
        ("required_inverter_size_w", result.required_inverter_size_w),
        ("total_battery_capacity_ah", result.total_battery_capacity_ah),
        ("batteries_in_series", result.batteries_in_series),
        ("strings_in_parallel", result.strings_in_parallel),
        ("total_batteries", result.total_batteries),
        ("total_panel_area", result.total_panel_area),
    ];
    for (metric, value) in rows {
        wtr.write_record([metric.to_string(), value.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
