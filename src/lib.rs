//! Off-grid solar system sizing from a household appliance inventory.

/// REST API over the sizing engine (feature `api`).
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod io;
pub mod logging;
/// Appliance, site parameter and result records.
pub mod model;
pub mod report;
pub mod sizing;
pub mod validate;

pub use config::{ConfigError, Scenario};
pub use report::SizingReport;
pub use sizing::{calculate, size_system};
pub use validate::{Locale, ValidationOutcome, validate, validate_with};
