//! Input and output records for a sizing run.

/// Appliance inventory entries and editing operations.
pub mod appliance;
pub mod params;
/// Derived sizing result and consumption breakdown.
pub mod result;

pub use appliance::{Appliance, ApplianceEdit, ApplianceId, Inventory};
pub use params::{SystemField, SystemParameters};
pub use result::{BreakdownEntry, SizingResult};
