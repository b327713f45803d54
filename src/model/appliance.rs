use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Opaque identifier for an inventory entry.
///
/// Only used to correlate edits, removals and validation errors with a row.
/// It never takes part in any calculation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplianceId(String);

impl ApplianceId {
    /// Wraps a caller-assigned token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generates a fresh random token (16 lowercase hex digits).
    pub fn generate() -> Self {
        let raw: u64 = rand::rng().random();
        Self(format!("{raw:016x}"))
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One distinct electrical load in the household inventory.
///
/// # Fields
/// * `power` - Rated draw of one unit (W)
/// * `quantity` - Number of identical units
/// * `hours` - Daily usage duration (h, 0 to 24)
///
/// Missing fields deserialize to the blank-row values and `quantity` is
/// signed, so an incomplete or negative entry is loaded as-is and rejected
/// by the validator with a field key instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Appliance {
    #[serde(default = "ApplianceId::generate")]
    pub id: ApplianceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub power: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub hours: f64,
}

fn default_quantity() -> i64 {
    1
}

impl Appliance {
    /// Creates an appliance with a freshly generated id.
    pub fn new(name: impl Into<String>, power: f64, quantity: i64, hours: f64) -> Self {
        Self::with_id(ApplianceId::generate(), name, power, quantity, hours)
    }

    /// Creates an appliance with a caller-assigned id.
    pub fn with_id(
        id: ApplianceId,
        name: impl Into<String>,
        power: f64,
        quantity: i64,
        hours: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            power,
            quantity,
            hours,
        }
    }

    /// The empty row an editor appends: no name, zero power, one unit, zero hours.
    ///
    /// Fails validation on name and power until the user fills it in.
    pub fn blank() -> Self {
        Self::new("", 0.0, 1, 0.0)
    }

    /// Daily energy drawn by all units (Wh): `power * quantity * hours`.
    pub fn daily_energy_wh(&self) -> f64 {
        self.power * self.quantity as f64 * self.hours
    }

    /// Instantaneous draw with every unit switched on (W): `power * quantity`.
    pub fn load_w(&self) -> f64 {
        self.power * self.quantity as f64
    }
}

/// A single-field change applied to an inventory entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplianceEdit {
    Name(String),
    Power(f64),
    Quantity(i64),
    Hours(f64),
}

/// Ordered, editable appliance list.
///
/// Edits happen between calculations; [`Inventory::as_slice`] hands an
/// immutable snapshot to the validator and the sizing engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    appliances: Vec<Appliance>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an appliance and returns its id.
    pub fn push(&mut self, appliance: Appliance) -> ApplianceId {
        let id = appliance.id.clone();
        self.appliances.push(appliance);
        id
    }

    /// Appends a [`Appliance::blank`] row and returns its id.
    pub fn add_blank(&mut self) -> ApplianceId {
        self.push(Appliance::blank())
    }

    /// Removes the entry with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: &ApplianceId) -> Option<Appliance> {
        let idx = self.appliances.iter().position(|a| &a.id == id)?;
        Some(self.appliances.remove(idx))
    }

    /// Applies `edit` to the entry with `id`.
    ///
    /// Returns `false` and leaves the list untouched if no entry matches.
    pub fn edit(&mut self, id: &ApplianceId, edit: ApplianceEdit) -> bool {
        let Some(app) = self.appliances.iter_mut().find(|a| &a.id == id) else {
            return false;
        };
        match edit {
            ApplianceEdit::Name(name) => app.name = name,
            ApplianceEdit::Power(power) => app.power = power,
            ApplianceEdit::Quantity(quantity) => app.quantity = quantity,
            ApplianceEdit::Hours(hours) => app.hours = hours,
        }
        true
    }

    pub fn get(&self, id: &ApplianceId) -> Option<&Appliance> {
        self.appliances.iter().find(|a| &a.id == id)
    }

    pub fn as_slice(&self) -> &[Appliance] {
        &self.appliances
    }

    pub fn len(&self) -> usize {
        self.appliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appliances.is_empty()
    }
}

impl From<Vec<Appliance>> for Inventory {
    fn from(appliances: Vec<Appliance>) -> Self {
        Self { appliances }
    }
}
