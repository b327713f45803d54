//! Input validation gating the sizing engine.
//!
//! Every rule is checked and every violation collected; a field appears at
//! most once in the result. Validation never fails with an error of its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Appliance, ApplianceId, SystemField, SystemParameters};

/// Per-appliance field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApplianceField {
    Name,
    Power,
    Quantity,
    Hours,
}

impl ApplianceField {
    fn key_prefix(self) -> &'static str {
        match self {
            ApplianceField::Name => "app_name_",
            ApplianceField::Power => "app_power_",
            ApplianceField::Quantity => "app_quantity_",
            ApplianceField::Hours => "app_hours_",
        }
    }
}

/// Structured reference to the input a validation error belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldRef {
    System(SystemField),
    Appliance {
        id: ApplianceId,
        field: ApplianceField,
    },
}

impl FieldRef {
    /// Flat string key a form layer binds errors to
    /// (e.g. `"dod"`, `"app_hours_<id>"`).
    pub fn key(&self) -> String {
        match self {
            FieldRef::System(field) => field.key().to_string(),
            FieldRef::Appliance { id, field } => format!("{}{id}", field.key_prefix()),
        }
    }

    fn appliance(id: &ApplianceId, field: ApplianceField) -> Self {
        FieldRef::Appliance {
            id: id.clone(),
            field,
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Language of the human-readable messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "fa")]
    Persian,
}

impl Locale {
    /// Parses a short or long locale tag (`en`, `english`, `fa`, `persian`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Locale::English),
            "fa" | "persian" => Some(Locale::Persian),
            _ => None,
        }
    }

    fn message(self, rule: Rule) -> &'static str {
        match (self, rule) {
            (Locale::English, Rule::Positive) => "value must be greater than zero",
            (Locale::English, Rule::DodMax) => "depth of discharge cannot exceed 100",
            (Locale::English, Rule::LossMax) => "system loss cannot exceed 100",
            (Locale::English, Rule::NameRequired) => "appliance name is required",
            (Locale::English, Rule::PowerPositive) => "power must be positive",
            (Locale::English, Rule::QuantityPositive) => "quantity must be positive",
            (Locale::English, Rule::HoursRange) => "hours must be between 0 and 24",
            (Locale::Persian, Rule::Positive) => "مقدار باید بزرگتر از صفر باشد",
            (Locale::Persian, Rule::DodMax) => "عمق تخلیه نمی‌تواند بیشتر از ۱۰۰ باشد",
            (Locale::Persian, Rule::LossMax) => "تلفات سیستم نمی‌تواند بیشتر از ۱۰۰ باشد",
            (Locale::Persian, Rule::NameRequired) => "نام وسیله الزامی است",
            (Locale::Persian, Rule::PowerPositive) => "توان باید مثبت باشد",
            (Locale::Persian, Rule::QuantityPositive) => "تعداد باید مثبت باشد",
            (Locale::Persian, Rule::HoursRange) => "ساعت باید بین ۰ و ۲۴ باشد",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Positive,
    DodMax,
    LossMax,
    NameRequired,
    PowerPositive,
    QuantityPositive,
    HoursRange,
}

/// A single violated rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: FieldRef,
    pub message: String,
}

/// Ordered field → message mapping, one entry per offending field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    entries: Vec<ValidationError>,
}

impl ValidationErrors {
    fn insert(&mut self, field: FieldRef, message: &str) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.field == field) {
            existing.message = message.to_string();
        } else {
            self.entries.push(ValidationError {
                field,
                message: message.to_string(),
            });
        }
    }

    /// Message attached to `field`, if any.
    pub fn get(&self, field: &FieldRef) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Looks up a message by its flat string key.
    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.field.key() == key)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: &FieldRef) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

/// Result of [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationErrors),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Converts into a `Result`, `Err` carrying the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        match self {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(errors) => Err(errors),
        }
    }
}

/// Validates inputs with English messages.
pub fn validate(params: &SystemParameters, appliances: &[Appliance]) -> ValidationOutcome {
    validate_with(Locale::English, params, appliances)
}

/// Validates system parameters and every appliance, collecting all violations.
///
/// An empty appliance list is accepted.
pub fn validate_with(
    locale: Locale,
    params: &SystemParameters,
    appliances: &[Appliance],
) -> ValidationOutcome {
    let mut errors = ValidationErrors::default();

    for field in SystemField::ALL {
        let value = params.get(field);
        let rule = if value.is_nan() || value <= 0.0 {
            Some(Rule::Positive)
        } else if field == SystemField::Dod && value > 100.0 {
            Some(Rule::DodMax)
        } else if field == SystemField::SystemLoss && value > 100.0 {
            Some(Rule::LossMax)
        } else {
            None
        };
        if let Some(rule) = rule {
            errors.insert(FieldRef::System(field), locale.message(rule));
        }
    }

    for app in appliances {
        if app.name.is_empty() {
            errors.insert(
                FieldRef::appliance(&app.id, ApplianceField::Name),
                locale.message(Rule::NameRequired),
            );
        }
        if app.power.is_nan() || app.power <= 0.0 {
            errors.insert(
                FieldRef::appliance(&app.id, ApplianceField::Power),
                locale.message(Rule::PowerPositive),
            );
        }
        if app.quantity <= 0 {
            errors.insert(
                FieldRef::appliance(&app.id, ApplianceField::Quantity),
                locale.message(Rule::QuantityPositive),
            );
        }
        if !(0.0..=24.0).contains(&app.hours) {
            errors.insert(
                FieldRef::appliance(&app.id, ApplianceField::Hours),
                locale.message(Rule::HoursRange),
            );
        }
    }

    if errors.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid(errors)
    }
}
