//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::config::Scenario;
use crate::model::{Appliance, SystemParameters};
use crate::validate::{Locale, ValidationErrors};

/// Body of `POST /calculate`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculateRequest {
    #[serde(default)]
    pub system: SystemParameters,
    #[serde(default)]
    pub appliances: Vec<Appliance>,
    /// Message language; the server default applies when absent.
    #[serde(default)]
    pub locale: Option<Locale>,
}

/// A scenario as exposed over JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScenarioResponse {
    pub system: SystemParameters,
    pub appliances: Vec<Appliance>,
}

impl From<&Scenario> for ScenarioResponse {
    fn from(s: &Scenario) -> Self {
        Self {
            system: s.system.clone(),
            appliances: s.appliances.clone(),
        }
    }
}

/// One validation failure, keyed the way form layers bind errors.
#[derive(Debug, Serialize)]
pub struct ErrorEntry {
    /// Flat field key, e.g. `"dod"` or `"app_hours_<id>"`.
    pub field: String,
    pub message: String,
}

/// 422 body listing every violated rule.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub errors: Vec<ErrorEntry>,
}

impl From<&ValidationErrors> for ValidationResponse {
    fn from(errors: &ValidationErrors) -> Self {
        Self {
            errors: errors
                .iter()
                .map(|e| ErrorEntry {
                    field: e.field.key(),
                    message: e.message.clone(),
                })
                .collect(),
        }
    }
}

/// Error body for non-validation failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
