//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, info};

use super::AppState;
use super::types::{CalculateRequest, ErrorResponse, ScenarioResponse, ValidationResponse};
use crate::config::Scenario;
use crate::sizing::size_system;

/// `GET /defaults` → 200 + `ScenarioResponse` JSON
pub async fn get_defaults(State(state): State<Arc<AppState>>) -> Json<ScenarioResponse> {
    Json(ScenarioResponse::from(&state.defaults))
}

/// `GET /presets` → 200 + array of preset names
pub async fn list_presets() -> Json<Vec<&'static str>> {
    Json(Scenario::PRESETS.to_vec())
}

/// `GET /presets/{name}` → 200 + `ScenarioResponse`, or 404 for an unknown name
pub async fn get_preset(Path(name): Path<String>) -> impl IntoResponse {
    match Scenario::from_preset(&name) {
        Ok(scenario) => Ok(Json(ScenarioResponse::from(&scenario))),
        Err(e) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// Validates the submitted snapshot and sizes the system.
///
/// `POST /calculate` → 200 + `SizingResult` JSON
/// `POST /calculate` with invalid inputs → 422 + `ValidationResponse`
/// `POST /calculate` with an unreadable body → 400/415/422 + `ErrorResponse`
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            debug!(%rejection, "calculate body rejected");
            return (
                rejection.status(),
                Json(ErrorResponse {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };
    let locale = req.locale.unwrap_or(state.locale);
    match size_system(locale, &req.system, &req.appliances) {
        Ok(result) => {
            info!(
                appliances = req.appliances.len(),
                panels = result.required_panel_count,
                "calculate request served"
            );
            Json(result).into_response()
        }
        Err(errors) => {
            debug!(errors = errors.len(), "calculate request rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationResponse::from(&errors)),
            )
                .into_response()
        }
    }
}
