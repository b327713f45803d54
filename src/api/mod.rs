//! REST API for sizing requests.
//!
//! Provides:
//! - `GET /defaults` - the default scenario shown on first load
//! - `GET /presets` - names of the built-in scenarios
//! - `GET /presets/{name}` - one built-in scenario
//! - `POST /calculate` - validate and size a submitted scenario

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::config::Scenario;
use crate::validate::Locale;

pub use types::{CalculateRequest, ErrorEntry, ScenarioResponse, ValidationResponse};

/// Read-only state shared across all request handlers.
///
/// Every request carries its own input snapshot; nothing here is mutated
/// after startup, so no locks are needed.
pub struct AppState {
    /// Scenario returned by `GET /defaults`.
    pub defaults: Scenario,
    /// Message language when a request does not name one.
    pub locale: Locale,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/defaults", get(handlers::get_defaults))
        .route("/presets", get(handlers::list_presets))
        .route("/presets/{name}", get(handlers::get_preset))
        .route("/calculate", post(handlers::calculate))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
