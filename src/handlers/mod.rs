//! # Page Handlers
//!
//! HTTP endpoint handlers for the agent microsite.

use axum::{extract::State, http::StatusCode};

use crate::db;
use crate::server::AppState;

pub mod directory;
pub mod leads;
pub mod profile;

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Readiness probe: succeeds only while the database answers `SELECT 1`.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match db::health_check(&state.db).await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}

#[cfg(test)]
mod tests;
