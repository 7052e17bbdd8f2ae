//! Administrative handlers

use axum::{extract::State, http::StatusCode};
use tracing::info;

use crate::AppState;

/// Drops every cached province and ward lookup
pub async fn invalidate_regions(State(state): State<AppState>) -> StatusCode {
    state.regions.invalidate();
    info!("region cache invalidated on request");
    StatusCode::NO_CONTENT
}
