//! Web server setup

use crate::{routes::build_routes, state::AppState};
use axum::Router;
use hallstats_core::{Config, Result};
use std::sync::Arc;

/// Build the dashboard application against the configured backend
///
/// # Errors
///
/// Returns an error if the booking client cannot be built.
pub fn build_app(config: Config) -> Result<Router> {
    Ok(build_app_with_state(AppState::new(config)?))
}

/// Build the dashboard application around existing state
pub fn build_app_with_state(state: AppState) -> Router {
    build_routes().with_state(Arc::new(state))
}
