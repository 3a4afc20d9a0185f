//! Route definitions

use crate::{
    handlers::{api, pages},
    state::AppState,
};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Build the application router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Page routes
        .route("/", get(pages::dashboard))
        // JSON routes
        .route("/api/dashboard", get(api::dashboard))
        .route("/api/bookings", get(api::bookings))
        // Health check
        .route("/health", get(api::health_check))
}
