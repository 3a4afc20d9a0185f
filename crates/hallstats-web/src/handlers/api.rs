//! JSON handlers

use crate::{
    dashboard::{Dashboard, DashboardView},
    state::AppState,
};
use axum::{extract::State, response::Json};
use hallstats_core::BookingRecord;
use std::sync::Arc;

/// Every derived view of a freshly fetched dataset
///
/// A failed fetch yields all-zero KPIs and empty charts rather than an error.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let dashboard = Dashboard::load(state.source.as_ref(), state.config.aggregation).await;
    Json(dashboard.view())
}

/// The fetched dataset as parsed, empty when the fetch fails
pub async fn bookings(State(state): State<Arc<AppState>>) -> Json<Arc<[BookingRecord]>> {
    let dashboard = Dashboard::load(state.source.as_ref(), state.config.aggregation).await;
    Json(dashboard.dataset().shared())
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
