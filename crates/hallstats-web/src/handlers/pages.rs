//! Page handlers

use crate::{dashboard::Dashboard, render::render_page, state::AppState};
use axum::{extract::State, http::StatusCode, response::Html};
use std::sync::Arc;
use tracing::error;

/// Dashboard page; fetches the dataset once for this page view
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, StatusCode> {
    let dashboard = Dashboard::load(state.source.as_ref(), state.config.aggregation).await;

    render_page(&dashboard.view()).map(Html).map_err(|e| {
        error!("Failed to render dashboard page: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
