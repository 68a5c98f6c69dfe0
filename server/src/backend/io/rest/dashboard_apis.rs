//! # REST API for the Dashboard

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::backend::io::rest::error::error_response;
use crate::backend::io::rest::mappers::dashboard_mapper::DashboardMapper;
use crate::backend::AppState;

/// Headcounts, region breakdown, contribution totals and event progress
pub async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard");

    match state.dashboard_service.snapshot().await {
        Ok(snapshot) => (StatusCode::OK, Json(DashboardMapper::to_dto(snapshot))).into_response(),
        Err(e) => error_response(e, "Error loading dashboard"),
    }
}
