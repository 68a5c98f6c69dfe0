//! # REST API for Contributions

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::backend::io::rest::error::error_response;
use crate::backend::io::rest::mappers::contribution_mapper::ContributionMapper;
use crate::backend::AppState;
use shared::{ContributionListQuery, DeleteResponse, SaveContributionRequest};

pub async fn create_contribution(
    State(state): State<AppState>,
    Json(request): Json<SaveContributionRequest>,
) -> impl IntoResponse {
    info!("POST /api/contributions - request: {:?}", request);

    let command = ContributionMapper::to_command(request);
    match state.contribution_service.create_contribution(command).await {
        Ok(details) => (
            StatusCode::CREATED,
            Json(ContributionMapper::to_response(details, "Contribution saved successfully")),
        )
            .into_response(),
        Err(e) => error_response(e, "Error saving contribution"),
    }
}

/// List contributions newest first, filtered by search text and month
pub async fn list_contributions(
    State(state): State<AppState>,
    Query(query): Query<ContributionListQuery>,
) -> impl IntoResponse {
    info!("GET /api/contributions - query: {:?}", query);

    let filter = ContributionMapper::to_filter(query);
    match state.contribution_service.list_contributions(&filter).await {
        Ok(contributions) => {
            (StatusCode::OK, Json(ContributionMapper::to_list_dto(contributions))).into_response()
        }
        Err(e) => error_response(e, "Error listing contributions"),
    }
}

/// Per-fund totals over the filtered contributions
pub async fn get_contribution_summary(
    State(state): State<AppState>,
    Query(query): Query<ContributionListQuery>,
) -> impl IntoResponse {
    info!("GET /api/contributions/summary - query: {:?}", query);

    let filter = ContributionMapper::to_filter(query);
    match state.contribution_service.summary(&filter).await {
        Ok(totals) => {
            (StatusCode::OK, Json(ContributionMapper::to_summary_dto(totals))).into_response()
        }
        Err(e) => error_response(e, "Error summarizing contributions"),
    }
}

pub async fn update_contribution(
    State(state): State<AppState>,
    axum::extract::Path(contribution_id): axum::extract::Path<String>,
    Json(request): Json<SaveContributionRequest>,
) -> impl IntoResponse {
    info!("PUT /api/contributions/{} - request: {:?}", contribution_id, request);

    let command = ContributionMapper::to_command(request);
    match state
        .contribution_service
        .update_contribution(&contribution_id, command)
        .await
    {
        Ok(details) => (
            StatusCode::OK,
            Json(ContributionMapper::to_response(details, "Contribution updated successfully")),
        )
            .into_response(),
        Err(e) => error_response(e, "Error updating contribution"),
    }
}

pub async fn delete_contribution(
    State(state): State<AppState>,
    axum::extract::Path(contribution_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/contributions/{}", contribution_id);

    match state.contribution_service.delete_contribution(&contribution_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteResponse {
                success: true,
                success_message: "Contribution deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, "Error deleting contribution"),
    }
}
