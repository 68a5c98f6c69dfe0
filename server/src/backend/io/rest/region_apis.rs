//! # REST API for Regions and Majlis

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::backend::io::rest::error::error_response;
use crate::backend::io::rest::mappers::region_mapper::RegionMapper;
use crate::backend::AppState;
use shared::{CreateMajlisRequest, DeleteResponse, SaveRegionRequest, UpdateMajlisRequest};

fn deleted(message: &str) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(DeleteResponse {
            success: true,
            success_message: message.to_string(),
        }),
    )
        .into_response()
}

/// List regions joined with their majlis
pub async fn list_regions(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/regions");

    match state.region_service.list_regions().await {
        Ok(regions) => (StatusCode::OK, Json(RegionMapper::to_list_dto(regions))).into_response(),
        Err(e) => error_response(e, "Error listing regions"),
    }
}

pub async fn create_region(
    State(state): State<AppState>,
    Json(request): Json<SaveRegionRequest>,
) -> impl IntoResponse {
    info!("POST /api/regions - request: {:?}", request);

    let command = RegionMapper::to_save_region_command(request);
    match state.region_service.create_region(command).await {
        Ok(region) => {
            (StatusCode::CREATED, Json(RegionMapper::to_region_response(region))).into_response()
        }
        Err(e) => error_response(e, "Error creating region"),
    }
}

pub async fn update_region(
    State(state): State<AppState>,
    axum::extract::Path(region_id): axum::extract::Path<String>,
    Json(request): Json<SaveRegionRequest>,
) -> impl IntoResponse {
    info!("PUT /api/regions/{} - request: {:?}", region_id, request);

    let command = RegionMapper::to_save_region_command(request);
    match state.region_service.update_region(&region_id, command).await {
        Ok(region) => (StatusCode::OK, Json(RegionMapper::to_region_response(region))).into_response(),
        Err(e) => error_response(e, "Error updating region"),
    }
}

pub async fn delete_region(
    State(state): State<AppState>,
    axum::extract::Path(region_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/regions/{}", region_id);

    match state.region_service.delete_region(&region_id).await {
        Ok(()) => deleted("Region deleted successfully"),
        Err(e) => error_response(e, "Error deleting region"),
    }
}

pub async fn create_majlis(
    State(state): State<AppState>,
    Json(request): Json<CreateMajlisRequest>,
) -> impl IntoResponse {
    info!("POST /api/majlis - request: {:?}", request);

    let command = RegionMapper::to_create_majlis_command(request);
    match state.region_service.create_majlis(command).await {
        Ok(majlis) => {
            (StatusCode::CREATED, Json(RegionMapper::to_majlis_response(majlis))).into_response()
        }
        Err(e) => error_response(e, "Error creating majlis"),
    }
}

pub async fn update_majlis(
    State(state): State<AppState>,
    axum::extract::Path(majlis_id): axum::extract::Path<String>,
    Json(request): Json<UpdateMajlisRequest>,
) -> impl IntoResponse {
    info!("PUT /api/majlis/{} - request: {:?}", majlis_id, request);

    let command = RegionMapper::to_update_majlis_command(request);
    match state.region_service.update_majlis(&majlis_id, command).await {
        Ok(majlis) => (StatusCode::OK, Json(RegionMapper::to_majlis_response(majlis))).into_response(),
        Err(e) => error_response(e, "Error updating majlis"),
    }
}

pub async fn delete_majlis(
    State(state): State<AppState>,
    axum::extract::Path(majlis_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/majlis/{}", majlis_id);

    match state.region_service.delete_majlis(&majlis_id).await {
        Ok(()) => deleted("Majlis deleted successfully"),
        Err(e) => error_response(e, "Error deleting majlis"),
    }
}
