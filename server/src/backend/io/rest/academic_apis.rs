//! # REST API for Academic Records
//!
//! Monthly academic/spiritual submissions and their aggregate statistics.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::backend::io::rest::error::error_response;
use crate::backend::io::rest::mappers::academic_mapper::AcademicMapper;
use crate::backend::AppState;
use shared::{AcademicListQuery, DeleteResponse, SaveAcademicRecordRequest};

pub async fn create_academic_record(
    State(state): State<AppState>,
    Json(request): Json<SaveAcademicRecordRequest>,
) -> impl IntoResponse {
    info!("POST /api/academics - request: {:?}", request);

    let command = AcademicMapper::to_command(request);
    match state.academic_service.create_record(command).await {
        Ok(details) => (
            StatusCode::CREATED,
            Json(AcademicMapper::to_response(details, "Academic record saved successfully")),
        )
            .into_response(),
        Err(e) => error_response(e, "Error saving academic record"),
    }
}

/// List records newest first, optionally filtered by search text
pub async fn list_academic_records(
    State(state): State<AppState>,
    Query(query): Query<AcademicListQuery>,
) -> impl IntoResponse {
    info!("GET /api/academics - query: {:?}", query);

    let filter = AcademicMapper::to_filter(query);
    match state.academic_service.list_records(&filter).await {
        Ok(records) => (StatusCode::OK, Json(AcademicMapper::to_list_dto(records))).into_response(),
        Err(e) => error_response(e, "Error listing academic records"),
    }
}

/// Flag percentages and numeric averages over the filtered records
pub async fn get_academic_statistics(
    State(state): State<AppState>,
    Query(query): Query<AcademicListQuery>,
) -> impl IntoResponse {
    info!("GET /api/academics/stats - query: {:?}", query);

    let filter = AcademicMapper::to_filter(query);
    match state.academic_service.statistics(&filter).await {
        Ok(stats) => (StatusCode::OK, Json(AcademicMapper::to_statistics_dto(stats))).into_response(),
        Err(e) => error_response(e, "Error computing academic statistics"),
    }
}

pub async fn update_academic_record(
    State(state): State<AppState>,
    axum::extract::Path(record_id): axum::extract::Path<String>,
    Json(request): Json<SaveAcademicRecordRequest>,
) -> impl IntoResponse {
    info!("PUT /api/academics/{} - request: {:?}", record_id, request);

    let command = AcademicMapper::to_command(request);
    match state.academic_service.update_record(&record_id, command).await {
        Ok(details) => (
            StatusCode::OK,
            Json(AcademicMapper::to_response(details, "Academic record updated successfully")),
        )
            .into_response(),
        Err(e) => error_response(e, "Error updating academic record"),
    }
}

pub async fn delete_academic_record(
    State(state): State<AppState>,
    axum::extract::Path(record_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/academics/{}", record_id);

    match state.academic_service.delete_record(&record_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteResponse {
                success: true,
                success_message: "Academic record deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, "Error deleting academic record"),
    }
}
