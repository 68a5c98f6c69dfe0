//! # REST API for Report Export
//!
//! Renders participant, academic and contribution reports. A report is
//! either returned inline or written to a directory on the server.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use log::{error, info, warn};

use crate::backend::domain::commands::export::ExportKind;
use crate::backend::io::rest::error::error_response;
use crate::backend::io::rest::mappers::export_mapper::ExportMapper;
use crate::backend::AppState;
use shared::{ErrorResponse, ExportToPathRequest};

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:kind", post(export_report))
        .route("/:kind/file", post(export_report_to_path))
}

fn unknown_kind(kind: &str) -> Response {
    warn!("Unknown export kind: {}", kind);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!(
                "Unknown export kind '{}'; expected participants, academics or contributions",
                kind
            ),
        }),
    )
        .into_response()
}

/// Render a report and return its content
pub async fn export_report(
    State(state): State<AppState>,
    axum::extract::Path(kind): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("POST /api/export/{}", kind);

    let Some(export_kind) = ExportKind::parse(&kind) else {
        return unknown_kind(&kind);
    };

    match state.export_service.export(export_kind).await {
        Ok(rendered) => (StatusCode::OK, Json(ExportMapper::to_data_dto(rendered))).into_response(),
        Err(e) => error_response(e, "Failed to export report"),
    }
}

/// Render a report and write it to the requested directory, or to the
/// exports directory when none is given
pub async fn export_report_to_path(
    State(state): State<AppState>,
    axum::extract::Path(kind): axum::extract::Path<String>,
    Json(request): Json<ExportToPathRequest>,
) -> impl IntoResponse {
    info!("POST /api/export/{}/file - custom_path: {:?}", kind, request.custom_path);

    let Some(export_kind) = ExportKind::parse(&kind) else {
        return unknown_kind(&kind);
    };

    match state
        .export_service
        .export_to_path(export_kind, request.custom_path)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(ExportMapper::to_path_dto(result))).into_response(),
        Err(e) => {
            error!("Failed to export {} to path: {:#}", export_kind, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ExportMapper::to_failed_path_dto(format!(
                    "Failed to export to path: {}",
                    e
                ))),
            )
                .into_response()
        }
    }
}
