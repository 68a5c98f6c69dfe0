//! # REST API for Event Settings
//!
//! The configured event's name, location, start date and length.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::backend::io::rest::error::error_response;
use crate::backend::io::rest::mappers::event_settings_mapper::EventSettingsMapper;
use crate::backend::AppState;
use shared::SaveEventSettingsRequest;

/// Current settings; `settings` is null when no event is configured
pub async fn get_event_settings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings/event");

    let settings = state.event_settings_service.current();
    (StatusCode::OK, Json(EventSettingsMapper::to_response(settings, None))).into_response()
}

pub async fn save_event_settings(
    State(state): State<AppState>,
    Json(request): Json<SaveEventSettingsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings/event - request: {:?}", request);

    let command = EventSettingsMapper::to_command(request);
    match state.event_settings_service.save(command).await {
        Ok(settings) => (
            StatusCode::OK,
            Json(EventSettingsMapper::to_response(
                Some(settings),
                Some("Event settings saved successfully"),
            )),
        )
            .into_response(),
        Err(e) => error_response(e, "Error saving event settings"),
    }
}

pub async fn delete_event_settings(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/settings/event");

    match state.event_settings_service.delete().await {
        Ok(existed) => {
            let message = if existed {
                "Event settings cleared"
            } else {
                "No event settings to clear"
            };
            (StatusCode::OK, Json(EventSettingsMapper::to_response(None, Some(message)))).into_response()
        }
        Err(e) => error_response(e, "Error deleting event settings"),
    }
}
