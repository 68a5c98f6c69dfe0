//! # REST API for Participant Management
//!
//! Registration, lookup, editing and removal of participants, plus the
//! monthly academic view of a single participant.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::backend::io::rest::error::error_response;
use crate::backend::io::rest::mappers::academic_mapper::AcademicMapper;
use crate::backend::io::rest::mappers::participant_mapper::ParticipantMapper;
use crate::backend::AppState;
use shared::{
    DeleteResponse, ParticipantListQuery, RegisterParticipantRequest, UpdateParticipantRequest,
};

/// Names the participant and placement for request logs. Contact and
/// medical details stay out of the log.
fn log_summary(full_name: &str, region_id: &str, majlis_id: &str) -> String {
    format!(
        "name={:?} region={} majlis={}",
        full_name.trim(),
        region_id,
        majlis_id
    )
}

/// Register a new participant
pub async fn register_participant(
    State(state): State<AppState>,
    Json(request): Json<RegisterParticipantRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/participants - {}",
        log_summary(&request.full_name, &request.region_id, &request.majlis_id)
    );

    let command = ParticipantMapper::to_register_command(request);
    match state.participant_service.register_participant(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ParticipantMapper::to_register_response(result)),
        )
            .into_response(),
        Err(e) => error_response(e, "Error registering participant"),
    }
}

/// List participants, optionally filtered by search text, category and region
pub async fn list_participants(
    State(state): State<AppState>,
    Query(query): Query<ParticipantListQuery>,
) -> impl IntoResponse {
    info!("GET /api/participants - query: {:?}", query);

    let filter = ParticipantMapper::to_filter(query);
    match state.participant_service.list_participants(&filter).await {
        Ok(participants) => {
            (StatusCode::OK, Json(ParticipantMapper::to_list_dto(participants))).into_response()
        }
        Err(e) => error_response(e, "Error listing participants"),
    }
}

/// Get a participant by ID
pub async fn get_participant(
    State(state): State<AppState>,
    axum::extract::Path(participant_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("GET /api/participants/{}", participant_id);

    match state.participant_service.get_participant(&participant_id).await {
        Ok(details) => (StatusCode::OK, Json(ParticipantMapper::to_dto(details))).into_response(),
        Err(e) => error_response(e, "Error retrieving participant"),
    }
}

/// Replace a participant's editable fields
pub async fn update_participant(
    State(state): State<AppState>,
    axum::extract::Path(participant_id): axum::extract::Path<String>,
    Json(request): Json<UpdateParticipantRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/participants/{} - {}",
        participant_id,
        log_summary(&request.full_name, &request.region_id, &request.majlis_id)
    );

    let command = ParticipantMapper::to_update_command(request);
    match state
        .participant_service
        .update_participant(&participant_id, command)
        .await
    {
        Ok(details) => (
            StatusCode::OK,
            Json(ParticipantMapper::to_response(details, "Participant updated successfully")),
        )
            .into_response(),
        Err(e) => error_response(e, "Error updating participant"),
    }
}

/// Delete a participant together with their academic records and contributions
pub async fn delete_participant(
    State(state): State<AppState>,
    axum::extract::Path(participant_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/participants/{}", participant_id);

    match state.participant_service.delete_participant(&participant_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteResponse {
                success: true,
                success_message: "Participant deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, "Error deleting participant"),
    }
}

/// A participant's academic records grouped by month
pub async fn get_participant_academics(
    State(state): State<AppState>,
    axum::extract::Path(participant_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("GET /api/participants/{}/academics", participant_id);

    match state.academic_service.participant_history(&participant_id).await {
        Ok(history) => (StatusCode::OK, Json(AcademicMapper::to_history_dto(history))).into_response(),
        Err(e) => error_response(e, "Error retrieving academic history"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_summary_leaves_out_personal_details() {
        let request = RegisterParticipantRequest {
            full_name: " Ahmad Ali ".into(),
            islamic_names: None,
            date_of_birth: Some("1970-03-01".into()),
            years: None,
            mobile_number: "0712345678".into(),
            region_id: "region::1".into(),
            majlis_id: "majlis::1".into(),
            emergency_contact_name: Some("Fatima".into()),
            emergency_contact_phone: Some("0799999999".into()),
            dietary_requirements: None,
            medical_conditions: Some("Diabetes".into()),
        };

        let line = log_summary(&request.full_name, &request.region_id, &request.majlis_id);

        assert_eq!(line, "name=\"Ahmad Ali\" region=region::1 majlis=majlis::1");
        for secret in ["0712345678", "Fatima", "0799999999", "Diabetes", "1970-03-01"] {
            assert!(!line.contains(secret));
        }
    }
}
