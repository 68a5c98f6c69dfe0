use crate::backend::domain::classifier::Category;
use crate::backend::domain::commands::participant::{
    ParticipantDetails, RegisterParticipantCommand, RegisterParticipantResult,
    UpdateParticipantCommand,
};
use crate::backend::domain::filters::ParticipantFilter;
use shared::{
    Participant as SharedParticipant, ParticipantCategory, ParticipantListQuery,
    ParticipantListResponse, ParticipantResponse, RegisterParticipantRequest,
    RegisterParticipantResponse, UpdateParticipantRequest,
};

/// Mapper between participant DTOs and domain commands and views.
pub struct ParticipantMapper;

impl ParticipantMapper {
    pub fn category_to_dto(category: Category) -> ParticipantCategory {
        match category {
            Category::SafAwwal => ParticipantCategory::SafAwwal,
            Category::SafDom => ParticipantCategory::SafDom,
            Category::General => ParticipantCategory::General,
        }
    }

    pub fn category_to_domain(category: ParticipantCategory) -> Category {
        match category {
            ParticipantCategory::SafAwwal => Category::SafAwwal,
            ParticipantCategory::SafDom => Category::SafDom,
            ParticipantCategory::General => Category::General,
        }
    }

    /// The client-side `years` field is dropped here; age is always derived.
    pub fn to_register_command(request: RegisterParticipantRequest) -> RegisterParticipantCommand {
        RegisterParticipantCommand {
            full_name: request.full_name,
            islamic_names: request.islamic_names,
            date_of_birth: request.date_of_birth,
            mobile_number: request.mobile_number,
            region_id: request.region_id,
            majlis_id: request.majlis_id,
            emergency_contact_name: request.emergency_contact_name,
            emergency_contact_phone: request.emergency_contact_phone,
            dietary_requirements: request.dietary_requirements,
            medical_conditions: request.medical_conditions,
        }
    }

    pub fn to_update_command(request: UpdateParticipantRequest) -> UpdateParticipantCommand {
        UpdateParticipantCommand {
            full_name: request.full_name,
            islamic_names: request.islamic_names,
            date_of_birth: request.date_of_birth,
            mobile_number: request.mobile_number,
            region_id: request.region_id,
            majlis_id: request.majlis_id,
            emergency_contact_name: request.emergency_contact_name,
            emergency_contact_phone: request.emergency_contact_phone,
            dietary_requirements: request.dietary_requirements,
            medical_conditions: request.medical_conditions,
            status: request.status,
        }
    }

    pub fn to_filter(query: ParticipantListQuery) -> ParticipantFilter {
        ParticipantFilter {
            search: query.search,
            category: query.category.map(Self::category_to_domain),
            region_id: query.region_id,
        }
    }

    pub fn to_dto(details: ParticipantDetails) -> SharedParticipant {
        let participant = details.participant;
        SharedParticipant {
            id: participant.id,
            registration_number: participant.registration_number,
            full_name: participant.full_name,
            islamic_names: participant.islamic_names,
            date_of_birth: participant.birth_date.map(|d| d.format("%Y-%m-%d").to_string()),
            age: details.classification.age,
            category: details.classification.category.map(Self::category_to_dto),
            mobile_number: participant.mobile_number,
            region_id: participant.region_id,
            region_name: details.region_name,
            majlis_id: participant.majlis_id,
            majlis_name: details.majlis_name,
            emergency_contact_name: participant.emergency_contact_name,
            emergency_contact_phone: participant.emergency_contact_phone,
            dietary_requirements: participant.dietary_requirements,
            medical_conditions: participant.medical_conditions,
            status: participant.status,
            created_at: participant.created_at.to_rfc3339(),
            updated_at: participant.updated_at.to_rfc3339(),
        }
    }

    pub fn to_list_dto(participants: Vec<ParticipantDetails>) -> ParticipantListResponse {
        ParticipantListResponse {
            participants: participants.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_register_response(result: RegisterParticipantResult) -> RegisterParticipantResponse {
        RegisterParticipantResponse {
            success: true,
            registration_number: result.registration_number,
            participant_id: result.participant_id,
        }
    }

    pub fn to_response(details: ParticipantDetails, message: &str) -> ParticipantResponse {
        ParticipantResponse {
            participant: Self::to_dto(details),
            success_message: message.to_string(),
        }
    }
}
