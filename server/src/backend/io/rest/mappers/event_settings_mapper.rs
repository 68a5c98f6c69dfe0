use crate::backend::domain::commands::event_settings::SaveEventSettingsCommand;
use crate::backend::domain::models::event_settings::EventSettings;
use shared::{EventSettings as SharedEventSettings, EventSettingsResponse, SaveEventSettingsRequest};

pub struct EventSettingsMapper;

impl EventSettingsMapper {
    pub fn to_command(request: SaveEventSettingsRequest) -> SaveEventSettingsCommand {
        SaveEventSettingsCommand {
            event_name: request.event_name,
            event_location: request.event_location,
            event_start_date: request.event_start_date,
            total_days: request.total_days,
        }
    }

    pub fn to_dto(settings: EventSettings) -> SharedEventSettings {
        SharedEventSettings {
            event_name: settings.event_name,
            event_location: settings.event_location,
            event_start_date: settings.event_start_date.format("%Y-%m-%d").to_string(),
            total_days: settings.total_days,
            created_at: settings.created_at.to_rfc3339(),
            updated_at: settings.updated_at.to_rfc3339(),
        }
    }

    pub fn to_response(settings: Option<EventSettings>, message: Option<&str>) -> EventSettingsResponse {
        EventSettingsResponse {
            settings: settings.map(Self::to_dto),
            success_message: message.map(str::to_string),
        }
    }
}
