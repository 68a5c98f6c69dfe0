//! Conversions between the `shared` DTOs and domain types.

pub mod academic_mapper;
pub mod contribution_mapper;
pub mod dashboard_mapper;
pub mod event_settings_mapper;
pub mod export_mapper;
pub mod participant_mapper;
pub mod region_mapper;
