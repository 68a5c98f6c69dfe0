//! CSV file backend: one file per entity kind in the data directory.

pub mod academic_record_repository;
pub mod connection;
pub mod contribution_repository;
pub mod event_settings_repository;
pub mod participant_repository;
pub mod region_repository;

#[cfg(test)]
pub mod test_utils;

pub use academic_record_repository::AcademicRecordRepository;
pub use connection::CsvConnection;
pub use contribution_repository::ContributionRepository;
pub use event_settings_repository::EventSettingsRepository;
pub use participant_repository::ParticipantRepository;
pub use region_repository::RegionRepository;
