//! # Storage Traits
//!
//! Storage abstractions the domain layer is written against, so the CSV
//! backend can be replaced without touching services.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::academic::AcademicRecord;
use crate::backend::domain::models::contribution::Contribution;
use crate::backend::domain::models::event_settings::EventSettings;
use crate::backend::domain::models::participant::{NewParticipant, Participant};
use crate::backend::domain::models::region::{Majlis, Region};

/// Trait defining the interface for participant storage operations
#[async_trait]
pub trait ParticipantStorage: Send + Sync {
    /// Store a new participant, assigning the next registration number.
    ///
    /// Numbering and insertion happen under one write, so two concurrent
    /// registrations never receive the same number.
    async fn create_participant(&self, participant: &NewParticipant) -> Result<Participant>;

    async fn get_participant(&self, participant_id: &str) -> Result<Option<Participant>>;

    /// List all participants ordered by full name
    async fn list_participants(&self) -> Result<Vec<Participant>>;

    /// Replace a stored participant. Returns false if it does not exist.
    async fn update_participant(&self, participant: &Participant) -> Result<bool>;

    /// Returns true if the participant was found and deleted
    async fn delete_participant(&self, participant_id: &str) -> Result<bool>;
}

/// Trait defining the interface for region and majlis storage operations.
///
/// Stores and updates fail with a conflict when another region (or another
/// majlis in the same region) already has the name, ignoring case. The check
/// runs in the same write as the change.
#[async_trait]
pub trait RegionStorage: Send + Sync {
    async fn store_region(&self, region: &Region) -> Result<()>;
    async fn get_region(&self, region_id: &str) -> Result<Option<Region>>;
    /// All regions ordered by name
    async fn list_regions(&self) -> Result<Vec<Region>>;
    async fn update_region(&self, region: &Region) -> Result<bool>;
    async fn delete_region(&self, region_id: &str) -> Result<bool>;

    async fn store_majlis(&self, majlis: &Majlis) -> Result<()>;
    async fn get_majlis(&self, majlis_id: &str) -> Result<Option<Majlis>>;
    /// All majlis ordered by name
    async fn list_majlis(&self) -> Result<Vec<Majlis>>;
    async fn update_majlis(&self, majlis: &Majlis) -> Result<bool>;
    async fn delete_majlis(&self, majlis_id: &str) -> Result<bool>;
}

/// Trait defining the interface for academic record storage operations
#[async_trait]
pub trait AcademicRecordStorage: Send + Sync {
    async fn store_record(&self, record: &AcademicRecord) -> Result<()>;
    async fn get_record(&self, record_id: &str) -> Result<Option<AcademicRecord>>;
    /// All records, newest first
    async fn list_records(&self) -> Result<Vec<AcademicRecord>>;
    /// One participant's records in insertion order
    async fn list_records_for_participant(&self, participant_id: &str) -> Result<Vec<AcademicRecord>>;
    async fn update_record(&self, record: &AcademicRecord) -> Result<bool>;
    async fn delete_record(&self, record_id: &str) -> Result<bool>;
    /// Returns the number of records removed
    async fn delete_records_for_participant(&self, participant_id: &str) -> Result<usize>;
}

/// Trait defining the interface for contribution storage operations
#[async_trait]
pub trait ContributionStorage: Send + Sync {
    async fn store_contribution(&self, contribution: &Contribution) -> Result<()>;
    async fn get_contribution(&self, contribution_id: &str) -> Result<Option<Contribution>>;
    /// All contributions, newest first
    async fn list_contributions(&self) -> Result<Vec<Contribution>>;
    async fn update_contribution(&self, contribution: &Contribution) -> Result<bool>;
    async fn delete_contribution(&self, contribution_id: &str) -> Result<bool>;
    /// Returns the number of contributions removed
    async fn delete_contributions_for_participant(&self, participant_id: &str) -> Result<usize>;
}

/// Trait defining the interface for the single event settings document
#[async_trait]
pub trait EventSettingsStorage: Send + Sync {
    async fn get_event_settings(&self) -> Result<Option<EventSettings>>;
    async fn save_event_settings(&self, settings: &EventSettings) -> Result<()>;
    /// Returns true if settings existed
    async fn delete_event_settings(&self) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// Provides factory methods for repositories so services can be generic over
/// the backend.
pub trait Connection: Send + Sync + Clone + 'static {
    type ParticipantRepository: ParticipantStorage + Clone;
    type RegionRepository: RegionStorage + Clone;
    type AcademicRecordRepository: AcademicRecordStorage + Clone;
    type ContributionRepository: ContributionStorage + Clone;
    type EventSettingsRepository: EventSettingsStorage + Clone;

    fn create_participant_repository(&self) -> Self::ParticipantRepository;
    fn create_region_repository(&self) -> Self::RegionRepository;
    fn create_academic_record_repository(&self) -> Self::AcademicRecordRepository;
    fn create_contribution_repository(&self) -> Self::ContributionRepository;
    fn create_event_settings_repository(&self) -> Self::EventSettingsRepository;
}
