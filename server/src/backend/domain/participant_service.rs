//! Participant registration and maintenance.
//!
//! ## Business Rules
//!
//! - Full name is required and at most 100 characters
//! - Mobile number is required
//! - The majlis must exist and belong to the chosen region
//! - A birth date is optional, but when given it must parse and must not
//!   lie in the future
//! - Age and category are computed on read and never accepted from callers
//! - Deleting a participant removes their academic records and contributions

use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;

use crate::backend::domain::classifier::parse_birth_date;
use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::participant::{
    ParticipantDetails, RegisterParticipantCommand, RegisterParticipantResult,
    UpdateParticipantCommand,
};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::filters::ParticipantFilter;
use crate::backend::domain::models::participant::{NewParticipant, Participant, DEFAULT_STATUS};
use crate::backend::domain::models::region::RegionDirectory;
use crate::backend::storage::{
    AcademicRecordStorage, Connection, ContributionStorage, ParticipantStorage, RegionStorage,
};

const MAX_NAME_LENGTH: usize = 100;

/// Trimmed value, or `None` for blank input
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct ParticipantService<C: Connection> {
    participant_repository: C::ParticipantRepository,
    region_repository: C::RegionRepository,
    academic_repository: C::AcademicRecordRepository,
    contribution_repository: C::ContributionRepository,
    clock: Clock,
}

impl<C: Connection> ParticipantService<C> {
    pub fn new(connection: Arc<C>, clock: Clock) -> Self {
        Self {
            participant_repository: connection.create_participant_repository(),
            region_repository: connection.create_region_repository(),
            academic_repository: connection.create_academic_record_repository(),
            contribution_repository: connection.create_contribution_repository(),
            clock,
        }
    }

    pub async fn register_participant(
        &self,
        command: RegisterParticipantCommand,
    ) -> Result<RegisterParticipantResult> {
        info!("Registering participant: {}", command.full_name);

        let full_name = self.validate_name(&command.full_name)?;
        let mobile_number = self.validate_mobile(&command.mobile_number)?;
        let birth_date = self.validate_birth_date(command.date_of_birth.as_deref())?;
        let region_id = command.region_id.trim().to_string();
        let majlis_id = command.majlis_id.trim().to_string();
        self.validate_placement(&region_id, &majlis_id).await?;

        let new_participant = NewParticipant {
            id: Participant::generate_id(),
            full_name,
            islamic_names: optional_text(command.islamic_names),
            birth_date,
            mobile_number,
            region_id,
            majlis_id,
            emergency_contact_name: optional_text(command.emergency_contact_name),
            emergency_contact_phone: optional_text(command.emergency_contact_phone),
            dietary_requirements: optional_text(command.dietary_requirements),
            medical_conditions: optional_text(command.medical_conditions),
            status: DEFAULT_STATUS.to_string(),
            created_at: self.clock.now(),
        };

        let participant = self
            .participant_repository
            .create_participant(&new_participant)
            .await?;

        info!(
            "Registered participant {} as {}",
            participant.id, participant.registration_number
        );

        Ok(RegisterParticipantResult {
            participant_id: participant.id,
            registration_number: participant.registration_number,
        })
    }

    pub async fn get_participant(&self, participant_id: &str) -> Result<ParticipantDetails> {
        let participant = self.find_participant(participant_id).await?;
        let directory = self.directory().await?;
        Ok(self.details(participant, &directory))
    }

    /// Participants matching every set criterion, ordered by name
    pub async fn list_participants(&self, filter: &ParticipantFilter) -> Result<Vec<ParticipantDetails>> {
        let today = self.clock.today();
        let participants = self.participant_repository.list_participants().await?;
        let directory = self.directory().await?;

        let result: Vec<ParticipantDetails> = participants
            .into_iter()
            .filter(|p| filter.matches(p, today))
            .map(|p| self.details(p, &directory))
            .collect();

        info!("Found {} participants", result.len());
        Ok(result)
    }

    /// Replace every editable field. Registration number, id and creation
    /// time are preserved.
    pub async fn update_participant(
        &self,
        participant_id: &str,
        command: UpdateParticipantCommand,
    ) -> Result<ParticipantDetails> {
        info!("Updating participant: {}", participant_id);

        let existing = self.find_participant(participant_id).await?;

        let full_name = self.validate_name(&command.full_name)?;
        let mobile_number = self.validate_mobile(&command.mobile_number)?;
        let birth_date = self.validate_birth_date(command.date_of_birth.as_deref())?;
        let region_id = command.region_id.trim().to_string();
        let majlis_id = command.majlis_id.trim().to_string();
        self.validate_placement(&region_id, &majlis_id).await?;
        let status = command.status.trim().to_string();
        if status.is_empty() {
            return Err(DomainError::validation("Status is required"));
        }

        let participant = Participant {
            id: existing.id,
            registration_number: existing.registration_number,
            full_name,
            islamic_names: optional_text(command.islamic_names),
            birth_date,
            mobile_number,
            region_id,
            majlis_id,
            emergency_contact_name: optional_text(command.emergency_contact_name),
            emergency_contact_phone: optional_text(command.emergency_contact_phone),
            dietary_requirements: optional_text(command.dietary_requirements),
            medical_conditions: optional_text(command.medical_conditions),
            status,
            created_at: existing.created_at,
            updated_at: self.clock.now(),
        };

        if !self.participant_repository.update_participant(&participant).await? {
            return Err(DomainError::not_found(format!("Participant {}", participant_id)));
        }

        let directory = self.directory().await?;
        Ok(self.details(participant, &directory))
    }

    /// Delete a participant together with their dependent records
    pub async fn delete_participant(&self, participant_id: &str) -> Result<()> {
        info!("Deleting participant: {}", participant_id);

        self.find_participant(participant_id).await?;

        let academics = self
            .academic_repository
            .delete_records_for_participant(participant_id)
            .await?;
        let contributions = self
            .contribution_repository
            .delete_contributions_for_participant(participant_id)
            .await?;

        if !self.participant_repository.delete_participant(participant_id).await? {
            return Err(DomainError::not_found(format!("Participant {}", participant_id)));
        }

        info!(
            "Deleted participant {} with {} academic records and {} contributions",
            participant_id, academics, contributions
        );
        Ok(())
    }

    async fn find_participant(&self, participant_id: &str) -> Result<Participant> {
        match self.participant_repository.get_participant(participant_id).await? {
            Some(participant) => Ok(participant),
            None => {
                warn!("Participant not found: {}", participant_id);
                Err(DomainError::not_found(format!("Participant {}", participant_id)))
            }
        }
    }

    async fn directory(&self) -> Result<RegionDirectory> {
        let regions = self.region_repository.list_regions().await?;
        let majlis = self.region_repository.list_majlis().await?;
        Ok(RegionDirectory::new(regions, majlis))
    }

    fn details(&self, participant: Participant, directory: &RegionDirectory) -> ParticipantDetails {
        ParticipantDetails {
            classification: participant.classify(self.clock.today()),
            region_name: directory.region_name(&participant.region_id).map(str::to_string),
            majlis_name: directory.majlis_name(&participant.majlis_id).map(str::to_string),
            participant,
        }
    }

    fn validate_name(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Full name is required"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Full name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(name.to_string())
    }

    fn validate_mobile(&self, mobile_number: &str) -> Result<String> {
        let mobile_number = mobile_number.trim();
        if mobile_number.is_empty() {
            return Err(DomainError::validation("Mobile number is required"));
        }
        Ok(mobile_number.to_string())
    }

    fn validate_birth_date(&self, value: Option<&str>) -> Result<Option<NaiveDate>> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        let birth_date = parse_birth_date(value).ok_or_else(|| {
            DomainError::validation("Date of birth must be in YYYY-MM-DD format")
        })?;
        if birth_date > self.clock.today() {
            return Err(DomainError::validation("Date of birth cannot be in the future"));
        }
        Ok(Some(birth_date))
    }

    async fn validate_placement(&self, region_id: &str, majlis_id: &str) -> Result<()> {
        if region_id.is_empty() {
            return Err(DomainError::validation("Region is required"));
        }
        if majlis_id.is_empty() {
            return Err(DomainError::validation("Majlis is required"));
        }

        let directory = self.directory().await?;
        if directory.region(region_id).is_none() {
            return Err(DomainError::validation(format!("Region {} does not exist", region_id)));
        }
        if directory.majlis(majlis_id).is_none() {
            return Err(DomainError::validation(format!("Majlis {} does not exist", majlis_id)));
        }
        if !directory.majlis_belongs_to(majlis_id, region_id) {
            return Err(DomainError::validation(
                "Majlis does not belong to the selected region",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::classifier::Category;
    use crate::backend::domain::models::region::{Majlis, Region};
    use crate::backend::storage::csv::test_utils::{academic_record, contribution, TestEnvironment};
    use crate::backend::storage::csv::CsvConnection;
    use chrono::{TimeZone, Utc};

    fn fixed_clock() -> Clock {
        Clock::Fixed(Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap())
    }

    async fn setup() -> (TestEnvironment, ParticipantService<CsvConnection>) {
        let env = TestEnvironment::new().await.unwrap();
        let regions = env.connection.create_region_repository();
        regions
            .store_region(&Region { id: "r1".into(), name: "Nairobi".into(), code: "NAI".into() })
            .await
            .unwrap();
        regions
            .store_region(&Region { id: "r2".into(), name: "Coast".into(), code: "COA".into() })
            .await
            .unwrap();
        regions
            .store_majlis(&Majlis {
                id: "m1".into(),
                region_id: "r1".into(),
                name: "Kibera".into(),
                code: "KIB".into(),
            })
            .await
            .unwrap();
        regions
            .store_majlis(&Majlis {
                id: "m2".into(),
                region_id: "r2".into(),
                name: "Mombasa".into(),
                code: "MOM".into(),
            })
            .await
            .unwrap();

        let service = ParticipantService::new(Arc::new(env.connection.clone()), fixed_clock());
        (env, service)
    }

    fn register(name: &str, birth: Option<&str>) -> RegisterParticipantCommand {
        RegisterParticipantCommand {
            full_name: name.to_string(),
            islamic_names: None,
            date_of_birth: birth.map(str::to_string),
            mobile_number: "0712345678".to_string(),
            region_id: "r1".to_string(),
            majlis_id: "m1".to_string(),
            emergency_contact_name: Some("  ".to_string()),
            emergency_contact_phone: None,
            dietary_requirements: None,
            medical_conditions: None,
        }
    }

    fn update_from(command: &RegisterParticipantCommand) -> UpdateParticipantCommand {
        UpdateParticipantCommand {
            full_name: command.full_name.clone(),
            islamic_names: command.islamic_names.clone(),
            date_of_birth: command.date_of_birth.clone(),
            mobile_number: command.mobile_number.clone(),
            region_id: command.region_id.clone(),
            majlis_id: command.majlis_id.clone(),
            emergency_contact_name: None,
            emergency_contact_phone: None,
            dietary_requirements: None,
            medical_conditions: None,
            status: DEFAULT_STATUS.to_string(),
        }
    }

    fn is_validation(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Validation(_)))
    }

    #[tokio::test]
    async fn test_register_assigns_number_and_classifies_on_read() {
        let (_env, service) = setup().await;

        let result = service
            .register_participant(register("Ahmad Ali", Some("1960-01-01")))
            .await
            .unwrap();
        assert_eq!(result.registration_number, "IJT-00001");

        let details = service.get_participant(&result.participant_id).await.unwrap();
        assert_eq!(details.classification.age, 64);
        assert_eq!(details.classification.category, Some(Category::SafAwwal));
        assert_eq!(details.region_name.as_deref(), Some("Nairobi"));
        assert_eq!(details.majlis_name.as_deref(), Some("Kibera"));
        assert_eq!(details.participant.status, DEFAULT_STATUS);
        assert_eq!(details.participant.emergency_contact_name, None);
    }

    #[tokio::test]
    async fn test_register_without_birth_date() {
        let (_env, service) = setup().await;

        let result = service.register_participant(register("Yusuf", None)).await.unwrap();
        let details = service.get_participant(&result.participant_id).await.unwrap();
        assert_eq!(details.classification.age, 0);
        assert_eq!(details.classification.category, None);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (_env, service) = setup().await;

        let err = service.register_participant(register("   ", None)).await.unwrap_err();
        assert!(is_validation(&err));

        let long_name = "x".repeat(101);
        let err = service.register_participant(register(&long_name, None)).await.unwrap_err();
        assert!(is_validation(&err));

        let mut no_mobile = register("Yusuf", None);
        no_mobile.mobile_number = " ".into();
        assert!(is_validation(&service.register_participant(no_mobile).await.unwrap_err()));

        let future = register("Yusuf", Some("2030-01-01"));
        assert!(is_validation(&service.register_participant(future).await.unwrap_err()));

        let garbage = register("Yusuf", Some("01/01/1980"));
        assert!(is_validation(&service.register_participant(garbage).await.unwrap_err()));
    }

    #[tokio::test]
    async fn test_majlis_must_belong_to_region() {
        let (_env, service) = setup().await;

        let mut command = register("Yusuf", None);
        command.majlis_id = "m2".into();
        let err = service.register_participant(command).await.unwrap_err();
        assert!(is_validation(&err));

        let mut command = register("Yusuf", None);
        command.region_id = "missing".into();
        assert!(is_validation(&service.register_participant(command).await.unwrap_err()));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let (_env, service) = setup().await;

        service.register_participant(register("Zaid Old", Some("1950-05-05"))).await.unwrap();
        service.register_participant(register("Bilal Middle", Some("1980-05-05"))).await.unwrap();
        let mut coast = register("Amir Young", Some("2000-05-05"));
        coast.region_id = "r2".into();
        coast.majlis_id = "m2".into();
        service.register_participant(coast).await.unwrap();

        let all = service.list_participants(&ParticipantFilter::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|d| d.participant.full_name.as_str()).collect();
        assert_eq!(names, vec!["Amir Young", "Bilal Middle", "Zaid Old"]);

        let saf_dom = service
            .list_participants(&ParticipantFilter {
                category: Some(Category::SafDom),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(saf_dom.len(), 1);
        assert_eq!(saf_dom[0].participant.full_name, "Bilal Middle");

        let nairobi_search = service
            .list_participants(&ParticipantFilter {
                search: Some("a".into()),
                region_id: Some("r1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(nairobi_search.len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_number() {
        let (_env, service) = setup().await;

        let command = register("Yusuf", Some("1990-02-02"));
        let created = service.register_participant(command.clone()).await.unwrap();

        let mut update = update_from(&command);
        update.full_name = "Yusuf Khan".into();
        update.region_id = "r2".into();
        update.majlis_id = "m2".into();
        update.status = "checked_in".into();
        let updated = service
            .update_participant(&created.participant_id, update)
            .await
            .unwrap();

        assert_eq!(updated.participant.registration_number, created.registration_number);
        assert_eq!(updated.participant.full_name, "Yusuf Khan");
        assert_eq!(updated.region_name.as_deref(), Some("Coast"));
        assert_eq!(updated.participant.status, "checked_in");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_env, service) = setup().await;

        let err = service
            .update_participant("missing", update_from(&register("Yusuf", None)))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let (env, service) = setup().await;

        let kept = service.register_participant(register("Kept", None)).await.unwrap();
        let removed = service.register_participant(register("Removed", None)).await.unwrap();

        let academics = env.connection.create_academic_record_repository();
        let contributions = env.connection.create_contribution_repository();
        academics
            .store_record(&academic_record("a1", &removed.participant_id, "January"))
            .await
            .unwrap();
        academics
            .store_record(&academic_record("a2", &kept.participant_id, "January"))
            .await
            .unwrap();
        contributions
            .store_contribution(&contribution("c1", &removed.participant_id, "January"))
            .await
            .unwrap();

        service.delete_participant(&removed.participant_id).await.unwrap();

        assert!(service.get_participant(&removed.participant_id).await.is_err());
        let remaining = academics.list_records().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "a2");
        assert!(contributions.list_contributions().await.unwrap().is_empty());
    }
}
