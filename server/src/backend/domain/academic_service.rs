//! Monthly academic/spiritual records and their aggregation.

use anyhow::Result;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::domain::academic_report::{
    flag_statistics, group_by_month, latest_record, numeric_statistics,
};
use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::academic::{
    AcademicRecordDetails, AcademicStatisticsResult, ParticipantAcademicHistory,
    SaveAcademicRecordCommand,
};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::filters::AcademicFilter;
use crate::backend::domain::models::academic::{AcademicRecord, ReportMonth};
use crate::backend::domain::models::participant::Participant;
use crate::backend::storage::{AcademicRecordStorage, Connection, ParticipantStorage};

fn check_range(value: Option<u8>, max: u8, label: &str) -> Result<()> {
    match value {
        Some(v) if v > max => Err(DomainError::validation(format!(
            "{} must be between 0 and {}",
            label, max
        ))),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct AcademicService<C: Connection> {
    academic_repository: C::AcademicRecordRepository,
    participant_repository: C::ParticipantRepository,
    clock: Clock,
}

impl<C: Connection> AcademicService<C> {
    pub fn new(connection: Arc<C>, clock: Clock) -> Self {
        Self {
            academic_repository: connection.create_academic_record_repository(),
            participant_repository: connection.create_participant_repository(),
            clock,
        }
    }

    pub async fn create_record(&self, command: SaveAcademicRecordCommand) -> Result<AcademicRecordDetails> {
        info!(
            "Creating academic record for {} ({})",
            command.participant_id, command.report_month
        );

        let (participant, month) = self.validate(&command).await?;
        let record = AcademicRecord {
            id: AcademicRecord::generate_id(),
            participant_id: participant.id.clone(),
            report_month: month.name().to_string(),
            knows_prayer_full: command.knows_prayer_full,
            knows_prayer_meaning: command.knows_prayer_meaning,
            can_read_quran: command.can_read_quran,
            owns_bicycle: command.owns_bicycle,
            avg_prayers_per_day: command.avg_prayers_per_day,
            days_tilawat_done: command.days_tilawat_done,
            friday_prayers_attended: command.friday_prayers_attended,
            huzur_sermons_listened: command.huzur_sermons_listened,
            nafli_fasts: command.nafli_fasts,
            created_at: self.clock.now(),
        };
        self.academic_repository.store_record(&record).await?;

        info!("Created academic record {}", record.id);
        Ok(Self::details(record, Some(&participant)))
    }

    /// Replace a record's answers. The creation time is kept.
    pub async fn update_record(
        &self,
        record_id: &str,
        command: SaveAcademicRecordCommand,
    ) -> Result<AcademicRecordDetails> {
        info!("Updating academic record {}", record_id);

        let existing = self
            .academic_repository
            .get_record(record_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Academic record {}", record_id)))?;
        let (participant, month) = self.validate(&command).await?;

        let record = AcademicRecord {
            id: existing.id,
            participant_id: participant.id.clone(),
            report_month: month.name().to_string(),
            knows_prayer_full: command.knows_prayer_full,
            knows_prayer_meaning: command.knows_prayer_meaning,
            can_read_quran: command.can_read_quran,
            owns_bicycle: command.owns_bicycle,
            avg_prayers_per_day: command.avg_prayers_per_day,
            days_tilawat_done: command.days_tilawat_done,
            friday_prayers_attended: command.friday_prayers_attended,
            huzur_sermons_listened: command.huzur_sermons_listened,
            nafli_fasts: command.nafli_fasts,
            created_at: existing.created_at,
        };

        if !self.academic_repository.update_record(&record).await? {
            return Err(DomainError::not_found(format!("Academic record {}", record_id)));
        }
        Ok(Self::details(record, Some(&participant)))
    }

    pub async fn delete_record(&self, record_id: &str) -> Result<()> {
        if !self.academic_repository.delete_record(record_id).await? {
            return Err(DomainError::not_found(format!("Academic record {}", record_id)));
        }
        info!("Deleted academic record {}", record_id);
        Ok(())
    }

    /// All records newest first, joined with their participant
    pub async fn list_records(&self, filter: &AcademicFilter) -> Result<Vec<AcademicRecordDetails>> {
        let records = self.academic_repository.list_records().await?;
        let participants = self.participant_index().await?;

        let result: Vec<AcademicRecordDetails> = records
            .into_iter()
            .filter(|r| filter.matches(r, participants.get(&r.participant_id)))
            .map(|r| {
                let participant = participants.get(&r.participant_id);
                Self::details(r, participant)
            })
            .collect();

        info!("Found {} academic records", result.len());
        Ok(result)
    }

    /// Flag percentages and numeric averages over the filtered records
    pub async fn statistics(&self, filter: &AcademicFilter) -> Result<AcademicStatisticsResult> {
        let records: Vec<AcademicRecord> = self
            .list_records(filter)
            .await?
            .into_iter()
            .map(|details| details.record)
            .collect();
        Ok(AcademicStatisticsResult {
            total_responses: records.len(),
            flags: flag_statistics(&records),
            numeric_fields: numeric_statistics(&records),
        })
    }

    /// A participant's records grouped by month plus the latest submission
    pub async fn participant_history(&self, participant_id: &str) -> Result<ParticipantAcademicHistory> {
        let participant = self
            .participant_repository
            .get_participant(participant_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Participant {}", participant_id)))?;

        let records = self
            .academic_repository
            .list_records_for_participant(participant_id)
            .await?;

        Ok(ParticipantAcademicHistory {
            months: group_by_month(&records, participant_id),
            latest: latest_record(&records, participant_id).cloned(),
            participant,
        })
    }

    async fn validate(&self, command: &SaveAcademicRecordCommand) -> Result<(Participant, ReportMonth)> {
        let participant_id = command.participant_id.trim();
        if participant_id.is_empty() {
            return Err(DomainError::validation("Participant is required"));
        }
        let participant = self
            .participant_repository
            .get_participant(participant_id)
            .await?
            .ok_or_else(|| {
                DomainError::validation(format!("Participant {} does not exist", participant_id))
            })?;

        let month = ReportMonth::parse(&command.report_month).ok_or_else(|| {
            DomainError::validation(format!(
                "'{}' is not a month name",
                command.report_month.trim()
            ))
        })?;

        check_range(command.avg_prayers_per_day, 5, "Average prayers per day")?;
        check_range(command.days_tilawat_done, 31, "Days of tilawat")?;
        check_range(command.friday_prayers_attended, 5, "Friday prayers attended")?;
        check_range(command.huzur_sermons_listened, 5, "Sermons listened")?;

        Ok((participant, month))
    }

    async fn participant_index(&self) -> Result<HashMap<String, Participant>> {
        let participants = self.participant_repository.list_participants().await?;
        Ok(participants.into_iter().map(|p| (p.id.clone(), p)).collect())
    }

    fn details(record: AcademicRecord, participant: Option<&Participant>) -> AcademicRecordDetails {
        AcademicRecordDetails {
            record,
            participant_name: participant.map(|p| p.full_name.clone()),
            registration_number: participant.map(|p| p.registration_number.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::{new_participant, TestEnvironment};
    use crate::backend::storage::csv::CsvConnection;
    use chrono::{Duration, TimeZone, Utc};

    async fn setup() -> (TestEnvironment, Participant) {
        let env = TestEnvironment::new().await.unwrap();
        let participant = env
            .connection
            .create_participant_repository()
            .create_participant(&new_participant("Ahmad Ali"))
            .await
            .unwrap();
        (env, participant)
    }

    fn service_at(env: &TestEnvironment, minute: i64) -> AcademicService<CsvConnection> {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        AcademicService::new(
            Arc::new(env.connection.clone()),
            Clock::Fixed(base + Duration::minutes(minute)),
        )
    }

    fn command(participant_id: &str, month: &str) -> SaveAcademicRecordCommand {
        SaveAcademicRecordCommand {
            participant_id: participant_id.to_string(),
            report_month: month.to_string(),
            knows_prayer_full: true,
            knows_prayer_meaning: false,
            can_read_quran: true,
            owns_bicycle: false,
            avg_prayers_per_day: Some(5),
            days_tilawat_done: Some(20),
            friday_prayers_attended: Some(4),
            huzur_sermons_listened: None,
            nafli_fasts: Some(2),
        }
    }

    fn is_validation(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Validation(_)))
    }

    #[tokio::test]
    async fn test_create_canonicalizes_month() {
        let (env, participant) = setup().await;
        let service = service_at(&env, 0);

        let created = service.create_record(command(&participant.id, "march")).await.unwrap();
        assert_eq!(created.record.report_month, "March");
        assert_eq!(created.participant_name.as_deref(), Some("Ahmad Ali"));
        assert_eq!(created.registration_number.as_deref(), Some("IJT-00001"));
    }

    #[tokio::test]
    async fn test_validation_rules() {
        let (env, participant) = setup().await;
        let service = service_at(&env, 0);

        let err = service.create_record(command(&participant.id, "Marchy")).await.unwrap_err();
        assert!(is_validation(&err));

        let err = service.create_record(command("missing", "March")).await.unwrap_err();
        assert!(is_validation(&err));

        let mut too_many = command(&participant.id, "March");
        too_many.avg_prayers_per_day = Some(6);
        assert!(is_validation(&service.create_record(too_many).await.unwrap_err()));

        let mut tilawat = command(&participant.id, "March");
        tilawat.days_tilawat_done = Some(32);
        assert!(is_validation(&service.create_record(tilawat).await.unwrap_err()));

        let mut edge = command(&participant.id, "March");
        edge.days_tilawat_done = Some(31);
        edge.huzur_sermons_listened = Some(5);
        assert!(service.create_record(edge).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let (env, participant) = setup().await;

        let created = service_at(&env, 0)
            .create_record(command(&participant.id, "March"))
            .await
            .unwrap();

        let mut change = command(&participant.id, "April");
        change.owns_bicycle = true;
        let updated = service_at(&env, 30)
            .update_record(&created.record.id, change)
            .await
            .unwrap();

        assert_eq!(updated.record.created_at, created.record.created_at);
        assert_eq!(updated.record.report_month, "April");
        assert!(updated.record.owns_bicycle);
    }

    #[tokio::test]
    async fn test_statistics() {
        let (env, participant) = setup().await;

        let mut no_flags = command(&participant.id, "January");
        no_flags.knows_prayer_full = false;
        no_flags.avg_prayers_per_day = None;
        service_at(&env, 0).create_record(no_flags).await.unwrap();
        service_at(&env, 1).create_record(command(&participant.id, "February")).await.unwrap();
        service_at(&env, 2).create_record(command(&participant.id, "March")).await.unwrap();

        let stats = service_at(&env, 3)
            .statistics(&AcademicFilter::default())
            .await
            .unwrap();
        assert_eq!(stats.total_responses, 3);
        assert_eq!(stats.flags[0].true_count, 2);
        assert_eq!(stats.flags[0].percentage, 67);
        assert_eq!(stats.numeric_fields[0].reported_count, 2);
        assert_eq!(stats.numeric_fields[0].average, Some(5.0));
    }

    #[tokio::test]
    async fn test_participant_history_groups_months() {
        let (env, participant) = setup().await;

        service_at(&env, 0).create_record(command(&participant.id, "March")).await.unwrap();
        service_at(&env, 1).create_record(command(&participant.id, "January")).await.unwrap();
        let last = service_at(&env, 2)
            .create_record(command(&participant.id, "March"))
            .await
            .unwrap();

        let history = service_at(&env, 3)
            .participant_history(&participant.id)
            .await
            .unwrap();
        let months: Vec<&str> = history.months.iter().map(|g| g.month.as_str()).collect();
        assert_eq!(months, vec!["January", "March"]);
        assert_eq!(history.months[1].records.len(), 2);
        assert_eq!(history.latest.map(|r| r.id), Some(last.record.id));
    }

    #[tokio::test]
    async fn test_list_search_and_delete() {
        let (env, participant) = setup().await;
        let service = service_at(&env, 0);

        let created = service.create_record(command(&participant.id, "May")).await.unwrap();

        let hit = service
            .list_records(&AcademicFilter { search: Some("ahmad".into()) })
            .await
            .unwrap();
        assert_eq!(hit.len(), 1);
        let miss = service
            .list_records(&AcademicFilter { search: Some("zaid".into()) })
            .await
            .unwrap();
        assert!(miss.is_empty());

        service.delete_record(&created.record.id).await.unwrap();
        assert!(service.delete_record(&created.record.id).await.is_err());
    }
}
