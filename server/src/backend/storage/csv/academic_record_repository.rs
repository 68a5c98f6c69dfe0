use anyhow::Result;
use async_trait::async_trait;

use super::connection::CsvConnection;
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::academic::AcademicRecord;
use crate::backend::storage::traits::AcademicRecordStorage;

const ACADEMIC_RECORDS_FILE: &str = "academic_records.csv";

/// CSV-based academic record repository
#[derive(Clone)]
pub struct AcademicRecordRepository {
    connection: CsvConnection,
}

impl AcademicRecordRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl AcademicRecordStorage for AcademicRecordRepository {
    async fn store_record(&self, record: &AcademicRecord) -> Result<()> {
        self.connection
            .update_rows::<AcademicRecord, _, _>(ACADEMIC_RECORDS_FILE, |rows| {
                if rows.iter().any(|r| r.id == record.id) {
                    return Err(DomainError::conflict(format!(
                        "Academic record {} already exists",
                        record.id
                    )));
                }
                rows.push(record.clone());
                Ok(())
            })
    }

    async fn get_record(&self, record_id: &str) -> Result<Option<AcademicRecord>> {
        let rows: Vec<AcademicRecord> = self.connection.read_rows(ACADEMIC_RECORDS_FILE)?;
        Ok(rows.into_iter().find(|r| r.id == record_id))
    }

    async fn list_records(&self) -> Result<Vec<AcademicRecord>> {
        let mut rows: Vec<AcademicRecord> = self.connection.read_rows(ACADEMIC_RECORDS_FILE)?;
        // stable sort keeps file order for records created in the same instant
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_records_for_participant(&self, participant_id: &str) -> Result<Vec<AcademicRecord>> {
        let rows: Vec<AcademicRecord> = self.connection.read_rows(ACADEMIC_RECORDS_FILE)?;
        Ok(rows
            .into_iter()
            .filter(|r| r.participant_id == participant_id)
            .collect())
    }

    async fn update_record(&self, record: &AcademicRecord) -> Result<bool> {
        self.connection
            .update_rows::<AcademicRecord, _, _>(ACADEMIC_RECORDS_FILE, |rows| {
                match rows.iter_mut().find(|r| r.id == record.id) {
                    Some(existing) => {
                        *existing = record.clone();
                        Ok(true)
                    }
                    None => Ok(false),
                }
            })
    }

    async fn delete_record(&self, record_id: &str) -> Result<bool> {
        self.connection
            .update_rows::<AcademicRecord, _, _>(ACADEMIC_RECORDS_FILE, |rows| {
                let before = rows.len();
                rows.retain(|r| r.id != record_id);
                Ok(rows.len() != before)
            })
    }

    async fn delete_records_for_participant(&self, participant_id: &str) -> Result<usize> {
        self.connection
            .update_rows::<AcademicRecord, _, _>(ACADEMIC_RECORDS_FILE, |rows| {
                let before = rows.len();
                rows.retain(|r| r.participant_id != participant_id);
                Ok(before - rows.len())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::{academic_record, TestEnvironment};
    use chrono::Duration;

    #[tokio::test]
    async fn test_list_newest_first() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AcademicRecordRepository::new(env.connection.clone());

        let older = academic_record("a1", "p1", "January");
        let mut newer = academic_record("a2", "p1", "February");
        newer.created_at = older.created_at + Duration::minutes(5);
        repo.store_record(&older).await.unwrap();
        repo.store_record(&newer).await.unwrap();

        let listed = repo.list_records().await.unwrap();
        assert_eq!(listed[0].id, "a2");
        assert_eq!(listed[1].id, "a1");
    }

    #[tokio::test]
    async fn test_optional_numbers_round_trip() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AcademicRecordRepository::new(env.connection.clone());

        let mut record = academic_record("a1", "p1", "March");
        record.avg_prayers_per_day = Some(5);
        record.nafli_fasts = None;
        record.knows_prayer_full = true;
        repo.store_record(&record).await.unwrap();

        let loaded = repo.get_record("a1").await.unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_delete_for_participant() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AcademicRecordRepository::new(env.connection.clone());

        repo.store_record(&academic_record("a1", "p1", "January")).await.unwrap();
        repo.store_record(&academic_record("a2", "p1", "February")).await.unwrap();
        repo.store_record(&academic_record("a3", "p2", "January")).await.unwrap();

        assert_eq!(repo.delete_records_for_participant("p1").await.unwrap(), 2);
        let remaining = repo.list_records().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].participant_id, "p2");
        assert!(repo.list_records_for_participant("p1").await.unwrap().is_empty());
    }
}
