//! Test utilities with RAII cleanup.
//!
//! Every test gets its own temporary data directory, removed when the
//! [`TestEnvironment`] is dropped, even if the test panics.

use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::CsvConnection;
use crate::backend::domain::models::academic::AcademicRecord;
use crate::backend::domain::models::contribution::Contribution;
use crate::backend::domain::models::event_settings::EventSettings;
use crate::backend::domain::models::participant::{NewParticipant, Participant, DEFAULT_STATUS};

pub struct TestEnvironment {
    /// Kept alive until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("IJTEMA_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}

pub fn new_participant(full_name: &str) -> NewParticipant {
    NewParticipant {
        id: Participant::generate_id(),
        full_name: full_name.to_string(),
        islamic_names: None,
        birth_date: NaiveDate::from_ymd_opt(1975, 4, 20),
        mobile_number: "0712345678".to_string(),
        region_id: "r1".to_string(),
        majlis_id: "m1".to_string(),
        emergency_contact_name: None,
        emergency_contact_phone: None,
        dietary_requirements: None,
        medical_conditions: None,
        status: DEFAULT_STATUS.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
    }
}

pub fn academic_record(id: &str, participant_id: &str, month: &str) -> AcademicRecord {
    AcademicRecord {
        id: id.to_string(),
        participant_id: participant_id.to_string(),
        report_month: month.to_string(),
        knows_prayer_full: false,
        knows_prayer_meaning: false,
        can_read_quran: false,
        owns_bicycle: false,
        avg_prayers_per_day: None,
        days_tilawat_done: None,
        friday_prayers_attended: None,
        huzur_sermons_listened: None,
        nafli_fasts: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    }
}

pub fn contribution(id: &str, participant_id: &str, month: &str) -> Contribution {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    Contribution {
        id: id.to_string(),
        participant_id: participant_id.to_string(),
        month: month.to_string(),
        chanda_majlis: None,
        chanda_ijtema: None,
        tehrik_e_jadid: None,
        waqf_e_jadid: None,
        publication: None,
        khidmat_e_khalq: None,
        ansar_project: None,
        created_at,
        updated_at: created_at,
    }
}

pub fn event_settings(event_name: &str) -> EventSettings {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    EventSettings {
        event_name: event_name.to_string(),
        event_location: "Nairobi".to_string(),
        event_start_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        total_days: 3,
        created_at,
        updated_at: created_at,
    }
}
