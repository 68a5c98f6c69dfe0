//! Domain-level command and query types.
//!
//! Services take and return these. The REST layer maps the public DTOs in
//! the `shared` crate to and from them.

pub mod participant {
    use crate::backend::domain::classifier::Classification;
    use crate::backend::domain::models::participant::Participant;

    /// Input for registering a participant. Age is never accepted from the
    /// caller; it is derived from `date_of_birth`.
    #[derive(Debug, Clone)]
    pub struct RegisterParticipantCommand {
        pub full_name: String,
        pub islamic_names: Option<String>,
        pub date_of_birth: Option<String>,
        pub mobile_number: String,
        pub region_id: String,
        pub majlis_id: String,
        pub emergency_contact_name: Option<String>,
        pub emergency_contact_phone: Option<String>,
        pub dietary_requirements: Option<String>,
        pub medical_conditions: Option<String>,
    }

    /// Full replacement of a participant's editable fields
    #[derive(Debug, Clone)]
    pub struct UpdateParticipantCommand {
        pub full_name: String,
        pub islamic_names: Option<String>,
        pub date_of_birth: Option<String>,
        pub mobile_number: String,
        pub region_id: String,
        pub majlis_id: String,
        pub emergency_contact_name: Option<String>,
        pub emergency_contact_phone: Option<String>,
        pub dietary_requirements: Option<String>,
        pub medical_conditions: Option<String>,
        pub status: String,
    }

    #[derive(Debug, Clone)]
    pub struct RegisterParticipantResult {
        pub participant_id: String,
        pub registration_number: String,
    }

    /// A participant with its derived fields resolved for display
    #[derive(Debug, Clone)]
    pub struct ParticipantDetails {
        pub participant: Participant,
        pub classification: Classification,
        pub region_name: Option<String>,
        pub majlis_name: Option<String>,
    }
}

pub mod region {
    #[derive(Debug, Clone)]
    pub struct SaveRegionCommand {
        pub name: String,
        pub code: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateMajlisCommand {
        pub name: String,
        pub region_id: String,
        pub code: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateMajlisCommand {
        pub name: String,
        pub code: Option<String>,
    }
}

pub mod academic {
    use crate::backend::domain::academic_report::{FlagStatistic, MonthGroup, NumericStatistic};
    use crate::backend::domain::models::academic::AcademicRecord;
    use crate::backend::domain::models::participant::Participant;

    #[derive(Debug, Clone)]
    pub struct SaveAcademicRecordCommand {
        pub participant_id: String,
        pub report_month: String,
        pub knows_prayer_full: bool,
        pub knows_prayer_meaning: bool,
        pub can_read_quran: bool,
        pub owns_bicycle: bool,
        pub avg_prayers_per_day: Option<u8>,
        pub days_tilawat_done: Option<u8>,
        pub friday_prayers_attended: Option<u8>,
        pub huzur_sermons_listened: Option<u8>,
        pub nafli_fasts: Option<u32>,
    }

    /// A record joined with its participant, when the participant still exists
    #[derive(Debug, Clone)]
    pub struct AcademicRecordDetails {
        pub record: AcademicRecord,
        pub participant_name: Option<String>,
        pub registration_number: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct AcademicStatisticsResult {
        pub total_responses: usize,
        pub flags: Vec<FlagStatistic>,
        pub numeric_fields: Vec<NumericStatistic>,
    }

    #[derive(Debug, Clone)]
    pub struct ParticipantAcademicHistory {
        pub participant: Participant,
        pub months: Vec<MonthGroup>,
        pub latest: Option<AcademicRecord>,
    }
}

pub mod contribution {
    use crate::backend::domain::models::contribution::Contribution;

    #[derive(Debug, Clone)]
    pub struct SaveContributionCommand {
        pub participant_id: String,
        pub month: String,
        pub chanda_majlis: Option<f64>,
        pub chanda_ijtema: Option<f64>,
        pub tehrik_e_jadid: Option<f64>,
        pub waqf_e_jadid: Option<f64>,
        pub publication: Option<f64>,
        pub khidmat_e_khalq: Option<f64>,
        pub ansar_project: Option<f64>,
    }

    #[derive(Debug, Clone)]
    pub struct ContributionDetails {
        pub contribution: Contribution,
        pub participant_name: Option<String>,
    }
}

pub mod event_settings {
    #[derive(Debug, Clone)]
    pub struct SaveEventSettingsCommand {
        pub event_name: String,
        pub event_location: String,
        pub event_start_date: String,
        pub total_days: u32,
    }
}

pub mod dashboard {
    use crate::backend::domain::contribution_totals::ContributionTotals;
    use crate::backend::domain::event_progress::Progress;

    #[derive(Debug, Clone)]
    pub struct ParticipantCounts {
        pub total: usize,
        pub saf_awwal: usize,
        pub saf_dom: usize,
        pub general: usize,
        pub total_regions: usize,
    }

    #[derive(Debug, Clone)]
    pub struct DashboardSnapshot {
        pub participants: ParticipantCounts,
        /// Region name and participant count, largest first
        pub regions: Vec<(String, usize)>,
        pub contributions: ContributionTotals,
        pub progress: Progress,
    }
}

pub mod export {
    use std::fmt;

    /// Which data set a document is built from
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ExportKind {
        Participants,
        Academics,
        Contributions,
    }

    impl ExportKind {
        pub fn parse(value: &str) -> Option<ExportKind> {
            match value.trim().to_lowercase().as_str() {
                "participants" => Some(ExportKind::Participants),
                "academics" => Some(ExportKind::Academics),
                "contributions" => Some(ExportKind::Contributions),
                _ => None,
            }
        }

        pub fn title(&self) -> &'static str {
            match self {
                ExportKind::Participants => "Participants Report",
                ExportKind::Academics => "Academic Data Report",
                ExportKind::Contributions => "Contributions Report",
            }
        }

        pub fn slug(&self) -> &'static str {
            match self {
                ExportKind::Participants => "participants",
                ExportKind::Academics => "academics",
                ExportKind::Contributions => "contributions",
            }
        }
    }

    impl fmt::Display for ExportKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.slug())
        }
    }

    /// Tabular report, independent of the output format
    #[derive(Debug, Clone, PartialEq)]
    pub struct ExportDocument {
        pub kind: ExportKind,
        pub title: String,
        pub event_name: String,
        /// `YYYY-MM-DD`
        pub generated_on: String,
        pub summary_lines: Vec<String>,
        pub headers: Vec<String>,
        pub rows: Vec<Vec<String>>,
    }

    /// Rendered document ready to be returned or written out
    #[derive(Debug, Clone)]
    pub struct RenderedExport {
        pub title: String,
        pub filename: String,
        pub content: String,
        pub row_count: usize,
    }

    #[derive(Debug, Clone)]
    pub struct ExportToPathResult {
        pub file_path: String,
        pub row_count: usize,
    }
}
