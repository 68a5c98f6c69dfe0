use serde::{Deserialize, Serialize};
use std::fmt;

/// Cohort a participant belongs to, derived from age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantCategory {
    /// Strictly over 55
    #[serde(rename = "Saf Awwal")]
    SafAwwal,
    /// 40 to 55 inclusive
    #[serde(rename = "Saf Dom")]
    SafDom,
    /// Under 40
    #[serde(rename = "General")]
    General,
}

impl fmt::Display for ParticipantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParticipantCategory::SafAwwal => "Saf Awwal",
            ParticipantCategory::SafDom => "Saf Dom",
            ParticipantCategory::General => "General",
        };
        write!(f, "{}", label)
    }
}

/// Represents a registered participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    /// Human-facing registration number, e.g. "IJT-00042"
    pub registration_number: String,
    pub full_name: String,
    pub islamic_names: Option<String>,
    pub date_of_birth: Option<String>, // ISO 8601 date format (YYYY-MM-DD)
    /// Whole years as of today; 0 means unknown
    pub age: u32,
    /// Absent when the birth date is unknown
    pub category: Option<ParticipantCategory>,
    pub mobile_number: String,
    pub region_id: String,
    pub region_name: Option<String>,
    pub majlis_id: String,
    pub majlis_name: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub dietary_requirements: Option<String>,
    pub medical_conditions: Option<String>,
    pub status: String,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for registering a new participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterParticipantRequest {
    pub full_name: String,
    #[serde(default)]
    pub islamic_names: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Age as shown on the registration form. Display only, never trusted.
    #[serde(default)]
    pub years: Option<String>,
    pub mobile_number: String,
    pub region_id: String,
    pub majlis_id: String,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub dietary_requirements: Option<String>,
    #[serde(default)]
    pub medical_conditions: Option<String>,
}

/// Response after registering a participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterParticipantResponse {
    pub success: bool,
    pub registration_number: String,
    pub participant_id: String,
}

/// Full-record replacement of a participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateParticipantRequest {
    pub full_name: String,
    #[serde(default)]
    pub islamic_names: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub years: Option<String>,
    pub mobile_number: String,
    pub region_id: String,
    pub majlis_id: String,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub dietary_requirements: Option<String>,
    #[serde(default)]
    pub medical_conditions: Option<String>,
    pub status: String,
}

/// Response after updating a participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub participant: Participant,
    pub success_message: String,
}

/// Response containing a list of participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantListResponse {
    pub participants: Vec<Participant>,
}

/// Query parameters for listing participants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantListQuery {
    pub search: Option<String>,
    pub category: Option<ParticipantCategory>,
    pub region_id: Option<String>,
}

/// A region of the organisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub code: String,
}

/// A local chapter belonging to exactly one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Majlis {
    pub id: String,
    pub region_id: String,
    pub name: String,
    pub code: String,
}

/// Region joined with its majlis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionWithMajlis {
    pub id: String,
    pub name: String,
    pub code: String,
    pub majlis: Vec<Majlis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionListResponse {
    pub regions: Vec<RegionWithMajlis>,
}

/// Request for creating or renaming a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRegionRequest {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionResponse {
    pub success: bool,
    pub region: Region,
}

/// Request for creating a majlis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMajlisRequest {
    pub name: String,
    pub region_id: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Request for renaming a majlis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMajlisRequest {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajlisResponse {
    pub success: bool,
    pub majlis: Majlis,
}

/// One monthly academic/spiritual submission, joined with its participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecord {
    pub id: String,
    pub participant_id: String,
    pub participant_name: Option<String>,
    pub registration_number: Option<String>,
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
    pub created_at: String, // RFC 3339 timestamp
}

/// Request for creating or replacing an academic record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveAcademicRecordRequest {
    pub participant_id: String,
    pub report_month: String,
    pub knows_prayer_full: bool,
    pub knows_prayer_meaning: bool,
    pub can_read_quran: bool,
    pub owns_bicycle: bool,
    #[serde(default)]
    pub avg_prayers_per_day: Option<u8>,
    #[serde(default)]
    pub days_tilawat_done: Option<u8>,
    #[serde(default)]
    pub friday_prayers_attended: Option<u8>,
    #[serde(default)]
    pub huzur_sermons_listened: Option<u8>,
    #[serde(default)]
    pub nafli_fasts: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecordResponse {
    pub record: AcademicRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecordListResponse {
    pub records: Vec<AcademicRecord>,
}

/// Query parameters for listing academic records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicListQuery {
    pub search: Option<String>,
}

/// Count and share of records answering "yes" to a knowledge question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagStat {
    pub label: String,
    pub true_count: usize,
    /// Whole percent, 0 when there are no records
    pub percentage: u32,
}

/// Reported count and mean of an optional numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericFieldStat {
    pub label: String,
    pub reported_count: usize,
    /// Absent when nothing was reported
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicStatistics {
    pub total_responses: usize,
    pub flags: Vec<FlagStat>,
    pub numeric_fields: Vec<NumericFieldStat>,
}

/// Records of one participant reported against one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGroup {
    pub month: String,
    pub records: Vec<AcademicRecord>,
}

/// A participant's academic history organized by month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantAcademicView {
    pub participant_id: String,
    pub participant_name: String,
    pub registration_number: String,
    pub months: Vec<MonthGroup>,
    /// Most recently created record, used as the current status
    pub latest: Option<AcademicRecord>,
}

/// Designated fund a contribution can be paid into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionCategory {
    ChandaMajlis,
    ChandaIjtema,
    TehrikEJadid,
    WaqfEJadid,
    Publication,
    KhidmatEKhalq,
    AnsarProject,
}

/// A participant's monthly contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub participant_id: String,
    pub participant_name: Option<String>,
    pub month: String,
    pub chanda_majlis: Option<f64>,
    pub chanda_ijtema: Option<f64>,
    pub tehrik_e_jadid: Option<f64>,
    pub waqf_e_jadid: Option<f64>,
    pub publication: Option<f64>,
    pub khidmat_e_khalq: Option<f64>,
    pub ansar_project: Option<f64>,
    /// Sum of the present amounts
    pub total: f64,
    pub created_at: String, // RFC 3339 timestamp
}

/// Request for recording or replacing a contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveContributionRequest {
    pub participant_id: String,
    pub month: String,
    #[serde(default)]
    pub chanda_majlis: Option<f64>,
    #[serde(default)]
    pub chanda_ijtema: Option<f64>,
    #[serde(default)]
    pub tehrik_e_jadid: Option<f64>,
    #[serde(default)]
    pub waqf_e_jadid: Option<f64>,
    #[serde(default)]
    pub publication: Option<f64>,
    #[serde(default)]
    pub khidmat_e_khalq: Option<f64>,
    #[serde(default)]
    pub ansar_project: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionResponse {
    pub contribution: Contribution,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionListResponse {
    pub contributions: Vec<Contribution>,
}

/// Query parameters for listing contributions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionListQuery {
    pub search: Option<String>,
    pub month: Option<String>,
}

/// Payer count and totals for one fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: ContributionCategory,
    pub label: String,
    pub payers: usize,
    pub total_amount: f64,
    /// Rounded mean per payer, absent when nobody paid
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionSummary {
    pub record_count: usize,
    pub total_amount: f64,
    pub total_contributors: usize,
    pub categories: Vec<CategoryStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub total_participants: usize,
    pub saf_awwal: usize,
    pub saf_dom: usize,
    pub general: usize,
    pub total_regions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStat {
    pub name: String,
    pub participants: usize,
}

/// Where "today" falls within the configured event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProgress {
    pub event_name: Option<String>,
    pub current_day_label: String,
    pub progress_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub participant_stats: ParticipantStats,
    pub region_stats: Vec<RegionStat>,
    pub contribution_stats: ContributionSummary,
    pub event: EventProgress,
}

/// Event metadata shown on the dashboard and on exported documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSettings {
    pub event_name: String,
    pub event_location: String,
    pub event_start_date: String, // ISO 8601 date format (YYYY-MM-DD)
    pub total_days: u32,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEventSettingsRequest {
    pub event_name: String,
    pub event_location: String,
    pub event_start_date: String,
    pub total_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSettingsResponse {
    pub settings: Option<EventSettings>,
    pub success_message: Option<String>,
}

/// Rendered export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub title: String,
    pub filename: String,
    pub content: String,
    pub row_count: usize,
}

/// Request for writing an export to disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    pub custom_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub row_count: usize,
}

/// Generic acknowledgement for deletes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub success_message: String,
}

/// Body returned with every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
