//! Domain model for a monthly contribution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seven designated funds, each independently optional on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContributionCategory {
    /// General fund
    ChandaMajlis,
    /// Event fund
    ChandaIjtema,
    TehrikEJadid,
    WaqfEJadid,
    Publication,
    KhidmatEKhalq,
    AnsarProject,
}

impl ContributionCategory {
    pub const ALL: [ContributionCategory; 7] = [
        ContributionCategory::ChandaMajlis,
        ContributionCategory::ChandaIjtema,
        ContributionCategory::TehrikEJadid,
        ContributionCategory::WaqfEJadid,
        ContributionCategory::Publication,
        ContributionCategory::KhidmatEKhalq,
        ContributionCategory::AnsarProject,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContributionCategory::ChandaMajlis => "Chanda Majlis",
            ContributionCategory::ChandaIjtema => "Chanda Ijtema",
            ContributionCategory::TehrikEJadid => "Tehrik-e-Jadid",
            ContributionCategory::WaqfEJadid => "Waqf-e-Jadid",
            ContributionCategory::Publication => "Publication",
            ContributionCategory::KhidmatEKhalq => "Khidmat-e-Khalq",
            ContributionCategory::AnsarProject => "Ansar Project",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub participant_id: String,
    /// Free-text month, not checked against a calendar list
    pub month: String,
    pub chanda_majlis: Option<f64>,
    pub chanda_ijtema: Option<f64>,
    pub tehrik_e_jadid: Option<f64>,
    pub waqf_e_jadid: Option<f64>,
    pub publication: Option<f64>,
    pub khidmat_e_khalq: Option<f64>,
    pub ansar_project: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contribution {
    pub fn generate_id() -> String {
        format!("contribution::{}", Uuid::new_v4())
    }

    pub fn amount(&self, category: ContributionCategory) -> Option<f64> {
        match category {
            ContributionCategory::ChandaMajlis => self.chanda_majlis,
            ContributionCategory::ChandaIjtema => self.chanda_ijtema,
            ContributionCategory::TehrikEJadid => self.tehrik_e_jadid,
            ContributionCategory::WaqfEJadid => self.waqf_e_jadid,
            ContributionCategory::Publication => self.publication,
            ContributionCategory::KhidmatEKhalq => self.khidmat_e_khalq,
            ContributionCategory::AnsarProject => self.ansar_project,
        }
    }
}
