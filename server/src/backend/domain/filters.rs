//! List filters. Every criterion that is set must match.

use chrono::NaiveDate;

use crate::backend::domain::classifier::Category;
use crate::backend::domain::models::academic::AcademicRecord;
use crate::backend::domain::models::contribution::Contribution;
use crate::backend::domain::models::participant::Participant;

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Treats blank strings as "no criterion"
fn criterion(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct ParticipantFilter {
    /// Matched against full name and registration number
    pub search: Option<String>,
    pub category: Option<Category>,
    pub region_id: Option<String>,
}

impl ParticipantFilter {
    pub fn matches(&self, participant: &Participant, as_of: NaiveDate) -> bool {
        if let Some(search) = criterion(&self.search) {
            if !contains_ignore_case(&participant.full_name, search)
                && !contains_ignore_case(&participant.registration_number, search)
            {
                return false;
            }
        }
        if let Some(category) = self.category {
            if participant.classify(as_of).category != Some(category) {
                return false;
            }
        }
        if let Some(region_id) = criterion(&self.region_id) {
            if participant.region_id != region_id {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct AcademicFilter {
    /// Matched against the report month and the owning participant's
    /// name and registration number
    pub search: Option<String>,
}

impl AcademicFilter {
    pub fn matches(&self, record: &AcademicRecord, participant: Option<&Participant>) -> bool {
        let Some(search) = criterion(&self.search) else {
            return true;
        };
        if contains_ignore_case(&record.report_month, search) {
            return true;
        }
        participant
            .map(|p| {
                contains_ignore_case(&p.full_name, search)
                    || contains_ignore_case(&p.registration_number, search)
            })
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContributionFilter {
    /// Matched against participant name and participant id
    pub search: Option<String>,
    /// Case-insensitive equality on the month text
    pub month: Option<String>,
}

impl ContributionFilter {
    pub fn matches(&self, contribution: &Contribution, participant_name: Option<&str>) -> bool {
        if let Some(search) = criterion(&self.search) {
            let name_hit = participant_name
                .map(|name| contains_ignore_case(name, search))
                .unwrap_or(false);
            if !name_hit && !contains_ignore_case(&contribution.participant_id, search) {
                return false;
            }
        }
        if let Some(month) = criterion(&self.month) {
            if !contribution.month.trim().eq_ignore_ascii_case(month) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::participant::DEFAULT_STATUS;
    use chrono::Utc;

    fn participant(name: &str, reg: &str, region: &str, birth: Option<NaiveDate>) -> Participant {
        let now = Utc::now();
        Participant {
            id: format!("id-{}", reg),
            registration_number: reg.to_string(),
            full_name: name.to_string(),
            islamic_names: None,
            birth_date: birth,
            mobile_number: "0700000000".to_string(),
            region_id: region.to_string(),
            majlis_id: "m1".to_string(),
            emergency_contact_name: None,
            emergency_contact_phone: None,
            dietary_requirements: None,
            medical_conditions: None,
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_participant_search_by_name_or_number() {
        let p = participant("Ahmad Ali", "IJT-00007", "r1", None);
        let by_name = ParticipantFilter { search: Some("ahmad".into()), ..Default::default() };
        let by_reg = ParticipantFilter { search: Some("00007".into()), ..Default::default() };
        let miss = ParticipantFilter { search: Some("yusuf".into()), ..Default::default() };

        assert!(by_name.matches(&p, as_of()));
        assert!(by_reg.matches(&p, as_of()));
        assert!(!miss.matches(&p, as_of()));
    }

    #[test]
    fn test_participant_criteria_are_conjunctive() {
        let p = participant(
            "Ahmad Ali",
            "IJT-00001",
            "r1",
            NaiveDate::from_ymd_opt(1960, 1, 1),
        );
        let both = ParticipantFilter {
            category: Some(Category::SafAwwal),
            region_id: Some("r1".into()),
            ..Default::default()
        };
        let wrong_region = ParticipantFilter {
            category: Some(Category::SafAwwal),
            region_id: Some("r2".into()),
            ..Default::default()
        };
        let wrong_category = ParticipantFilter {
            category: Some(Category::General),
            ..Default::default()
        };

        assert!(both.matches(&p, as_of()));
        assert!(!wrong_region.matches(&p, as_of()));
        assert!(!wrong_category.matches(&p, as_of()));
        assert!(ParticipantFilter::default().matches(&p, as_of()));
    }

    #[test]
    fn test_unknown_birth_date_matches_no_category() {
        let p = participant("Ahmad Ali", "IJT-00001", "r1", None);
        for category in Category::ALL {
            let filter = ParticipantFilter { category: Some(category), ..Default::default() };
            assert!(!filter.matches(&p, as_of()));
        }
    }

    #[test]
    fn test_academic_search_covers_month_and_participant() {
        let p = participant("Ahmad Ali", "IJT-00003", "r1", None);
        let record = AcademicRecord {
            id: "a1".into(),
            participant_id: p.id.clone(),
            report_month: "March".into(),
            knows_prayer_full: true,
            knows_prayer_meaning: false,
            can_read_quran: true,
            owns_bicycle: false,
            avg_prayers_per_day: Some(5),
            days_tilawat_done: None,
            friday_prayers_attended: None,
            huzur_sermons_listened: None,
            nafli_fasts: None,
            created_at: Utc::now(),
        };

        let by_month = AcademicFilter { search: Some("march".into()) };
        let by_name = AcademicFilter { search: Some("ahmad".into()) };
        let by_reg = AcademicFilter { search: Some("00003".into()) };
        let miss = AcademicFilter { search: Some("april".into()) };

        assert!(by_month.matches(&record, Some(&p)));
        assert!(by_month.matches(&record, None));
        assert!(by_name.matches(&record, Some(&p)));
        assert!(!by_name.matches(&record, None));
        assert!(by_reg.matches(&record, Some(&p)));
        assert!(!miss.matches(&record, Some(&p)));
        assert!(AcademicFilter::default().matches(&record, None));
    }

    #[test]
    fn test_contribution_month_is_case_insensitive_equality() {
        let now = Utc::now();
        let c = Contribution {
            id: "c1".into(),
            participant_id: "participant::abc".into(),
            month: "January".into(),
            chanda_majlis: Some(10.0),
            chanda_ijtema: None,
            tehrik_e_jadid: None,
            waqf_e_jadid: None,
            publication: None,
            khidmat_e_khalq: None,
            ansar_project: None,
            created_at: now,
            updated_at: now,
        };

        let month = ContributionFilter { month: Some("january".into()), ..Default::default() };
        let partial = ContributionFilter { month: Some("Jan".into()), ..Default::default() };
        let by_id = ContributionFilter { search: Some("ABC".into()), ..Default::default() };
        let by_name = ContributionFilter { search: Some("ali".into()), ..Default::default() };

        assert!(month.matches(&c, None));
        assert!(!partial.matches(&c, None));
        assert!(by_id.matches(&c, None));
        assert!(by_name.matches(&c, Some("Ahmad Ali")));
        assert!(!by_name.matches(&c, None));
    }
}
