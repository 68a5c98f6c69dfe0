//! Domain model for a monthly academic/spiritual record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecord {
    pub id: String,
    pub participant_id: String,
    /// Month name as stored. New records always carry a canonical
    /// [`ReportMonth`] name, older rows may not.
    pub report_month: String,
    pub knows_prayer_full: bool,
    pub knows_prayer_meaning: bool,
    pub can_read_quran: bool,
    pub owns_bicycle: bool,
    pub avg_prayers_per_day: Option<u8>,     // 0..=5
    pub days_tilawat_done: Option<u8>,       // 0..=31
    pub friday_prayers_attended: Option<u8>, // 0..=5
    pub huzur_sermons_listened: Option<u8>,  // 0..=5
    pub nafli_fasts: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl AcademicRecord {
    pub fn generate_id() -> String {
        format!("academic::{}", Uuid::new_v4())
    }
}

/// The twelve reporting months in calendar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportMonth {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl ReportMonth {
    pub const ALL: [ReportMonth; 12] = [
        ReportMonth::January,
        ReportMonth::February,
        ReportMonth::March,
        ReportMonth::April,
        ReportMonth::May,
        ReportMonth::June,
        ReportMonth::July,
        ReportMonth::August,
        ReportMonth::September,
        ReportMonth::October,
        ReportMonth::November,
        ReportMonth::December,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportMonth::January => "January",
            ReportMonth::February => "February",
            ReportMonth::March => "March",
            ReportMonth::April => "April",
            ReportMonth::May => "May",
            ReportMonth::June => "June",
            ReportMonth::July => "July",
            ReportMonth::August => "August",
            ReportMonth::September => "September",
            ReportMonth::October => "October",
            ReportMonth::November => "November",
            ReportMonth::December => "December",
        }
    }

    /// Zero-based position in the calendar
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Case-insensitive lookup of a full month name
    pub fn parse(value: &str) -> Option<ReportMonth> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_parse() {
        assert_eq!(ReportMonth::parse("March"), Some(ReportMonth::March));
        assert_eq!(ReportMonth::parse("  december "), Some(ReportMonth::December));
        assert_eq!(ReportMonth::parse("Mar"), None);
        assert_eq!(ReportMonth::parse(""), None);
    }

    #[test]
    fn test_month_index_follows_calendar() {
        for (i, month) in ReportMonth::ALL.iter().enumerate() {
            assert_eq!(month.index(), i);
        }
    }
}
