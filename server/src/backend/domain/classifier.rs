//! Age and cohort classification.
//!
//! Age is never stored. It is recomputed from the birth date against a
//! reference day each time a participant is read, so cohorts move on
//! birthdays without any write.

use chrono::{DateTime, Datelike, NaiveDate};

/// Cohort derived from age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Strictly over 55
    SafAwwal,
    /// 40 to 55 inclusive
    SafDom,
    /// Under 40
    General,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::SafAwwal, Category::SafDom, Category::General];

    pub fn from_age(age: u32) -> Category {
        if age > 55 {
            Category::SafAwwal
        } else if age >= 40 {
            Category::SafDom
        } else {
            Category::General
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::SafAwwal => "Saf Awwal",
            Category::SafDom => "Saf Dom",
            Category::General => "General",
        }
    }
}

/// Age and category of one participant as of a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Whole years, 0 when the birth date is unknown
    pub age: u32,
    /// `None` when the birth date is unknown
    pub category: Option<Category>,
}

/// Whole years elapsed between `birth` and `as_of`.
///
/// The year difference is reduced by one while the birthday has not yet
/// come round this year. Absent or future birth dates give 0.
pub fn age(birth: Option<NaiveDate>, as_of: NaiveDate) -> u32 {
    let Some(birth) = birth else {
        return 0;
    };
    if birth > as_of {
        return 0;
    }

    let mut years = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Parses a stored or submitted birth date.
///
/// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp, of
/// which only the date part is kept.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Age from a raw string, 0 when it cannot be parsed
pub fn age_from_str(value: &str, as_of: NaiveDate) -> u32 {
    age(parse_birth_date(value), as_of)
}

pub fn classify(birth: Option<NaiveDate>, as_of: NaiveDate) -> Classification {
    match birth {
        Some(_) => {
            let age = age(birth, as_of);
            Classification {
                age,
                category: Some(Category::from_age(age)),
            }
        }
        None => Classification {
            age: 0,
            category: None,
        },
    }
}
