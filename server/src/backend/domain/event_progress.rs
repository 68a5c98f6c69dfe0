//! Where "now" falls within the configured event.

use chrono::{DateTime, Utc};

use crate::backend::domain::models::event_settings::EventSettings;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st
pub fn ordinal(n: i64) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub event_name: Option<String>,
    pub current_day_label: String,
    /// Clamped to 0..=100
    pub percentage: f64,
}

impl Progress {
    fn unconfigured() -> Self {
        Self {
            event_name: None,
            current_day_label: "No event configured".to_string(),
            percentage: 0.0,
        }
    }
}

/// Current event day counted from midnight UTC of the start date.
///
/// Day 1 begins any time after that midnight, so a fraction of a day
/// rounds up.
pub fn current_day(settings: &EventSettings, now: DateTime<Utc>) -> i64 {
    let start = settings.event_start_date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    let Some(start) = start else {
        return 0;
    };
    let elapsed = (now - start).num_milliseconds() as f64;
    (elapsed / MILLIS_PER_DAY).ceil() as i64
}

pub fn progress(settings: Option<&EventSettings>, now: DateTime<Utc>) -> Progress {
    let Some(settings) = settings else {
        return Progress::unconfigured();
    };

    let total_days = settings.total_days.max(1) as i64;
    let day = current_day(settings, now);

    let current_day_label = if day < 1 {
        "Event not started".to_string()
    } else if day > total_days {
        "Event completed".to_string()
    } else {
        format!("{} day of {}", ordinal(day), total_days)
    };

    let percentage = (day as f64 / total_days as f64 * 100.0).clamp(0.0, 100.0);

    Progress {
        event_name: Some(settings.event_name.clone()),
        current_day_label,
        percentage,
    }
}
