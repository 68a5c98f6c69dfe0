//! Domain model for the event metadata shown on dashboards and exports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Title used on documents when no event has been configured
pub const DEFAULT_EVENT_NAME: &str = "Ijtema 2024";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSettings {
    pub event_name: String,
    pub event_location: String,
    pub event_start_date: NaiveDate,
    pub total_days: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
