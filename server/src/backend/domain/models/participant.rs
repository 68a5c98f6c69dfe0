//! Domain model for a registered participant.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::domain::classifier::{self, Classification};

pub const DEFAULT_STATUS: &str = "registered";

/// A participant as held by the record store.
///
/// Age and category are deliberately absent: they are derived from
/// `birth_date` on every read through [`Participant::classify`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub registration_number: String,
    pub full_name: String,
    pub islamic_names: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub mobile_number: String,
    pub region_id: String,
    pub majlis_id: String,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub dietary_requirements: Option<String>,
    pub medical_conditions: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Participant {
    pub fn generate_id() -> String {
        format!("participant::{}", Uuid::new_v4())
    }

    /// Age and category as of the given day
    pub fn classify(&self, as_of: NaiveDate) -> Classification {
        classifier::classify(self.birth_date, as_of)
    }
}

/// A participant before the store has assigned its registration number
#[derive(Debug, Clone, PartialEq)]
pub struct NewParticipant {
    pub id: String,
    pub full_name: String,
    pub islamic_names: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub mobile_number: String,
    pub region_id: String,
    pub majlis_id: String,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub dietary_requirements: Option<String>,
    pub medical_conditions: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl NewParticipant {
    pub fn into_participant(self, registration_number: String) -> Participant {
        Participant {
            id: self.id,
            registration_number,
            full_name: self.full_name,
            islamic_names: self.islamic_names,
            birth_date: self.birth_date,
            mobile_number: self.mobile_number,
            region_id: self.region_id,
            majlis_id: self.majlis_id,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_phone: self.emergency_contact_phone,
            dietary_requirements: self.dietary_requirements,
            medical_conditions: self.medical_conditions,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
