use anyhow::Result;
use async_trait::async_trait;
use log::info;

use super::connection::CsvConnection;
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::participant::{NewParticipant, Participant};
use crate::backend::storage::traits::ParticipantStorage;

const PARTICIPANTS_FILE: &str = "participants.csv";
const REGISTRATION_PREFIX: &str = "IJT-";

/// Sequence part of a registration number such as "IJT-00042"
fn registration_sequence(registration_number: &str) -> Option<u32> {
    registration_number
        .strip_prefix(REGISTRATION_PREFIX)
        .and_then(|n| n.parse().ok())
}

pub fn format_registration_number(sequence: u32) -> String {
    format!("{}{:05}", REGISTRATION_PREFIX, sequence)
}

/// CSV-based participant repository
#[derive(Clone)]
pub struct ParticipantRepository {
    connection: CsvConnection,
}

impl ParticipantRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ParticipantStorage for ParticipantRepository {
    async fn create_participant(&self, new_participant: &NewParticipant) -> Result<Participant> {
        let participant = self
            .connection
            .update_rows::<Participant, _, _>(PARTICIPANTS_FILE, |rows| {
                if rows.iter().any(|p| p.id == new_participant.id) {
                    return Err(DomainError::conflict(format!(
                        "Participant {} already exists",
                        new_participant.id
                    )));
                }

                let next = rows
                    .iter()
                    .filter_map(|p| registration_sequence(&p.registration_number))
                    .max()
                    .unwrap_or(0)
                    + 1;
                let registration_number = format_registration_number(next);
                if rows.iter().any(|p| p.registration_number == registration_number) {
                    return Err(DomainError::conflict(format!(
                        "Registration number {} is already taken",
                        registration_number
                    )));
                }

                let participant = new_participant.clone().into_participant(registration_number);
                rows.push(participant.clone());
                Ok(participant)
            })?;

        info!(
            "Stored participant {} as {}",
            participant.id, participant.registration_number
        );
        Ok(participant)
    }

    async fn get_participant(&self, participant_id: &str) -> Result<Option<Participant>> {
        let rows: Vec<Participant> = self.connection.read_rows(PARTICIPANTS_FILE)?;
        Ok(rows.into_iter().find(|p| p.id == participant_id))
    }

    async fn list_participants(&self) -> Result<Vec<Participant>> {
        let mut rows: Vec<Participant> = self.connection.read_rows(PARTICIPANTS_FILE)?;
        rows.sort_by(|a, b| {
            a.full_name
                .to_lowercase()
                .cmp(&b.full_name.to_lowercase())
                .then_with(|| a.registration_number.cmp(&b.registration_number))
        });
        Ok(rows)
    }

    async fn update_participant(&self, participant: &Participant) -> Result<bool> {
        self.connection
            .update_rows::<Participant, _, _>(PARTICIPANTS_FILE, |rows| {
                match rows.iter_mut().find(|p| p.id == participant.id) {
                    Some(existing) => {
                        *existing = participant.clone();
                        Ok(true)
                    }
                    None => Ok(false),
                }
            })
    }

    async fn delete_participant(&self, participant_id: &str) -> Result<bool> {
        self.connection
            .update_rows::<Participant, _, _>(PARTICIPANTS_FILE, |rows| {
                let before = rows.len();
                rows.retain(|p| p.id != participant_id);
                Ok(rows.len() != before)
            })
    }
}
