use anyhow::Result;
use async_trait::async_trait;

use super::connection::CsvConnection;
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::contribution::Contribution;
use crate::backend::storage::traits::ContributionStorage;

const CONTRIBUTIONS_FILE: &str = "contributions.csv";

/// CSV-based contribution repository
#[derive(Clone)]
pub struct ContributionRepository {
    connection: CsvConnection,
}

impl ContributionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ContributionStorage for ContributionRepository {
    async fn store_contribution(&self, contribution: &Contribution) -> Result<()> {
        self.connection
            .update_rows::<Contribution, _, _>(CONTRIBUTIONS_FILE, |rows| {
                if rows.iter().any(|c| c.id == contribution.id) {
                    return Err(DomainError::conflict(format!(
                        "Contribution {} already exists",
                        contribution.id
                    )));
                }
                rows.push(contribution.clone());
                Ok(())
            })
    }

    async fn get_contribution(&self, contribution_id: &str) -> Result<Option<Contribution>> {
        let rows: Vec<Contribution> = self.connection.read_rows(CONTRIBUTIONS_FILE)?;
        Ok(rows.into_iter().find(|c| c.id == contribution_id))
    }

    async fn list_contributions(&self) -> Result<Vec<Contribution>> {
        let mut rows: Vec<Contribution> = self.connection.read_rows(CONTRIBUTIONS_FILE)?;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update_contribution(&self, contribution: &Contribution) -> Result<bool> {
        self.connection
            .update_rows::<Contribution, _, _>(CONTRIBUTIONS_FILE, |rows| {
                match rows.iter_mut().find(|c| c.id == contribution.id) {
                    Some(existing) => {
                        *existing = contribution.clone();
                        Ok(true)
                    }
                    None => Ok(false),
                }
            })
    }

    async fn delete_contribution(&self, contribution_id: &str) -> Result<bool> {
        self.connection
            .update_rows::<Contribution, _, _>(CONTRIBUTIONS_FILE, |rows| {
                let before = rows.len();
                rows.retain(|c| c.id != contribution_id);
                Ok(rows.len() != before)
            })
    }

    async fn delete_contributions_for_participant(&self, participant_id: &str) -> Result<usize> {
        self.connection
            .update_rows::<Contribution, _, _>(CONTRIBUTIONS_FILE, |rows| {
                let before = rows.len();
                rows.retain(|c| c.participant_id != participant_id);
                Ok(before - rows.len())
            })
    }
}
