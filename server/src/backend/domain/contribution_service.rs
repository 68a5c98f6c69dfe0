//! Monthly contributions across the seven funds.

use anyhow::Result;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::contribution::{ContributionDetails, SaveContributionCommand};
use crate::backend::domain::contribution_totals::{summarize, ContributionTotals};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::filters::ContributionFilter;
use crate::backend::domain::models::contribution::Contribution;
use crate::backend::storage::{Connection, ContributionStorage, ParticipantStorage};

/// Checked amount: finite and not negative
fn amount(value: Option<f64>, label: &str) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(DomainError::validation(format!(
            "{} must be a non-negative amount",
            label
        ))),
        other => Ok(other),
    }
}

#[derive(Clone)]
pub struct ContributionService<C: Connection> {
    contribution_repository: C::ContributionRepository,
    participant_repository: C::ParticipantRepository,
    clock: Clock,
}

impl<C: Connection> ContributionService<C> {
    pub fn new(connection: Arc<C>, clock: Clock) -> Self {
        Self {
            contribution_repository: connection.create_contribution_repository(),
            participant_repository: connection.create_participant_repository(),
            clock,
        }
    }

    pub async fn create_contribution(&self, command: SaveContributionCommand) -> Result<ContributionDetails> {
        info!(
            "Recording contribution for {} ({})",
            command.participant_id, command.month
        );

        let (participant_name, mut contribution) = self.build(&command).await?;
        contribution.id = Contribution::generate_id();

        self.contribution_repository.store_contribution(&contribution).await?;
        info!("Recorded contribution {}", contribution.id);

        Ok(ContributionDetails {
            contribution,
            participant_name: Some(participant_name),
        })
    }

    pub async fn update_contribution(
        &self,
        contribution_id: &str,
        command: SaveContributionCommand,
    ) -> Result<ContributionDetails> {
        info!("Updating contribution {}", contribution_id);

        let existing = self
            .contribution_repository
            .get_contribution(contribution_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Contribution {}", contribution_id)))?;

        let (participant_name, mut contribution) = self.build(&command).await?;
        contribution.id = existing.id;
        contribution.created_at = existing.created_at;
        contribution.updated_at = self.clock.now();

        if !self.contribution_repository.update_contribution(&contribution).await? {
            return Err(DomainError::not_found(format!("Contribution {}", contribution_id)));
        }

        Ok(ContributionDetails {
            contribution,
            participant_name: Some(participant_name),
        })
    }

    pub async fn delete_contribution(&self, contribution_id: &str) -> Result<()> {
        if !self.contribution_repository.delete_contribution(contribution_id).await? {
            return Err(DomainError::not_found(format!("Contribution {}", contribution_id)));
        }
        info!("Deleted contribution {}", contribution_id);
        Ok(())
    }

    /// All contributions newest first
    pub async fn list_contributions(&self, filter: &ContributionFilter) -> Result<Vec<ContributionDetails>> {
        let contributions = self.contribution_repository.list_contributions().await?;
        let names = self.participant_names().await?;

        let result: Vec<ContributionDetails> = contributions
            .into_iter()
            .filter(|c| filter.matches(c, names.get(&c.participant_id).map(String::as_str)))
            .map(|c| ContributionDetails {
                participant_name: names.get(&c.participant_id).cloned(),
                contribution: c,
            })
            .collect();

        info!("Found {} contributions", result.len());
        Ok(result)
    }

    /// Totals over the filtered contributions
    pub async fn summary(&self, filter: &ContributionFilter) -> Result<ContributionTotals> {
        let contributions: Vec<Contribution> = self
            .list_contributions(filter)
            .await?
            .into_iter()
            .map(|details| details.contribution)
            .collect();
        Ok(summarize(&contributions))
    }

    /// Validated record stamped with the current time and no id yet
    async fn build(&self, command: &SaveContributionCommand) -> Result<(String, Contribution)> {
        let participant_id = command.participant_id.trim();
        if participant_id.is_empty() {
            return Err(DomainError::validation("Participant is required"));
        }
        let participant = self
            .participant_repository
            .get_participant(participant_id)
            .await?
            .ok_or_else(|| {
                DomainError::validation(format!("Participant {} does not exist", participant_id))
            })?;

        let month = command.month.trim();
        if month.is_empty() {
            return Err(DomainError::validation("Month is required"));
        }

        let now = self.clock.now();
        let contribution = Contribution {
            id: String::new(),
            participant_id: participant.id,
            month: month.to_string(),
            chanda_majlis: amount(command.chanda_majlis, "Chanda Majlis")?,
            chanda_ijtema: amount(command.chanda_ijtema, "Chanda Ijtema")?,
            tehrik_e_jadid: amount(command.tehrik_e_jadid, "Tehrik-e-Jadid")?,
            waqf_e_jadid: amount(command.waqf_e_jadid, "Waqf-e-Jadid")?,
            publication: amount(command.publication, "Publication")?,
            khidmat_e_khalq: amount(command.khidmat_e_khalq, "Khidmat-e-Khalq")?,
            ansar_project: amount(command.ansar_project, "Ansar Project")?,
            created_at: now,
            updated_at: now,
        };
        Ok((participant.full_name, contribution))
    }

    async fn participant_names(&self) -> Result<HashMap<String, String>> {
        let participants = self.participant_repository.list_participants().await?;
        Ok(participants
            .into_iter()
            .map(|p| (p.id, p.full_name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::contribution::ContributionCategory;
    use crate::backend::storage::csv::test_utils::{new_participant, TestEnvironment};
    use crate::backend::storage::csv::CsvConnection;
    use chrono::{Duration, TimeZone, Utc};

    async fn setup() -> (TestEnvironment, String) {
        let env = TestEnvironment::new().await.unwrap();
        let participant = env
            .connection
            .create_participant_repository()
            .create_participant(&new_participant("Ahmad Ali"))
            .await
            .unwrap();
        (env, participant.id)
    }

    fn service_at(env: &TestEnvironment, minute: i64) -> ContributionService<CsvConnection> {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        ContributionService::new(
            Arc::new(env.connection.clone()),
            Clock::Fixed(base + Duration::minutes(minute)),
        )
    }

    fn command(participant_id: &str, month: &str) -> SaveContributionCommand {
        SaveContributionCommand {
            participant_id: participant_id.to_string(),
            month: month.to_string(),
            chanda_majlis: None,
            chanda_ijtema: None,
            tehrik_e_jadid: None,
            waqf_e_jadid: None,
            publication: None,
            khidmat_e_khalq: None,
            ansar_project: None,
        }
    }

    fn is_validation(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Validation(_)))
    }

    #[tokio::test]
    async fn test_summary_counts_payers() {
        let (env, participant_id) = setup().await;

        let mut paid = command(&participant_id, "January");
        paid.chanda_majlis = Some(500.0);
        service_at(&env, 0).create_contribution(paid).await.unwrap();
        service_at(&env, 1)
            .create_contribution(command(&participant_id, "February"))
            .await
            .unwrap();

        let summary = service_at(&env, 2)
            .summary(&ContributionFilter::default())
            .await
            .unwrap();
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.total_amount, 500.0);
        assert_eq!(summary.total_contributors, 1);
        let majlis = summary
            .categories
            .iter()
            .find(|c| c.category == ContributionCategory::ChandaMajlis)
            .unwrap();
        assert_eq!(majlis.payers, 1);
        assert_eq!(majlis.average(), Some(500.0));
    }

    #[tokio::test]
    async fn test_validation() {
        let (env, participant_id) = setup().await;
        let service = service_at(&env, 0);

        let mut negative = command(&participant_id, "January");
        negative.publication = Some(-1.0);
        assert!(is_validation(&service.create_contribution(negative).await.unwrap_err()));

        let mut not_finite = command(&participant_id, "January");
        not_finite.ansar_project = Some(f64::NAN);
        assert!(is_validation(&service.create_contribution(not_finite).await.unwrap_err()));

        let blank_month = command(&participant_id, "  ");
        assert!(is_validation(&service.create_contribution(blank_month).await.unwrap_err()));

        let unknown = command("missing", "January");
        assert!(is_validation(&service.create_contribution(unknown).await.unwrap_err()));
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filters() {
        let (env, participant_id) = setup().await;

        service_at(&env, 0)
            .create_contribution(command(&participant_id, "January"))
            .await
            .unwrap();
        service_at(&env, 5)
            .create_contribution(command(&participant_id, "February"))
            .await
            .unwrap();

        let service = service_at(&env, 10);
        let all = service.list_contributions(&ContributionFilter::default()).await.unwrap();
        assert_eq!(all[0].contribution.month, "February");
        assert_eq!(all[0].participant_name.as_deref(), Some("Ahmad Ali"));

        let january = service
            .list_contributions(&ContributionFilter {
                month: Some("JANUARY".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(january.len(), 1);

        let by_name = service
            .list_contributions(&ContributionFilter {
                search: Some("ali".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_name.len(), 2);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let (env, participant_id) = setup().await;

        let created = service_at(&env, 0)
            .create_contribution(command(&participant_id, "January"))
            .await
            .unwrap();
        let mut change = command(&participant_id, "January");
        change.waqf_e_jadid = Some(75.0);
        let updated = service_at(&env, 20)
            .update_contribution(&created.contribution.id, change)
            .await
            .unwrap();

        assert_eq!(updated.contribution.created_at, created.contribution.created_at);
        assert!(updated.contribution.updated_at > created.contribution.updated_at);
        assert_eq!(updated.contribution.waqf_e_jadid, Some(75.0));

        service_at(&env, 21)
            .delete_contribution(&created.contribution.id)
            .await
            .unwrap();
        let summary = service_at(&env, 22)
            .summary(&ContributionFilter::default())
            .await
            .unwrap();
        assert_eq!(summary.record_count, 0);
    }
}
