//! Dashboard snapshot: headcounts by cohort and region, contribution
//! totals and event progress.

use anyhow::Result;
use log::info;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::backend::domain::classifier::Category;
use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::dashboard::{DashboardSnapshot, ParticipantCounts};
use crate::backend::domain::contribution_totals::summarize;
use crate::backend::domain::event_progress::progress;
use crate::backend::domain::event_settings_service::EventSettingsService;
use crate::backend::domain::models::region::RegionDirectory;
use crate::backend::storage::{Connection, ContributionStorage, ParticipantStorage, RegionStorage};

#[derive(Clone)]
pub struct DashboardService<C: Connection> {
    participant_repository: C::ParticipantRepository,
    region_repository: C::RegionRepository,
    contribution_repository: C::ContributionRepository,
    event_settings_service: EventSettingsService<C>,
    clock: Clock,
}

impl<C: Connection> DashboardService<C> {
    pub fn new(connection: Arc<C>, event_settings_service: EventSettingsService<C>, clock: Clock) -> Self {
        Self {
            participant_repository: connection.create_participant_repository(),
            region_repository: connection.create_region_repository(),
            contribution_repository: connection.create_contribution_repository(),
            event_settings_service,
            clock,
        }
    }

    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let today = self.clock.today();
        let participants = self.participant_repository.list_participants().await?;
        let directory = RegionDirectory::new(
            self.region_repository.list_regions().await?,
            self.region_repository.list_majlis().await?,
        );
        let contributions = self.contribution_repository.list_contributions().await?;

        let mut by_category: HashMap<Category, usize> = HashMap::new();
        let mut by_region: HashMap<String, usize> = HashMap::new();
        for participant in &participants {
            if let Some(category) = participant.classify(today).category {
                *by_category.entry(category).or_insert(0) += 1;
            }
            let name = directory
                .region_name(&participant.region_id)
                .unwrap_or("Unknown")
                .to_string();
            *by_region.entry(name).or_insert(0) += 1;
        }
        let region_ids: HashSet<&str> = participants.iter().map(|p| p.region_id.as_str()).collect();

        let mut regions: Vec<(String, usize)> = by_region.into_iter().collect();
        regions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let counts = ParticipantCounts {
            total: participants.len(),
            saf_awwal: by_category.get(&Category::SafAwwal).copied().unwrap_or(0),
            saf_dom: by_category.get(&Category::SafDom).copied().unwrap_or(0),
            general: by_category.get(&Category::General).copied().unwrap_or(0),
            total_regions: region_ids.len(),
        };

        let settings = self.event_settings_service.current();
        let snapshot = DashboardSnapshot {
            participants: counts,
            regions,
            contributions: summarize(&contributions),
            progress: progress(settings.as_ref(), self.clock.now()),
        };

        info!(
            "Dashboard: {} participants across {} regions",
            snapshot.participants.total, snapshot.participants.total_regions
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::region::Region;
    use crate::backend::storage::csv::test_utils::{
        contribution, event_settings, new_participant, TestEnvironment,
    };
    use crate::backend::storage::csv::CsvConnection;
    use crate::backend::storage::EventSettingsStorage;
    use chrono::{NaiveDate, TimeZone, Utc};

    async fn dashboard(env: &TestEnvironment) -> DashboardService<CsvConnection> {
        let clock = Clock::Fixed(Utc.with_ymd_and_hms(2024, 8, 2, 10, 0, 0).unwrap());
        let connection = Arc::new(env.connection.clone());
        let settings = EventSettingsService::load(connection.clone(), clock).await.unwrap();
        DashboardService::new(connection, settings, clock)
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let env = TestEnvironment::new().await.unwrap();
        let snapshot = dashboard(&env).await.snapshot().await.unwrap();

        assert_eq!(snapshot.participants.total, 0);
        assert_eq!(snapshot.participants.total_regions, 0);
        assert!(snapshot.regions.is_empty());
        assert_eq!(snapshot.contributions.total_amount, 0.0);
        assert_eq!(snapshot.progress.current_day_label, "No event configured");
    }

    #[tokio::test]
    async fn test_counts_by_category_and_region() {
        let env = TestEnvironment::new().await.unwrap();
        let regions = env.connection.create_region_repository();
        regions
            .store_region(&Region { id: "r1".into(), name: "Nairobi".into(), code: "NAI".into() })
            .await
            .unwrap();
        regions
            .store_region(&Region { id: "r2".into(), name: "Coast".into(), code: "COA".into() })
            .await
            .unwrap();

        let participants = env.connection.create_participant_repository();
        let births = [
            ("r1", NaiveDate::from_ymd_opt(1950, 1, 1)),
            ("r1", NaiveDate::from_ymd_opt(1980, 1, 1)),
            ("r2", NaiveDate::from_ymd_opt(2000, 1, 1)),
            ("r1", None),
        ];
        for (i, (region, birth)) in births.iter().enumerate() {
            let mut p = new_participant(&format!("P{}", i));
            p.region_id = region.to_string();
            p.birth_date = *birth;
            participants.create_participant(&p).await.unwrap();
        }

        let mut paid = contribution("c1", "p", "January");
        paid.chanda_ijtema = Some(300.0);
        env.connection
            .create_contribution_repository()
            .store_contribution(&paid)
            .await
            .unwrap();
        env.connection
            .create_event_settings_repository()
            .save_event_settings(&event_settings("Ijtema 2024"))
            .await
            .unwrap();

        let snapshot = dashboard(&env).await.snapshot().await.unwrap();
        assert_eq!(snapshot.participants.total, 4);
        assert_eq!(snapshot.participants.saf_awwal, 1);
        assert_eq!(snapshot.participants.saf_dom, 1);
        assert_eq!(snapshot.participants.general, 1);
        assert_eq!(snapshot.participants.total_regions, 2);
        assert_eq!(
            snapshot.regions,
            vec![("Nairobi".to_string(), 3), ("Coast".to_string(), 1)]
        );
        assert_eq!(snapshot.contributions.total_amount, 300.0);
        assert_eq!(snapshot.progress.current_day_label, "2nd day of 3");
    }
}
