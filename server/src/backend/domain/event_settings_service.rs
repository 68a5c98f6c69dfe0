//! Event settings with change notification.
//!
//! The current settings are held in a `tokio::sync::watch` channel so that
//! every reader (dashboard, exports, anything subscribed) sees a save or
//! delete as soon as it is persisted.

use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;
use tokio::sync::watch;

use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::event_settings::SaveEventSettingsCommand;
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::event_settings::{EventSettings, DEFAULT_EVENT_NAME};
use crate::backend::storage::{Connection, EventSettingsStorage};

#[derive(Clone)]
pub struct EventSettingsService<C: Connection> {
    repository: C::EventSettingsRepository,
    sender: Arc<watch::Sender<Option<EventSettings>>>,
    clock: Clock,
}

impl<C: Connection> EventSettingsService<C> {
    /// Load persisted settings and start publishing them
    pub async fn load(connection: Arc<C>, clock: Clock) -> Result<Self> {
        let repository = connection.create_event_settings_repository();
        let current = repository.get_event_settings().await?;
        match &current {
            Some(settings) => info!("Loaded event settings for {}", settings.event_name),
            None => info!("No event configured"),
        }

        let (sender, _receiver) = watch::channel(current);
        Ok(Self {
            repository,
            sender: Arc::new(sender),
            clock,
        })
    }

    pub fn current(&self) -> Option<EventSettings> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<EventSettings>> {
        self.sender.subscribe()
    }

    /// Name shown on documents, falling back to the default title
    pub fn event_name(&self) -> String {
        self.sender
            .borrow()
            .as_ref()
            .map(|s| s.event_name.clone())
            .unwrap_or_else(|| DEFAULT_EVENT_NAME.to_string())
    }

    /// Create or replace the settings. An update keeps the original
    /// creation time.
    pub async fn save(&self, command: SaveEventSettingsCommand) -> Result<EventSettings> {
        let event_name = command.event_name.trim();
        if event_name.is_empty() {
            return Err(DomainError::validation("Event name is required"));
        }
        let event_location = command.event_location.trim();
        if event_location.is_empty() {
            return Err(DomainError::validation("Event location is required"));
        }
        if command.total_days < 1 {
            return Err(DomainError::validation("Total days must be at least 1"));
        }
        let event_start_date = NaiveDate::parse_from_str(command.event_start_date.trim(), "%Y-%m-%d")
            .map_err(|_| DomainError::validation("Start date must be in YYYY-MM-DD format"))?;

        let now = self.clock.now();
        let created_at = self
            .repository
            .get_event_settings()
            .await?
            .map(|existing| existing.created_at)
            .unwrap_or(now);

        let settings = EventSettings {
            event_name: event_name.to_string(),
            event_location: event_location.to_string(),
            event_start_date,
            total_days: command.total_days,
            created_at,
            updated_at: now,
        };

        self.repository.save_event_settings(&settings).await?;
        self.sender.send_replace(Some(settings.clone()));

        info!(
            "Event settings saved: {} at {} from {} for {} days",
            settings.event_name, settings.event_location, settings.event_start_date, settings.total_days
        );
        Ok(settings)
    }

    /// Returns false when nothing was configured
    pub async fn delete(&self) -> Result<bool> {
        let existed = self.repository.delete_event_settings().await?;
        self.sender.send_replace(None);
        if existed {
            info!("Event settings deleted");
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::TestEnvironment;
    use crate::backend::storage::csv::CsvConnection;
    use chrono::{Duration, TimeZone, Utc};

    fn clock(minute: i64) -> Clock {
        Clock::Fixed(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap() + Duration::minutes(minute))
    }

    fn command(name: &str) -> SaveEventSettingsCommand {
        SaveEventSettingsCommand {
            event_name: name.to_string(),
            event_location: "Nairobi".to_string(),
            event_start_date: "2024-08-01".to_string(),
            total_days: 3,
        }
    }

    async fn service(env: &TestEnvironment, minute: i64) -> EventSettingsService<CsvConnection> {
        EventSettingsService::load(Arc::new(env.connection.clone()), clock(minute))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_default_name_without_settings() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service(&env, 0).await;
        assert!(service.current().is_none());
        assert_eq!(service.event_name(), "Ijtema 2024");
    }

    #[tokio::test]
    async fn test_save_publishes_and_preserves_created_at() {
        let env = TestEnvironment::new().await.unwrap();
        let first = service(&env, 0).await;
        let mut receiver = first.subscribe();

        let created = first.save(command("Ijtema 2025")).await.unwrap();
        assert!(receiver.has_changed().unwrap());
        assert_eq!(
            receiver.borrow_and_update().as_ref().map(|s| s.event_name.clone()),
            Some("Ijtema 2025".to_string())
        );

        let later = service(&env, 30).await;
        assert_eq!(later.event_name(), "Ijtema 2025");
        let updated = later.save(command("Ijtema 2025 (Final)")).await.unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_validation() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service(&env, 0).await;

        let mut zero_days = command("Ijtema");
        zero_days.total_days = 0;
        assert!(service.save(zero_days).await.is_err());

        let mut bad_date = command("Ijtema");
        bad_date.event_start_date = "01-08-2024".into();
        assert!(service.save(bad_date).await.is_err());

        let mut no_location = command("Ijtema");
        no_location.event_location = " ".into();
        assert!(service.save(no_location).await.is_err());

        assert!(service.save(command(" ")).await.is_err());
        assert!(service.current().is_none());
    }

    #[tokio::test]
    async fn test_delete_clears_current() {
        let env = TestEnvironment::new().await.unwrap();
        let service = service(&env, 0).await;

        service.save(command("Ijtema 2025")).await.unwrap();
        assert!(service.delete().await.unwrap());
        assert!(service.current().is_none());
        assert!(!service.delete().await.unwrap());
    }
}
