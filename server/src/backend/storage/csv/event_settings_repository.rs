use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::fs;

use super::connection::CsvConnection;
use crate::backend::domain::models::event_settings::EventSettings;
use crate::backend::storage::traits::EventSettingsStorage;

const EVENT_SETTINGS_FILE: &str = "event_settings.yaml";

/// YAML-backed store for the single event settings document
#[derive(Clone)]
pub struct EventSettingsRepository {
    connection: CsvConnection,
}

impl EventSettingsRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl EventSettingsStorage for EventSettingsRepository {
    async fn get_event_settings(&self) -> Result<Option<EventSettings>> {
        let path = self.connection.file_path(EVENT_SETTINGS_FILE);
        if !path.exists() {
            debug!("No event settings at {}", path.display());
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&path)?;
        let settings: EventSettings = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(settings))
    }

    async fn save_event_settings(&self, settings: &EventSettings) -> Result<()> {
        let yaml_content = serde_yaml::to_string(settings)?;
        self.connection.write_document(EVENT_SETTINGS_FILE, &yaml_content)?;
        info!("Saved event settings for {}", settings.event_name);
        Ok(())
    }

    async fn delete_event_settings(&self) -> Result<bool> {
        self.connection.remove_document(EVENT_SETTINGS_FILE)
    }
}
