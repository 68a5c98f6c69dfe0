//! Region and majlis management.
//!
//! ## Business Rules
//!
//! - Region names are unique ignoring case
//! - Majlis names are unique within their region ignoring case
//! - A missing code defaults to the first three letters of the name
//! - A region with majlis, or anything a participant points at, cannot be
//!   deleted

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::backend::domain::codes::resolve_code;
use crate::backend::domain::commands::region::{
    CreateMajlisCommand, SaveRegionCommand, UpdateMajlisCommand,
};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::region::{Majlis, Region, RegionWithMajlis};
use crate::backend::storage::{Connection, ParticipantStorage, RegionStorage};

fn required_name(name: &str, what: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation(format!("{} name is required", what)));
    }
    if name.chars().count() > 100 {
        return Err(DomainError::validation(format!(
            "{} name cannot exceed 100 characters",
            what
        )));
    }
    Ok(name.to_string())
}

#[derive(Clone)]
pub struct RegionService<C: Connection> {
    region_repository: C::RegionRepository,
    participant_repository: C::ParticipantRepository,
}

impl<C: Connection> RegionService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            region_repository: connection.create_region_repository(),
            participant_repository: connection.create_participant_repository(),
        }
    }

    /// Regions by name, each with its majlis by name
    pub async fn list_regions(&self) -> Result<Vec<RegionWithMajlis>> {
        let regions = self.region_repository.list_regions().await?;
        let majlis = self.region_repository.list_majlis().await?;

        let result: Vec<RegionWithMajlis> = regions
            .into_iter()
            .map(|region| {
                let owned = majlis
                    .iter()
                    .filter(|m| m.region_id == region.id)
                    .cloned()
                    .collect();
                RegionWithMajlis { region, majlis: owned }
            })
            .collect();

        info!("Listed {} regions", result.len());
        Ok(result)
    }

    pub async fn create_region(&self, command: SaveRegionCommand) -> Result<Region> {
        let name = required_name(&command.name, "Region")?;

        let region = Region {
            id: Region::generate_id(),
            code: resolve_code(command.code.as_deref(), &name),
            name,
        };
        self.region_repository.store_region(&region).await?;

        info!("Created region {} ({})", region.name, region.code);
        Ok(region)
    }

    /// Rename a region. The code is kept unless a new one is given.
    pub async fn update_region(&self, region_id: &str, command: SaveRegionCommand) -> Result<Region> {
        let mut region = self
            .region_repository
            .get_region(region_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Region {}", region_id)))?;

        let name = required_name(&command.name, "Region")?;

        if let Some(code) = command.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            region.code = code.to_string();
        }
        region.name = name;

        if !self.region_repository.update_region(&region).await? {
            return Err(DomainError::not_found(format!("Region {}", region_id)));
        }
        info!("Updated region {}", region.id);
        Ok(region)
    }

    pub async fn delete_region(&self, region_id: &str) -> Result<()> {
        if self.region_repository.get_region(region_id).await?.is_none() {
            return Err(DomainError::not_found(format!("Region {}", region_id)));
        }

        let majlis = self.region_repository.list_majlis().await?;
        if majlis.iter().any(|m| m.region_id == region_id) {
            warn!("Refusing to delete region {} with majlis", region_id);
            return Err(DomainError::conflict(
                "Region still has majlis; delete them first",
            ));
        }

        let participants = self.participant_repository.list_participants().await?;
        if participants.iter().any(|p| p.region_id == region_id) {
            warn!("Refusing to delete region {} with participants", region_id);
            return Err(DomainError::conflict(
                "Region is assigned to registered participants",
            ));
        }

        self.region_repository.delete_region(region_id).await?;
        info!("Deleted region {}", region_id);
        Ok(())
    }

    pub async fn create_majlis(&self, command: CreateMajlisCommand) -> Result<Majlis> {
        let name = required_name(&command.name, "Majlis")?;
        let region_id = command.region_id.trim().to_string();
        if self.region_repository.get_region(&region_id).await?.is_none() {
            return Err(DomainError::validation(format!(
                "Region {} does not exist",
                region_id
            )));
        }

        let majlis = Majlis {
            id: Majlis::generate_id(),
            region_id,
            code: resolve_code(command.code.as_deref(), &name),
            name,
        };
        self.region_repository.store_majlis(&majlis).await?;

        info!("Created majlis {} in region {}", majlis.name, majlis.region_id);
        Ok(majlis)
    }

    pub async fn update_majlis(&self, majlis_id: &str, command: UpdateMajlisCommand) -> Result<Majlis> {
        let mut majlis = self
            .region_repository
            .get_majlis(majlis_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Majlis {}", majlis_id)))?;

        let name = required_name(&command.name, "Majlis")?;

        if let Some(code) = command.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            majlis.code = code.to_string();
        }
        majlis.name = name;

        if !self.region_repository.update_majlis(&majlis).await? {
            return Err(DomainError::not_found(format!("Majlis {}", majlis_id)));
        }
        info!("Updated majlis {}", majlis.id);
        Ok(majlis)
    }

    pub async fn delete_majlis(&self, majlis_id: &str) -> Result<()> {
        if self.region_repository.get_majlis(majlis_id).await?.is_none() {
            return Err(DomainError::not_found(format!("Majlis {}", majlis_id)));
        }

        let participants = self.participant_repository.list_participants().await?;
        if participants.iter().any(|p| p.majlis_id == majlis_id) {
            warn!("Refusing to delete majlis {} with participants", majlis_id);
            return Err(DomainError::conflict(
                "Majlis is assigned to registered participants",
            ));
        }

        self.region_repository.delete_majlis(majlis_id).await?;
        info!("Deleted majlis {}", majlis_id);
        Ok(())
    }
}
