//! Domain models for regions, majlis and the id lookup table between them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub code: String,
}

impl Region {
    pub fn generate_id() -> String {
        format!("region::{}", Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Majlis {
    pub id: String,
    pub region_id: String,
    pub name: String,
    pub code: String,
}

impl Majlis {
    pub fn generate_id() -> String {
        format!("majlis::{}", Uuid::new_v4())
    }
}

/// Region together with the majlis that belong to it
#[derive(Debug, Clone, PartialEq)]
pub struct RegionWithMajlis {
    pub region: Region,
    pub majlis: Vec<Majlis>,
}

/// Resolves region and majlis ids to names.
///
/// Participants hold ids only, so a rename is visible everywhere as soon as
/// a fresh directory is built.
#[derive(Debug, Clone, Default)]
pub struct RegionDirectory {
    regions: HashMap<String, Region>,
    majlis: HashMap<String, Majlis>,
}

impl RegionDirectory {
    pub fn new(regions: Vec<Region>, majlis: Vec<Majlis>) -> Self {
        Self {
            regions: regions.into_iter().map(|r| (r.id.clone(), r)).collect(),
            majlis: majlis.into_iter().map(|m| (m.id.clone(), m)).collect(),
        }
    }

    pub fn region(&self, region_id: &str) -> Option<&Region> {
        self.regions.get(region_id)
    }

    pub fn majlis(&self, majlis_id: &str) -> Option<&Majlis> {
        self.majlis.get(majlis_id)
    }

    pub fn region_name(&self, region_id: &str) -> Option<&str> {
        self.region(region_id).map(|r| r.name.as_str())
    }

    pub fn majlis_name(&self, majlis_id: &str) -> Option<&str> {
        self.majlis(majlis_id).map(|m| m.name.as_str())
    }

    /// True when the majlis exists and is owned by the region
    pub fn majlis_belongs_to(&self, majlis_id: &str, region_id: &str) -> bool {
        self.majlis(majlis_id)
            .map(|m| m.region_id == region_id)
            .unwrap_or(false)
    }
}
