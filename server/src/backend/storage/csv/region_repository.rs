use anyhow::Result;
use async_trait::async_trait;

use super::connection::CsvConnection;
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::region::{Majlis, Region};
use crate::backend::storage::traits::RegionStorage;

const REGIONS_FILE: &str = "regions.csv";
const MAJLIS_FILE: &str = "majlis.csv";

fn region_name_taken(rows: &[Region], region: &Region) -> bool {
    rows.iter()
        .any(|r| r.id != region.id && r.name.eq_ignore_ascii_case(&region.name))
}

fn majlis_name_taken(rows: &[Majlis], majlis: &Majlis) -> bool {
    rows.iter().any(|m| {
        m.id != majlis.id
            && m.region_id == majlis.region_id
            && m.name.eq_ignore_ascii_case(&majlis.name)
    })
}

fn region_name_conflict(name: &str) -> anyhow::Error {
    DomainError::conflict(format!("Region '{}' already exists", name))
}

fn majlis_name_conflict(name: &str) -> anyhow::Error {
    DomainError::conflict(format!("Majlis '{}' already exists in this region", name))
}

/// CSV-based repository for regions and their majlis
#[derive(Clone)]
pub struct RegionRepository {
    connection: CsvConnection,
}

impl RegionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl RegionStorage for RegionRepository {
    async fn store_region(&self, region: &Region) -> Result<()> {
        self.connection
            .update_rows::<Region, _, _>(REGIONS_FILE, |rows| {
                if rows.iter().any(|r| r.id == region.id) {
                    return Err(DomainError::conflict(format!("Region {} already exists", region.id)));
                }
                if region_name_taken(rows.as_slice(), region) {
                    return Err(region_name_conflict(&region.name));
                }
                rows.push(region.clone());
                Ok(())
            })
    }

    async fn get_region(&self, region_id: &str) -> Result<Option<Region>> {
        let rows: Vec<Region> = self.connection.read_rows(REGIONS_FILE)?;
        Ok(rows.into_iter().find(|r| r.id == region_id))
    }

    async fn list_regions(&self) -> Result<Vec<Region>> {
        let mut rows: Vec<Region> = self.connection.read_rows(REGIONS_FILE)?;
        rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(rows)
    }

    async fn update_region(&self, region: &Region) -> Result<bool> {
        self.connection
            .update_rows::<Region, _, _>(REGIONS_FILE, |rows| {
                if region_name_taken(rows.as_slice(), region) {
                    return Err(region_name_conflict(&region.name));
                }
                match rows.iter_mut().find(|r| r.id == region.id) {
                    Some(existing) => {
                        *existing = region.clone();
                        Ok(true)
                    }
                    None => Ok(false),
                }
            })
    }

    async fn delete_region(&self, region_id: &str) -> Result<bool> {
        self.connection
            .update_rows::<Region, _, _>(REGIONS_FILE, |rows| {
                let before = rows.len();
                rows.retain(|r| r.id != region_id);
                Ok(rows.len() != before)
            })
    }

    async fn store_majlis(&self, majlis: &Majlis) -> Result<()> {
        self.connection
            .update_rows::<Majlis, _, _>(MAJLIS_FILE, |rows| {
                if rows.iter().any(|m| m.id == majlis.id) {
                    return Err(DomainError::conflict(format!("Majlis {} already exists", majlis.id)));
                }
                if majlis_name_taken(rows.as_slice(), majlis) {
                    return Err(majlis_name_conflict(&majlis.name));
                }
                rows.push(majlis.clone());
                Ok(())
            })
    }

    async fn get_majlis(&self, majlis_id: &str) -> Result<Option<Majlis>> {
        let rows: Vec<Majlis> = self.connection.read_rows(MAJLIS_FILE)?;
        Ok(rows.into_iter().find(|m| m.id == majlis_id))
    }

    async fn list_majlis(&self) -> Result<Vec<Majlis>> {
        let mut rows: Vec<Majlis> = self.connection.read_rows(MAJLIS_FILE)?;
        rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(rows)
    }

    async fn update_majlis(&self, majlis: &Majlis) -> Result<bool> {
        self.connection
            .update_rows::<Majlis, _, _>(MAJLIS_FILE, |rows| {
                if majlis_name_taken(rows.as_slice(), majlis) {
                    return Err(majlis_name_conflict(&majlis.name));
                }
                match rows.iter_mut().find(|m| m.id == majlis.id) {
                    Some(existing) => {
                        *existing = majlis.clone();
                        Ok(true)
                    }
                    None => Ok(false),
                }
            })
    }

    async fn delete_majlis(&self, majlis_id: &str) -> Result<bool> {
        self.connection
            .update_rows::<Majlis, _, _>(MAJLIS_FILE, |rows| {
                let before = rows.len();
                rows.retain(|m| m.id != majlis_id);
                Ok(rows.len() != before)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::TestEnvironment;

    #[tokio::test]
    async fn test_regions_and_majlis_listed_by_name() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = RegionRepository::new(env.connection.clone());

        repo.store_region(&Region { id: "r2".into(), name: "Nairobi".into(), code: "NAI".into() })
            .await
            .unwrap();
        repo.store_region(&Region { id: "r1".into(), name: "Kisumu".into(), code: "KIS".into() })
            .await
            .unwrap();
        repo.store_majlis(&Majlis {
            id: "m1".into(),
            region_id: "r2".into(),
            name: "Kibera".into(),
            code: "KIB".into(),
        })
        .await
        .unwrap();

        let regions = repo.list_regions().await.unwrap();
        assert_eq!(regions[0].name, "Kisumu");
        assert_eq!(regions[1].name, "Nairobi");
        assert_eq!(repo.list_majlis().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_region() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = RegionRepository::new(env.connection.clone());

        let mut region = Region { id: "r1".into(), name: "Kisumu".into(), code: "KIS".into() };
        repo.store_region(&region).await.unwrap();

        region.name = "Kisumu West".into();
        assert!(repo.update_region(&region).await.unwrap());
        assert_eq!(repo.get_region("r1").await.unwrap().unwrap().name, "Kisumu West");

        assert!(repo.delete_region("r1").await.unwrap());
        assert!(!repo.delete_region("r1").await.unwrap());
    }

    fn is_conflict(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Conflict(_)))
    }

    #[tokio::test]
    async fn test_names_are_unique_within_the_write() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = RegionRepository::new(env.connection.clone());

        repo.store_region(&Region { id: "r1".into(), name: "Nairobi".into(), code: "NAI".into() })
            .await
            .unwrap();
        let mut other = Region { id: "r2".into(), name: "NAIROBI".into(), code: "NAI".into() };
        let err = repo.store_region(&other).await.unwrap_err();
        assert!(is_conflict(&err));

        other.name = "Mombasa".into();
        repo.store_region(&other).await.unwrap();
        other.name = "nairobi".into();
        let err = repo.update_region(&other).await.unwrap_err();
        assert!(is_conflict(&err));
        assert_eq!(repo.get_region("r2").await.unwrap().unwrap().name, "Mombasa");

        let kibera = |id: &str, region_id: &str| Majlis {
            id: id.into(),
            region_id: region_id.into(),
            name: "Kibera".into(),
            code: "KIB".into(),
        };
        repo.store_majlis(&kibera("m1", "r1")).await.unwrap();
        repo.store_majlis(&kibera("m2", "r2")).await.unwrap();
        let err = repo.store_majlis(&kibera("m3", "r1")).await.unwrap_err();
        assert!(is_conflict(&err));
        assert_eq!(repo.list_majlis().await.unwrap().len(), 2);
    }
}
