//! CSV connection: owns the data directory and serializes every write.

use anyhow::{anyhow, Context, Result};
use csv::{Reader, Writer};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{
    AcademicRecordRepository, ContributionRepository, EventSettingsRepository,
    ParticipantRepository, RegionRepository,
};
use crate::backend::storage::traits::Connection;

const EXPORTS_DIRECTORY: &str = "exports";

/// CsvConnection manages the data directory shared by all repositories.
///
/// Each entity kind lives in one CSV file. A write reads the whole file,
/// modifies it in memory and replaces it atomically through a temp file,
/// all while holding `write_lock`. Read-modify-write cycles from different
/// requests therefore never interleave.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Default destination for exported documents
    pub fn exports_directory(&self) -> PathBuf {
        self.base_directory.join(EXPORTS_DIRECTORY)
    }

    /// Read every row of a CSV file. A missing file holds no rows.
    pub fn read_rows<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.file_path(file_name);
        if !path.exists() {
            debug!("{} does not exist yet, returning no rows", path.display());
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: T =
                result.with_context(|| format!("Malformed row in {}", path.display()))?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Read, modify and rewrite a CSV file as one serialized step
    pub fn update_rows<T, R, F>(&self, file_name: &str, modify: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> Result<R>,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("CSV write lock poisoned"))?;

        let mut rows = self.read_rows::<T>(file_name)?;
        let result = modify(&mut rows)?;
        self.write_rows(file_name, &rows)?;
        Ok(result)
    }

    /// Replace a file atomically. Callers must hold `write_lock`.
    fn write_rows<T: Serialize>(&self, file_name: &str, rows: &[T]) -> Result<()> {
        let path = self.file_path(file_name);
        let temp_path = path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut writer = Writer::from_writer(BufWriter::new(file));
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        fs::rename(&temp_path, &path)?;
        debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }

    /// Atomically replace a text document such as the YAML settings file
    pub fn write_document(&self, file_name: &str, content: &str) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("CSV write lock poisoned"))?;

        let path = self.file_path(file_name);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Remove a document. Returns false if it did not exist.
    pub fn remove_document(&self, file_name: &str) -> Result<bool> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("CSV write lock poisoned"))?;

        let path = self.file_path(file_name);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }
}

impl Connection for CsvConnection {
    type ParticipantRepository = ParticipantRepository;
    type RegionRepository = RegionRepository;
    type AcademicRecordRepository = AcademicRecordRepository;
    type ContributionRepository = ContributionRepository;
    type EventSettingsRepository = EventSettingsRepository;

    fn create_participant_repository(&self) -> Self::ParticipantRepository {
        ParticipantRepository::new(self.clone())
    }

    fn create_region_repository(&self) -> Self::RegionRepository {
        RegionRepository::new(self.clone())
    }

    fn create_academic_record_repository(&self) -> Self::AcademicRecordRepository {
        AcademicRecordRepository::new(self.clone())
    }

    fn create_contribution_repository(&self) -> Self::ContributionRepository {
        ContributionRepository::new(self.clone())
    }

    fn create_event_settings_repository(&self) -> Self::EventSettingsRepository {
        EventSettingsRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        amount: Option<f64>,
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let rows: Vec<Row> = connection.read_rows("missing.csv").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_update_rows_persists_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        connection
            .update_rows::<Row, _, _>("rows.csv", |rows| {
                rows.push(Row { id: "a".into(), amount: Some(1.5) });
                rows.push(Row { id: "b".into(), amount: None });
                Ok(())
            })
            .unwrap();

        let rows: Vec<Row> = connection.read_rows("rows.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].amount, None);
        assert!(!temp_dir.path().join("rows.tmp").exists());
    }

    #[test]
    fn test_failed_update_keeps_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        connection
            .update_rows::<Row, _, _>("rows.csv", |rows| {
                rows.push(Row { id: "a".into(), amount: Some(1.0) });
                Ok(())
            })
            .unwrap();

        let result = connection.update_rows::<Row, (), _>("rows.csv", |rows| {
            rows.clear();
            Err(anyhow!("rejected"))
        });
        assert!(result.is_err());

        let rows: Vec<Row> = connection.read_rows("rows.csv").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_document_write_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        connection.write_document("doc.yaml", "a: 1\n").unwrap();
        assert!(connection.file_path("doc.yaml").exists());
        assert!(connection.remove_document("doc.yaml").unwrap());
        assert!(!connection.remove_document("doc.yaml").unwrap());
    }
}
