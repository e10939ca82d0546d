//! JSON file-backed store.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{Result, ScholarError};

use super::memory::{StoreData, lock};
use super::types::{PersonalWorkOrder, WorkView};
use super::{ViewCounter, WorkOrderStore};

/// Store persisted as a single JSON document, rewritten after every change.
///
/// ```no_run
/// # use scholar::store::{JsonFileStore, ViewCounter};
/// let store = JsonFileStore::open("scholar-store.json").unwrap();
/// store.record_view("W2741809807", "The state of OA").unwrap();
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<StoreData>,
}

impl JsonFileStore {
    /// Open a store, starting empty if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            load(&path)?
        } else {
            StoreData::default()
        };

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut StoreData) -> T) -> Result<T> {
        let mut data = lock(&self.data)?;
        let out = f(&mut data);
        save(&self.path, &data)?;
        Ok(out)
    }
}

fn load(path: &Path) -> Result<StoreData> {
    let file = File::open(path).map_err(|e| {
        ScholarError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        ScholarError::Persistence(format!(
            "Failed to parse store '{}': {}",
            path.display(),
            e
        ))
    })
}

fn save(path: &Path, data: &StoreData) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                ScholarError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|e| {
        ScholarError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
    })?;

    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, data).map_err(|e| {
        ScholarError::Persistence(format!("Failed to serialize store: {}", e))
    })?;

    debug!(path = %path.display(), "Store saved");
    Ok(())
}

impl ViewCounter for JsonFileStore {
    fn record_view(&self, work_id: &str, title: &str) -> Result<WorkView> {
        self.mutate(|data| data.record_view(work_id, title))
    }

    fn views(&self, work_id: &str) -> Result<Option<WorkView>> {
        Ok(lock(&self.data)?.views.get(work_id).cloned())
    }

    fn top_viewed(&self, n: usize) -> Result<Vec<WorkView>> {
        Ok(lock(&self.data)?.top_viewed(n))
    }
}

impl WorkOrderStore for JsonFileStore {
    fn orders_for(&self, author_id: &str) -> Result<Vec<PersonalWorkOrder>> {
        Ok(lock(&self.data)?.orders_for(author_id))
    }

    fn orders_for_work(&self, work_id: &str) -> Result<Vec<PersonalWorkOrder>> {
        Ok(lock(&self.data)?.orders_for_work(work_id))
    }

    fn insert_orders(&self, orders: Vec<PersonalWorkOrder>) -> Result<()> {
        self.mutate(|data| data.upsert_orders(orders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("store.json")).unwrap();
        assert!(store.orders_for("A1").unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_changes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            store.record_view("W1", "Title").unwrap();
            store.record_view("W1", "Title").unwrap();
            store
                .insert_orders(vec![PersonalWorkOrder::new("A1", "W1", 0).with_pdf("a.pdf")])
                .unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.views("W1").unwrap().unwrap().views, 2);
        let hot = reopened.top_viewed(10).unwrap();
        assert_eq!(hot.len(), 1);
        assert_eq!(hot[0].work_title, "Title");
        let rows = reopened.orders_for("A1").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pdf, "a.pdf");
        assert_eq!(rows[0].top, -1);
    }

    #[test]
    fn test_corrupt_file_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        match JsonFileStore::open(&path) {
            Err(ScholarError::Persistence(msg)) => assert!(msg.contains("Failed to parse")),
            other => panic!("Expected Persistence error, got {:?}", other),
        }
    }
}
