//! Local search index trait and the in-process implementation.

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::{RwLock, RwLockReadGuard};
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Map, Value};
use tracing::debug;

use crate::entity::{EntityKind, EntityRef};
use crate::error::{Result, ScholarError};
use crate::schema::{project, schema_for};

/// Local search index holding pre-projected documents, one collection per kind.
pub trait SearchIndex: Send + Sync {
    /// Point lookup by bare id. `Ok(None)` is a miss.
    fn get(&self, entity: &EntityRef) -> Result<Option<Map<String, Value>>>;

    /// Multi-get by bare ids. Misses are absent from the result; order is unspecified.
    fn multi_get(&self, kind: EntityKind, ids: &[String]) -> Result<Vec<Map<String, Value>>>;

    /// Name of this index (for logging).
    fn name(&self) -> &str;
}

/// In-process index, loadable from a JSON-lines snapshot.
///
/// Documents are projected on insert, the same way the ingestion pipeline
/// filters them before loading a real index.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    docs: RwLock<HashMap<EntityRef, Map<String, Value>>>,
    unavailable: AtomicBool,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one raw document; its kind comes from its `id`.
    pub fn insert(&self, doc: Value) -> Result<EntityRef> {
        let Value::Object(doc) = doc else {
            return Err(ScholarError::InvalidRequest(
                "index document must be a JSON object".to_string(),
            ));
        };
        let raw_id = doc.get("id").and_then(Value::as_str).ok_or_else(|| {
            ScholarError::InvalidRequest("index document has no string 'id'".to_string())
        })?;
        let entity = EntityRef::parse(raw_id)?;

        let projected = project(doc, schema_for(entity.kind()));
        self.docs
            .write()
            .map_err(|_| ScholarError::Persistence("index lock poisoned".to_string()))?
            .insert(entity.clone(), projected);
        Ok(entity)
    }

    /// Load a JSON-lines snapshot: one document per line, blank lines ignored.
    pub fn from_jsonl(reader: impl BufRead) -> Result<Self> {
        let index = Self::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                ScholarError::Persistence(format!("Failed to read line {}: {}", line_no + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: Value = serde_json::from_str(&line)?;
            index.insert(doc)?;
        }
        debug!(documents = index.len(), "Loaded index snapshot");
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.docs.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every lookup fail, as a down backend would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ScholarError::UpstreamUnavailable(
                "memory index marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<EntityRef, Map<String, Value>>>> {
        self.docs
            .read()
            .map_err(|_| ScholarError::Persistence("index lock poisoned".to_string()))
    }
}

impl SearchIndex for MemoryIndex {
    fn get(&self, entity: &EntityRef) -> Result<Option<Map<String, Value>>> {
        self.check_available()?;
        Ok(self.read()?.get(entity).cloned())
    }

    fn multi_get(&self, kind: EntityKind, ids: &[String]) -> Result<Vec<Map<String, Value>>> {
        self.check_available()?;
        let docs = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| {
                let entity = EntityRef::parse_as(kind, id).ok()?;
                docs.get(&entity).cloned()
            })
            .collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
