//! Two-tier lookup: local index first, remote catalog on miss.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::entity::{EntityKind, EntityRef, Origin, ResolvedRecord, strip_uri_prefix};
use crate::error::Result;
use crate::schema::{project, schema_for};

use super::catalog::Catalog;
use super::index::SearchIndex;

/// Ids per remote id-set filter query.
pub const DEFAULT_BATCH_CHUNK: usize = 200;

/// Explicit index-then-catalog lookup strategy.
#[derive(Clone)]
pub struct TieredLookup {
    index: Arc<dyn SearchIndex>,
    catalog: Arc<dyn Catalog>,
    batch_chunk: usize,
}

impl TieredLookup {
    pub fn new(index: Arc<dyn SearchIndex>, catalog: Arc<dyn Catalog>) -> Self {
        Self {
            index,
            catalog,
            batch_chunk: DEFAULT_BATCH_CHUNK,
        }
    }

    /// Set how many ids go into one remote batch query (at least one).
    pub fn with_batch_chunk(mut self, chunk: usize) -> Self {
        self.batch_chunk = chunk.max(1);
        self
    }

    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    pub fn index(&self) -> &Arc<dyn SearchIndex> {
        &self.index
    }

    /// Resolve one object. Index errors are logged and treated as a miss.
    pub fn lookup(&self, entity: &EntityRef) -> Result<ResolvedRecord> {
        match self.index.get(entity) {
            Ok(Some(doc)) => {
                debug!(entity = %entity, index = self.index.name(), "Index hit");
                return Ok(ResolvedRecord::new(entity.clone(), doc, Origin::Index));
            }
            Ok(None) => debug!(entity = %entity, "Index miss, falling back to catalog"),
            Err(e) => warn!(
                entity = %entity,
                index = self.index.name(),
                error = %e,
                "Index lookup failed, falling back to catalog"
            ),
        }

        let raw = self.catalog.fetch(entity)?;
        let projected = project(raw, schema_for(entity.kind()));
        Ok(ResolvedRecord::new(
            entity.clone(),
            projected,
            Origin::RemoteFallback,
        ))
    }

    /// Resolve many objects of one kind. Result order is unspecified and ids
    /// neither tier knows are absent.
    pub fn lookup_many(&self, kind: EntityKind, ids: &[String]) -> Result<Vec<ResolvedRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let hits = match self.index.multi_get(kind, ids) {
            Ok(docs) => docs,
            Err(e) => {
                warn!(
                    kind = %kind,
                    index = self.index.name(),
                    error = %e,
                    "Index multi-get failed, treating batch as all-miss"
                );
                Vec::new()
            }
        };

        let mut records: Vec<ResolvedRecord> = hits
            .into_iter()
            .filter_map(|doc| into_record(kind, doc, Origin::Index))
            .collect();

        let found: HashSet<&str> = records.iter().map(ResolvedRecord::id).collect();
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !found.contains(id.as_str()))
            .cloned()
            .collect();
        debug!(
            kind = %kind,
            requested = ids.len(),
            index_hits = records.len(),
            "Batch index pass done"
        );

        for chunk in missing.chunks(self.batch_chunk) {
            let fetched = self.catalog.fetch_many(kind, chunk)?;
            records.extend(fetched.into_iter().filter_map(|raw| {
                let projected = project(raw, schema_for(kind));
                into_record(kind, projected, Origin::RemoteFallback)
            }));
        }

        Ok(records)
    }
}

/// Wrap a projected document, taking the reference from its own `id`.
fn into_record(kind: EntityKind, doc: Map<String, Value>, origin: Origin) -> Option<ResolvedRecord> {
    let raw_id = doc.get("id").and_then(Value::as_str)?;
    match EntityRef::parse_as(kind, strip_uri_prefix(raw_id)) {
        Ok(entity) => Some(ResolvedRecord::new(entity, doc, origin)),
        Err(e) => {
            warn!(error = %e, "Skipping batch document with unusable id");
            None
        }
    }
}
