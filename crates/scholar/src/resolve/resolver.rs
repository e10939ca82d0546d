//! Object resolver: single and batch resolution with the view-count side effect.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::entity::{EntityKind, EntityRef, ResolvedRecord};
use crate::error::Result;
use crate::store::ViewCounter;

use super::tiered::{DEFAULT_BATCH_CHUNK, TieredLookup};

/// What to do with ids a batch query did not return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingIdPolicy {
    /// Leave them missing; the batch is simply partial.
    #[default]
    Ignore,
    /// Resolve each one individually through the two-tier lookup.
    RetryIndividually,
}

/// Resolver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub missing_id_policy: MissingIdPolicy,
    /// Ids per remote batch query.
    pub batch_chunk: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            missing_id_policy: MissingIdPolicy::default(),
            batch_chunk: DEFAULT_BATCH_CHUNK,
        }
    }
}

/// Outcome of a batch resolve. Records are in no particular order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub kind: EntityKind,
    /// Normalized requested ids, in request order.
    pub requested: Vec<String>,
    pub records: Vec<ResolvedRecord>,
}

impl BatchResult {
    fn empty(kind: EntityKind) -> Self {
        Self {
            kind,
            requested: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Requested ids that produced no record, in request order.
    pub fn missing(&self) -> Vec<&str> {
        let found: HashSet<&str> = self.records.iter().map(ResolvedRecord::id).collect();
        self.requested
            .iter()
            .map(String::as_str)
            .filter(|id| !found.contains(id))
            .collect()
    }

    /// Whether some requested ids are missing.
    pub fn is_partial(&self) -> bool {
        !self.missing().is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ResolvedRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn into_records(self) -> Vec<ResolvedRecord> {
        self.records
    }
}

/// Resolves ids to projected records.
#[derive(Clone)]
pub struct Resolver {
    lookup: TieredLookup,
    views: Option<Arc<dyn ViewCounter>>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(lookup: TieredLookup) -> Self {
        Self::with_config(lookup, ResolverConfig::default())
    }

    pub fn with_config(lookup: TieredLookup, config: ResolverConfig) -> Self {
        let lookup = lookup.with_batch_chunk(config.batch_chunk);
        Self {
            lookup,
            views: None,
            config,
        }
    }

    /// Count a view every time a work is resolved on its own.
    pub fn with_view_counter(mut self, views: Arc<dyn ViewCounter>) -> Self {
        self.views = Some(views);
        self
    }

    pub fn lookup(&self) -> &TieredLookup {
        &self.lookup
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve an id, inferring its kind.
    pub fn resolve(&self, id: &str) -> Result<ResolvedRecord> {
        self.resolve_ref(&EntityRef::parse(id)?)
    }

    /// Resolve a typed reference.
    pub fn resolve_ref(&self, entity: &EntityRef) -> Result<ResolvedRecord> {
        let record = self.lookup.lookup(entity)?;
        if entity.kind() == EntityKind::Work {
            self.count_view(&record);
        }
        Ok(record)
    }

    fn count_view(&self, record: &ResolvedRecord) {
        let Some(views) = &self.views else {
            return;
        };
        let title = record.title().unwrap_or_default();
        match views.record_view(record.id(), title) {
            Ok(view) => debug!(work = record.id(), views = view.views, "View recorded"),
            Err(e) => warn!(work = record.id(), error = %e, "Failed to record view"),
        }
    }

    /// Resolve a batch of ids of one kind.
    ///
    /// Every id must parse and be of `kind`. Duplicates are requested once.
    pub fn resolve_many<S: AsRef<str>>(&self, kind: EntityKind, ids: &[S]) -> Result<BatchResult> {
        let mut requested = Vec::with_capacity(ids.len());
        let mut seen = HashSet::new();
        for raw in ids {
            let entity = EntityRef::parse_as(kind, raw.as_ref())?;
            if seen.insert(entity.id().to_string()) {
                requested.push(entity.id().to_string());
            }
        }

        if requested.is_empty() {
            return Ok(BatchResult::empty(kind));
        }

        let records = self.lookup.lookup_many(kind, &requested)?;
        let mut batch = BatchResult {
            kind,
            requested,
            records,
        };

        if self.config.missing_id_policy == MissingIdPolicy::RetryIndividually {
            let missing: Vec<String> = batch.missing().into_iter().map(String::from).collect();
            for id in missing {
                let entity = EntityRef::parse_as(kind, &id)?;
                match self.lookup.lookup(&entity) {
                    Ok(record) => batch.records.push(record),
                    Err(e) => warn!(entity = %entity, error = %e, "Individual retry failed"),
                }
            }
        }

        if batch.is_partial() {
            debug!(
                kind = %kind,
                missing = batch.missing().len(),
                requested = batch.requested.len(),
                "Partial batch"
            );
        }
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Origin;
    use crate::error::ScholarError;
    use crate::resolve::{MemoryIndex, MockCatalog};
    use crate::store::{MemoryStore, WorkView};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counter whose every write fails.
    #[derive(Default)]
    struct BrokenCounter {
        attempts: AtomicUsize,
    }

    impl ViewCounter for BrokenCounter {
        fn record_view(&self, _work_id: &str, _title: &str) -> Result<WorkView> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(ScholarError::Persistence("disk full".to_string()))
        }

        fn views(&self, _work_id: &str) -> Result<Option<WorkView>> {
            Ok(None)
        }

        fn top_viewed(&self, _n: usize) -> Result<Vec<WorkView>> {
            Ok(Vec::new())
        }
    }

    fn resolver(catalog: MockCatalog, config: ResolverConfig) -> (Arc<MockCatalog>, Resolver) {
        let catalog = Arc::new(catalog);
        let lookup = TieredLookup::new(Arc::new(MemoryIndex::new()), catalog.clone());
        (catalog, Resolver::with_config(lookup, config))
    }

    #[test]
    fn test_resolve_counts_work_views() {
        let store = Arc::new(MemoryStore::new());
        let (_, resolver) = resolver(
            MockCatalog::new().with_records([
                json!({"id": "W1", "title": "Paper"}),
                json!({"id": "A1", "display_name": "Ann"}),
            ]),
            ResolverConfig::default(),
        );
        let resolver = resolver.with_view_counter(store.clone());

        resolver.resolve("W1").unwrap();
        resolver.resolve("https://openalex.org/W1").unwrap();
        resolver.resolve("A1").unwrap();

        let view = store.views("W1").unwrap().unwrap();
        assert_eq!(view.views, 2);
        assert_eq!(view.work_title, "Paper");
        assert!(store.views("A1").unwrap().is_none());
    }

    #[test]
    fn test_failing_view_counter_does_not_fail_resolve() {
        let counter = Arc::new(BrokenCounter::default());
        let (_, resolver) = resolver(
            MockCatalog::new().with_record(json!({"id": "W1", "title": "Paper"})),
            ResolverConfig::default(),
        );
        let resolver = resolver.with_view_counter(counter.clone());

        let record = resolver.resolve("W1").unwrap();
        assert_eq!(record.id(), "W1");
        assert_eq!(record.title(), Some("Paper"));
        assert_eq!(counter.attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resolve_unknown_kind() {
        let (catalog, resolver) = resolver(MockCatalog::new(), ResolverConfig::default());
        assert!(matches!(resolver.resolve("X1"), Err(ScholarError::UnknownKind(_))));
        assert!(matches!(resolver.resolve(""), Err(ScholarError::UnknownKind(_))));
        assert_eq!(catalog.fetch_calls(), 0);
    }

    #[test]
    fn test_resolve_many_validates_kind() {
        let (_, resolver) = resolver(MockCatalog::new(), ResolverConfig::default());
        assert!(matches!(
            resolver.resolve_many(EntityKind::Work, &["W1", "A1"]),
            Err(ScholarError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_resolve_many_empty() {
        let (catalog, resolver) = resolver(MockCatalog::new(), ResolverConfig::default());
        let batch = resolver.resolve_many::<&str>(EntityKind::Work, &[]).unwrap();
        assert!(batch.is_empty());
        assert!(!batch.is_partial());
        assert_eq!(catalog.batch_calls(), 0);
    }

    #[test]
    fn test_resolve_many_partial_with_ignore() {
        let (catalog, resolver) = resolver(
            MockCatalog::new()
                .with_records([json!({"id": "W1"}), json!({"id": "W2"})])
                .hide_from_batch("W2"),
            ResolverConfig::default(),
        );

        let batch = resolver
            .resolve_many(EntityKind::Work, &["W1", "W2", "W3", "W1"])
            .unwrap();
        assert_eq!(batch.requested, vec!["W1", "W2", "W3"]);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.missing(), vec!["W2", "W3"]);
        assert!(batch.is_partial());
        assert_eq!(catalog.fetch_calls(), 0);
    }

    #[test]
    fn test_resolve_many_retry_individually() {
        let (catalog, resolver) = resolver(
            MockCatalog::new()
                .with_records([json!({"id": "W1"}), json!({"id": "W2"})])
                .hide_from_batch("W2"),
            ResolverConfig {
                missing_id_policy: MissingIdPolicy::RetryIndividually,
                ..ResolverConfig::default()
            },
        );

        let batch = resolver
            .resolve_many(EntityKind::Work, &["W1", "W2", "W3"])
            .unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.missing(), vec!["W3"]);
        assert_eq!(batch.find("W2").map(|r| r.origin()), Some(Origin::RemoteFallback));
        // W2 and W3 retried one by one
        assert_eq!(catalog.fetch_calls(), 2);
    }

    #[test]
    fn test_resolve_many_remote_failure_fails_batch() {
        let (catalog, resolver) = resolver(MockCatalog::new(), ResolverConfig::default());
        catalog.set_unavailable(true);
        assert!(matches!(
            resolver.resolve_many(EntityKind::Work, &["W1"]),
            Err(ScholarError::UpstreamUnavailable(_))
        ));
    }
}
