//! Mock catalog for testing and offline use.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde_json::{Map, Value};
use tracing::debug;

use crate::entity::{EntityKind, EntityRef, strip_uri_prefix};
use crate::error::{Result, ScholarError};

use super::catalog::{Catalog, ListingPage};

/// Catalog serving canned payloads, with call counters and failure injection.
#[derive(Debug, Default)]
pub struct MockCatalog {
    records: HashMap<String, Map<String, Value>>,
    listings: HashMap<String, Vec<Map<String, Value>>>,
    hidden_from_batch: HashSet<String>,
    failing_pages: HashSet<usize>,
    unavailable: AtomicBool,
    fetch_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    page_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw record, keyed by its (stripped) `id`. Values that are not
    /// objects or carry no id are ignored.
    pub fn with_record(mut self, record: Value) -> Self {
        if let Value::Object(record) = record {
            if let Some(id) = record.get("id").and_then(Value::as_str) {
                let id = strip_uri_prefix(id).to_string();
                self.records.insert(id, record);
            }
        }
        self
    }

    pub fn with_records(self, records: impl IntoIterator<Item = Value>) -> Self {
        records.into_iter().fold(self, Self::with_record)
    }

    /// Load raw records from a JSON-lines snapshot, one record per line.
    ///
    /// Every author carrying a `works_api_url` gets a listing of the works
    /// in the snapshot that name it in their authorships, in file order.
    pub fn from_jsonl(reader: impl BufRead) -> Result<Self> {
        let mut records = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                ScholarError::Persistence(format!("Failed to read line {}: {}", line_no + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str::<Value>(&line)?);
        }

        let mut listings: Vec<(String, Vec<Value>)> = Vec::new();
        for author in &records {
            let Some(id) = author.get("id").and_then(Value::as_str).map(strip_uri_prefix) else {
                continue;
            };
            let Some(url) = author.get("works_api_url").and_then(Value::as_str) else {
                continue;
            };
            let works = records
                .iter()
                .filter(|work| names_author(work, id))
                .cloned()
                .collect();
            listings.push((url.to_string(), works));
        }

        debug!(records = records.len(), listings = listings.len(), "Loaded catalog snapshot");
        let catalog = Self::new().with_records(records);
        Ok(listings
            .into_iter()
            .fold(catalog, |catalog, (url, works)| catalog.with_works(&url, works)))
    }

    /// Register the full works listing served at `works_api_url`.
    pub fn with_works(mut self, works_api_url: &str, works: Vec<Value>) -> Self {
        let works = works
            .into_iter()
            .filter_map(|w| match w {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.listings.insert(works_api_url.to_string(), works);
        self
    }

    /// Leave an id out of batch (`fetch_many`) answers while still serving it
    /// to single fetches.
    pub fn hide_from_batch(mut self, id: &str) -> Self {
        self.hidden_from_batch.insert(id.to_string());
        self
    }

    /// Make one listing page fail with `UpstreamUnavailable`.
    pub fn fail_page(mut self, page: usize) -> Self {
        self.failing_pages.insert(page);
        self
    }

    /// Make every call fail with `UpstreamUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ScholarError::UpstreamUnavailable(
                "mock catalog marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn record_of_kind(&self, kind: EntityKind, id: &str) -> Option<&Map<String, Value>> {
        EntityRef::parse_as(kind, id).ok()?;
        self.records.get(id)
    }
}

fn names_author(work: &Value, author_id: &str) -> bool {
    work.get("authorships")
        .and_then(Value::as_array)
        .is_some_and(|authorships| {
            authorships.iter().any(|a| {
                a.pointer("/author/id")
                    .and_then(Value::as_str)
                    .is_some_and(|id| strip_uri_prefix(id) == author_id)
            })
        })
}

impl Catalog for MockCatalog {
    fn fetch(&self, entity: &EntityRef) -> Result<Map<String, Value>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        self.record_of_kind(entity.kind(), entity.id())
            .cloned()
            .ok_or_else(|| ScholarError::NotFound {
                kind: entity.kind(),
                id: entity.id().to_string(),
            })
    }

    fn fetch_many(&self, kind: EntityKind, ids: &[String]) -> Result<Vec<Map<String, Value>>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(ids
            .iter()
            .filter(|id| !self.hidden_from_batch.contains(id.as_str()))
            .filter_map(|id| self.record_of_kind(kind, id).cloned())
            .collect())
    }

    fn works_page(&self, works_api_url: &str, page: usize, per_page: usize) -> Result<ListingPage> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if self.failing_pages.contains(&page) {
            return Err(ScholarError::UpstreamUnavailable(format!(
                "mock catalog failed page {}",
                page
            )));
        }

        let works = self
            .listings
            .get(works_api_url)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let start = page.saturating_sub(1).saturating_mul(per_page).min(works.len());
        let end = start.saturating_add(per_page).min(works.len());

        Ok(ListingPage {
            count: works.len(),
            results: works[start..end].to_vec(),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
