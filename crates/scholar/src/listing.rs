//! Walks every page of a catalog works listing.

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, ScholarError};
use crate::network::CancelToken;
use crate::resolve::{Catalog, ListingPage};

/// Works per listing page the catalog serves by default.
pub const DEFAULT_PER_PAGE: usize = 25;

/// Pages fetched at the same time by default.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

type PageSlot = Option<Result<ListingPage>>;

/// Fetches a whole listing: page 1 first for the total count, then the
/// remaining pages with bounded parallelism on scoped threads.
#[derive(Clone)]
pub struct ListingWalker {
    catalog: Arc<dyn Catalog>,
    per_page: usize,
    max_in_flight: usize,
}

impl ListingWalker {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            per_page: DEFAULT_PER_PAGE,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Every raw item of the listing, in page order.
    ///
    /// Any page failure fails the whole walk; cancellation is checked before
    /// every page fetch.
    pub fn fetch_all(&self, works_api_url: &str, cancel: &CancelToken) -> Result<Vec<Map<String, Value>>> {
        if cancel.is_cancelled() {
            return Err(ScholarError::Cancelled);
        }
        let first = self.catalog.works_page(works_api_url, 1, self.per_page)?;
        let total_pages = first.total_pages(self.per_page);
        debug!(url = works_api_url, count = first.count, total_pages, "Works listing");

        let mut pages = vec![first];
        if total_pages > 1 {
            pages.extend(self.fetch_pages(works_api_url, 2..=total_pages, cancel)?);
        }

        Ok(pages.into_iter().flat_map(|page| page.results).collect())
    }

    fn fetch_pages(
        &self,
        works_api_url: &str,
        pages: RangeInclusive<usize>,
        cancel: &CancelToken,
    ) -> Result<Vec<ListingPage>> {
        let pages: Vec<usize> = pages.collect();
        let slots: Mutex<Vec<PageSlot>> = Mutex::new((0..pages.len()).map(|_| None).collect());
        let next = AtomicUsize::new(0);
        let abort = CancelToken::new();
        let workers = self.max_in_flight.min(pages.len()).max(1);

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    loop {
                        if cancel.is_cancelled() || abort.is_cancelled() {
                            break;
                        }
                        let i = next.fetch_add(1, Ordering::SeqCst);
                        let Some(&page) = pages.get(i) else {
                            break;
                        };

                        let result = self.catalog.works_page(works_api_url, page, self.per_page);
                        if result.is_err() {
                            abort.cancel();
                        }
                        if let Ok(mut slots) = slots.lock() {
                            slots[i] = Some(result);
                        }
                    }
                });
            }
        });

        if cancel.is_cancelled() {
            return Err(ScholarError::Cancelled);
        }

        let slots = slots
            .into_inner()
            .map_err(|_| ScholarError::UpstreamUnavailable("page worker panicked".to_string()))?;

        // Pages are claimed in order, so every slot before a failure is filled.
        let mut fetched = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot {
                Some(Ok(page)) => fetched.push(page),
                Some(Err(e)) => return Err(e),
                None => return Err(ScholarError::Cancelled),
            }
        }
        Ok(fetched)
    }
}
