//! Remote catalog trait.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::{EntityKind, EntityRef};
use crate::error::Result;

/// One page of a catalog listing (`results` plus `meta.count`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Total number of items across all pages.
    pub count: usize,
    /// Raw, unprojected items on this page.
    pub results: Vec<Map<String, Value>>,
}

impl ListingPage {
    /// Number of pages needed to list `count` items at `per_page` items each.
    pub fn total_pages(&self, per_page: usize) -> usize {
        if per_page == 0 {
            return 0;
        }
        self.count.div_ceil(per_page)
    }
}

/// Remote catalog of academic objects.
///
/// Every method returns raw payloads; projection is the caller's job.
pub trait Catalog: Send + Sync {
    /// Fetch one object. A missing object is `NotFound`; anything else that
    /// goes wrong is `UpstreamUnavailable`.
    fn fetch(&self, entity: &EntityRef) -> Result<Map<String, Value>>;

    /// Fetch many objects of one kind with a single id-set filter query.
    ///
    /// Ids the catalog does not know are silently absent from the result.
    fn fetch_many(&self, kind: EntityKind, ids: &[String]) -> Result<Vec<Map<String, Value>>>;

    /// Fetch one page of a works listing (an author's `works_api_url`).
    fn works_page(&self, works_api_url: &str, page: usize, per_page: usize)
    -> Result<ListingPage>;

    /// Name of this catalog (for logging).
    fn name(&self) -> &str;
}
