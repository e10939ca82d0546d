//! Ordered works paginator.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::entity::{EntityKind, EntityRef, ResolvedRecord, strip_uri_prefix};
use crate::error::{Result, ScholarError};
use crate::listing::ListingWalker;
use crate::network::CancelToken;
use crate::resolve::Resolver;
use crate::store::{PersonalWorkOrder, WorkOrderStore};

use super::{DisplayMode, WorkEntry, WorksPage};

/// Pages through an author's works in their stored display order.
#[derive(Clone)]
pub struct WorksPaginator {
    resolver: Resolver,
    orders: Arc<dyn WorkOrderStore>,
    walker: ListingWalker,
}

impl WorksPaginator {
    pub fn new(resolver: Resolver, orders: Arc<dyn WorkOrderStore>) -> Self {
        let walker = ListingWalker::new(resolver.lookup().catalog().clone());
        Self {
            resolver,
            orders,
            walker,
        }
    }

    /// Use a specific listing walker for seeding.
    pub fn with_walker(mut self, walker: ListingWalker) -> Self {
        self.walker = walker;
        self
    }

    /// One page (1-based) of an author's works.
    ///
    /// Rows are ordered by `top` descending, then `place` ascending. Works
    /// that do not resolve become `find = false` placeholders.
    pub fn page_works(
        &self,
        author_id: &str,
        page: usize,
        page_size: usize,
        display: DisplayMode,
    ) -> Result<WorksPage> {
        if page == 0 || page_size == 0 {
            return Err(ScholarError::InvalidRequest(format!(
                "page and page_size must be at least 1 (got page={}, page_size={})",
                page, page_size
            )));
        }

        let entity = EntityRef::parse_as(EntityKind::Author, author_id)?;
        let author = self.resolver.resolve_ref(&entity)?;

        let mut rows = self.orders.orders_for(author.id())?;
        if rows.is_empty() {
            rows = self.seed_orders(&author)?;
        }
        if display == DisplayMode::Visible {
            rows.retain(|row| !row.ignore);
        }
        rows.sort_by(|a, b| b.top.cmp(&a.top).then(a.place.cmp(&b.place)));

        let total_count = rows.len();
        if total_count == 0 {
            return Ok(WorksPage::default());
        }
        let total_pages = total_count.div_ceil(page_size);
        if page > total_pages {
            return Err(ScholarError::PageOutOfRange { page, total_pages });
        }

        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total_count);
        let slice = &rows[start..end];

        let ids: Vec<&str> = slice
            .iter()
            .map(|row| strip_uri_prefix(&row.work_id))
            .filter(|id| match EntityRef::parse_as(EntityKind::Work, id) {
                Ok(_) => true,
                Err(e) => {
                    warn!(author = author.id(), work = %id, error = %e, "Skipping unusable work id");
                    false
                }
            })
            .collect();
        let pool = self.resolver.resolve_many(EntityKind::Work, &ids)?.into_records();

        Ok(WorksPage {
            entries: reorder(slice, pool),
            total_pages,
            total_count,
        })
    }

    /// Create ordering rows from the author's catalog listing and persist them.
    fn seed_orders(&self, author: &ResolvedRecord) -> Result<Vec<PersonalWorkOrder>> {
        let Some(url) = author.str_field("works_api_url") else {
            debug!(author = author.id(), "No works listing to seed from");
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let rows: Vec<PersonalWorkOrder> = self
            .walker
            .fetch_all(url, &CancelToken::new())?
            .iter()
            .filter_map(|work| work.get("id")?.as_str().map(strip_uri_prefix))
            .filter(|id| seen.insert(id.to_string()))
            .enumerate()
            .map(|(place, work_id)| PersonalWorkOrder::new(author.id(), work_id, place as i64))
            .collect();

        info!(author = author.id(), works = rows.len(), "Seeded personal works");
        if let Err(e) = self.orders.insert_orders(rows.clone()) {
            warn!(author = author.id(), error = %e, "Failed to persist seeded works");
        }
        Ok(rows)
    }
}

/// Put resolved records back into row order. Each record is used at most once.
fn reorder(rows: &[PersonalWorkOrder], mut pool: Vec<ResolvedRecord>) -> Vec<WorkEntry> {
    rows.iter()
        .map(|row| {
            let work_id = strip_uri_prefix(&row.work_id).to_string();
            let record = pool
                .iter()
                .position(|r| r.id() == work_id)
                .map(|i| pool.remove(i));
            if record.is_none() {
                debug!(work = %work_id, "Work did not resolve, using placeholder");
            }

            WorkEntry {
                find: record.is_some(),
                top: row.top,
                pdf: row.pdf.clone(),
                has_pdf: row.has_pdf(),
                record,
                work_id,
            }
        })
        .collect()
}
