//! In-memory store.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScholarError};

use super::types::{PersonalWorkOrder, WorkView};
use super::{ViewCounter, WorkOrderStore};

/// The full contents of a store, as persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub views: IndexMap<String, WorkView>,
    #[serde(default)]
    pub orders: Vec<PersonalWorkOrder>,
}

impl StoreData {
    pub(crate) fn record_view(&mut self, work_id: &str, title: &str) -> WorkView {
        let now = Utc::now();
        let view = self
            .views
            .entry(work_id.to_string())
            .and_modify(|v| {
                v.views += 1;
                v.last_viewed_at = now;
            })
            .or_insert_with(|| WorkView {
                work_id: work_id.to_string(),
                views: 1,
                work_title: title.to_string(),
                last_viewed_at: now,
            });
        view.clone()
    }

    pub(crate) fn top_viewed(&self, n: usize) -> Vec<WorkView> {
        let mut views: Vec<WorkView> = self.views.values().cloned().collect();
        views.sort_by(|a, b| b.views.cmp(&a.views));
        views.truncate(n);
        views
    }

    /// Upsert rows keyed by (author, work); last writer wins.
    pub(crate) fn upsert_orders(&mut self, orders: Vec<PersonalWorkOrder>) {
        for order in orders {
            match self
                .orders
                .iter_mut()
                .find(|o| o.author_id == order.author_id && o.work_id == order.work_id)
            {
                Some(existing) => *existing = order,
                None => self.orders.push(order),
            }
        }
    }

    pub(crate) fn orders_for(&self, author_id: &str) -> Vec<PersonalWorkOrder> {
        self.orders
            .iter()
            .filter(|o| o.author_id == author_id)
            .cloned()
            .collect()
    }

    pub(crate) fn orders_for_work(&self, work_id: &str) -> Vec<PersonalWorkOrder> {
        self.orders
            .iter()
            .filter(|o| o.work_id == work_id)
            .cloned()
            .collect()
    }
}

pub(crate) fn lock(data: &Mutex<StoreData>) -> Result<MutexGuard<'_, StoreData>> {
    data.lock()
        .map_err(|_| ScholarError::Persistence("store lock poisoned".to_string()))
}

/// Store kept entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with ordering rows.
    pub fn with_orders(orders: Vec<PersonalWorkOrder>) -> Self {
        let mut data = StoreData::default();
        data.upsert_orders(orders);
        Self {
            data: Mutex::new(data),
        }
    }

    /// Snapshot of the current contents.
    pub fn snapshot(&self) -> Result<StoreData> {
        Ok(lock(&self.data)?.clone())
    }
}

impl ViewCounter for MemoryStore {
    fn record_view(&self, work_id: &str, title: &str) -> Result<WorkView> {
        Ok(lock(&self.data)?.record_view(work_id, title))
    }

    fn views(&self, work_id: &str) -> Result<Option<WorkView>> {
        Ok(lock(&self.data)?.views.get(work_id).cloned())
    }

    fn top_viewed(&self, n: usize) -> Result<Vec<WorkView>> {
        Ok(lock(&self.data)?.top_viewed(n))
    }
}

impl WorkOrderStore for MemoryStore {
    fn orders_for(&self, author_id: &str) -> Result<Vec<PersonalWorkOrder>> {
        Ok(lock(&self.data)?.orders_for(author_id))
    }

    fn orders_for_work(&self, work_id: &str) -> Result<Vec<PersonalWorkOrder>> {
        Ok(lock(&self.data)?.orders_for_work(work_id))
    }

    fn insert_orders(&self, orders: Vec<PersonalWorkOrder>) -> Result<()> {
        lock(&self.data)?.upsert_orders(orders);
        Ok(())
    }
}
