//! Persisted collaborators: per-work view counters and personal work ordering rows.
//!
//! Both are owned by the surrounding application; this layer only needs the
//! narrow read/upsert operations below. `MemoryStore` and `JsonFileStore`
//! make the layer usable on its own.

mod file;
mod memory;
mod types;

pub use file::JsonFileStore;
pub use memory::{MemoryStore, StoreData};
pub use types::{NOT_PINNED, PersonalWorkOrder, WorkView};

use crate::error::Result;

/// Per-work view counter.
pub trait ViewCounter: Send + Sync {
    /// Record one view: create the row with one view, or increment it.
    fn record_view(&self, work_id: &str, title: &str) -> Result<WorkView>;

    /// Current counter row for a work.
    fn views(&self, work_id: &str) -> Result<Option<WorkView>>;

    /// The `n` most-viewed works, most views first. Ties keep first-viewed order.
    fn top_viewed(&self, n: usize) -> Result<Vec<WorkView>>;
}

/// Personal work ordering rows.
pub trait WorkOrderStore: Send + Sync {
    /// All rows for an author, in storage order.
    fn orders_for(&self, author_id: &str) -> Result<Vec<PersonalWorkOrder>>;

    /// All rows referencing a work (any author).
    fn orders_for_work(&self, work_id: &str) -> Result<Vec<PersonalWorkOrder>>;

    /// Upsert rows keyed by (author, work).
    fn insert_orders(&self, orders: Vec<PersonalWorkOrder>) -> Result<()>;
}
