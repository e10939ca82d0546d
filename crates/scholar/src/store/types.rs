//! Persisted row types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `top` value of a work that is not pinned.
pub const NOT_PINNED: i64 = -1;

/// Display-ordering metadata for one work on an author's page.
///
/// These rows are authoritative for display order and are never rewritten
/// from resolution results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalWorkOrder {
    pub author_id: String,
    pub work_id: String,
    /// Position in the author's list (ascending).
    pub place: i64,
    /// Pin priority; higher values are shown first. `NOT_PINNED` when unpinned.
    #[serde(default = "not_pinned")]
    pub top: i64,
    /// Hidden from the public listing.
    #[serde(default)]
    pub ignore: bool,
    /// Uploaded PDF reference, empty when none.
    #[serde(default)]
    pub pdf: String,
}

fn not_pinned() -> i64 {
    NOT_PINNED
}

impl PersonalWorkOrder {
    pub fn new(author_id: impl Into<String>, work_id: impl Into<String>, place: i64) -> Self {
        Self {
            author_id: author_id.into(),
            work_id: work_id.into(),
            place,
            top: NOT_PINNED,
            ignore: false,
            pdf: String::new(),
        }
    }

    pub fn with_top(mut self, top: i64) -> Self {
        self.top = top;
        self
    }

    pub fn with_ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn with_pdf(mut self, pdf: impl Into<String>) -> Self {
        self.pdf = pdf.into();
        self
    }

    pub fn has_pdf(&self) -> bool {
        !self.pdf.is_empty()
    }
}

/// View counter row for one work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkView {
    pub work_id: String,
    pub views: u64,
    pub work_title: String,
    pub last_viewed_at: DateTime<Utc>,
}
