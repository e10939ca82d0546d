//! Personal works listings: stored display order applied to resolved works.

mod paginator;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::ResolvedRecord;
use crate::error::ScholarError;

pub use paginator::WorksPaginator;

/// Which ordering rows a listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Hide rows marked `ignore`.
    #[default]
    Visible,
    /// Include every row.
    All,
}

impl FromStr for DisplayMode {
    type Err = ScholarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "visible" => Ok(DisplayMode::Visible),
            "all" => Ok(DisplayMode::All),
            other => Err(ScholarError::InvalidRequest(format!(
                "unknown display mode '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Visible => f.write_str("visible"),
            DisplayMode::All => f.write_str("all"),
        }
    }
}

/// One slot of a works page, in stored display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkEntry {
    pub work_id: String,
    /// Whether the work was resolved.
    pub find: bool,
    pub top: i64,
    pub pdf: String,
    pub has_pdf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ResolvedRecord>,
}

/// One page of an author's personal works.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorksPage {
    pub entries: Vec<WorkEntry>,
    pub total_pages: usize,
    pub total_count: usize,
}

impl WorksPage {
    /// Entries that did not resolve.
    pub fn unresolved(&self) -> impl Iterator<Item = &WorkEntry> {
        self.entries.iter().filter(|e| !e.find)
    }
}
