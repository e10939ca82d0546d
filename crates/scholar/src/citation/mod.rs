//! Citation strings for works: MLA, APA, GB (GB/T 7714) and the short
//! form used in reference lists.
//!
//! All formatters are pure functions of a resolved work record and never
//! fail; absent fields simply drop their segment.

mod styles;

use serde::{Deserialize, Serialize};

use crate::entity::ResolvedRecord;

pub use styles::{apa, gb, mla, short};

/// The three citation styles for one work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationSet {
    pub mla: String,
    pub apa: String,
    pub gb: String,
}

/// Publication type, as far as the GB style cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Journal,
    Conference,
    Book,
    Other,
}

impl WorkType {
    /// Classify a catalog `type` string (`journal-article`, `proceedings`, ...).
    pub fn classify(raw: &str) -> Self {
        let raw = raw.to_ascii_lowercase();
        if raw.contains("journal") {
            WorkType::Journal
        } else if raw.contains("conference") || raw.contains("proceedings") {
            WorkType::Conference
        } else if raw.contains("book") {
            WorkType::Book
        } else {
            WorkType::Other
        }
    }

    /// GB/T 7714 document type marker.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            WorkType::Journal => Some("[J]"),
            WorkType::Conference => Some("[C]"),
            WorkType::Book => Some("[M]"),
            WorkType::Other => None,
        }
    }
}

/// The parts of a work record the formatters read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkFacts<'a> {
    pub authors: Vec<&'a str>,
    pub title: &'a str,
    pub venue: Option<&'a str>,
    pub publisher: Option<&'a str>,
    pub year: Option<i64>,
    pub work_type: WorkType,
}

impl<'a> WorkFacts<'a> {
    /// Extract citation facts from a work record.
    pub fn from_record(work: &'a ResolvedRecord) -> Self {
        let venue = work
            .str_path(&["host_venue", "display_name"])
            .or_else(|| work.str_path(&["primary_location", "source", "display_name"]));
        let publisher = work.str_path(&["host_venue", "publisher"]).or_else(|| {
            work.str_path(&["primary_location", "source", "host_organization_name"])
        });

        Self {
            authors: work.author_names(),
            title: work.title().unwrap_or_default(),
            venue,
            publisher,
            year: work.i64_field("publication_year"),
            work_type: work
                .str_field("type")
                .map(WorkType::classify)
                .unwrap_or(WorkType::Other),
        }
    }
}

/// Format all three citation styles for a work.
pub fn format_citations(work: &ResolvedRecord) -> CitationSet {
    let facts = WorkFacts::from_record(work);
    CitationSet {
        mla: mla(&facts),
        apa: apa(&facts),
        gb: gb(&facts),
    }
}

/// Compact citation used when listing a work's references.
pub fn short_citation(work: &ResolvedRecord) -> String {
    short(&WorkFacts::from_record(work))
}
