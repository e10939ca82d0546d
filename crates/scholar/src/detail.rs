//! Object detail: a resolved record plus the derived data shown with it.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::citation::{CitationSet, format_citations, short_citation};
use crate::entity::{EntityKind, EntityRef, ResolvedRecord};
use crate::error::Result;
use crate::resolve::Resolver;
use crate::store::WorkOrderStore;

/// References rendered with a work.
pub const MAX_REFERENCES: usize = 16;

/// Related works rendered with a work.
pub const MAX_RELATED: usize = 11;

/// Concepts named in an author's default introduction.
const INTRO_CONCEPTS: usize = 4;

/// A referenced work with its short citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceCitation {
    pub id: String,
    pub cited: String,
}

/// A related work summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedWork {
    pub id: String,
    pub title: String,
    pub publication_year: Option<i64>,
    pub host_venue: String,
}

/// Data derived for a work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkDetail {
    pub citations: CitationSet,
    pub referenced_works: Vec<ReferenceCitation>,
    pub related_works: Vec<RelatedWork>,
    pub pdf_links: Vec<String>,
}

/// Data derived for an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorDetail {
    pub intro: String,
}

/// A resolved object with whatever its kind derives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectDetail {
    pub record: ResolvedRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<WorkDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorDetail>,
}

/// Assembles [`ObjectDetail`]s.
#[derive(Clone)]
pub struct DetailAssembler {
    resolver: Resolver,
    orders: Arc<dyn WorkOrderStore>,
    pdf_base_url: Option<String>,
}

impl DetailAssembler {
    pub fn new(resolver: Resolver, orders: Arc<dyn WorkOrderStore>) -> Self {
        Self {
            resolver,
            orders,
            pdf_base_url: None,
        }
    }

    /// Prefix for stored PDF references.
    pub fn with_pdf_base_url(mut self, url: impl Into<String>) -> Self {
        self.pdf_base_url = Some(url.into());
        self
    }

    /// Resolve an object and attach its derived data.
    pub fn get_object(&self, id: &str) -> Result<ObjectDetail> {
        let record = self.resolver.resolve(id)?;
        let (work, author) = match record.entity().kind() {
            EntityKind::Work => (Some(self.work_detail(&record)), None),
            EntityKind::Author => (
                None,
                Some(AuthorDetail {
                    intro: author_intro(&record),
                }),
            ),
            _ => (None, None),
        };

        Ok(ObjectDetail {
            record,
            work,
            author,
        })
    }

    /// Citations, references, related works and PDF links for a work.
    /// Lookup failures here are logged and leave the affected list empty.
    pub fn work_detail(&self, work: &ResolvedRecord) -> WorkDetail {
        let referenced_works = self
            .resolve_listed(work, "referenced_works", MAX_REFERENCES)
            .into_iter()
            .map(|r| ReferenceCitation {
                cited: short_citation(&r),
                id: r.id().to_string(),
            })
            .collect();

        let related_works = self
            .resolve_listed(work, "related_works", MAX_RELATED)
            .into_iter()
            .map(|r| RelatedWork {
                id: r.id().to_string(),
                title: r.title().unwrap_or_default().to_string(),
                publication_year: r.i64_field("publication_year"),
                host_venue: r
                    .str_path(&["host_venue", "display_name"])
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();

        WorkDetail {
            citations: format_citations(work),
            referenced_works,
            related_works,
            pdf_links: self.pdf_links(work),
        }
    }

    /// Resolve the first `limit` ids of a list field, in list order.
    fn resolve_listed(&self, work: &ResolvedRecord, field: &str, limit: usize) -> Vec<ResolvedRecord> {
        let ids: Vec<String> = work
            .id_list(field)
            .into_iter()
            .take(limit)
            .filter(|id| match EntityRef::parse_as(EntityKind::Work, id) {
                Ok(_) => true,
                Err(e) => {
                    warn!(work = work.id(), field, error = %e, "Skipping unusable listed id");
                    false
                }
            })
            .collect();
        if ids.is_empty() {
            return Vec::new();
        }

        match self.resolver.resolve_many(EntityKind::Work, &ids) {
            Ok(batch) => {
                let mut pool = batch.into_records();
                ids.iter()
                    .filter_map(|id| {
                        let i = pool.iter().position(|r| r.id() == id)?;
                        Some(pool.remove(i))
                    })
                    .collect()
            }
            Err(e) => {
                warn!(work = work.id(), field, error = %e, "Failed to resolve listed works");
                Vec::new()
            }
        }
    }

    /// The open-access URL, then one link per stored PDF for this work.
    fn pdf_links(&self, work: &ResolvedRecord) -> Vec<String> {
        let mut links: Vec<String> = work
            .str_path(&["open_access", "oa_url"])
            .map(String::from)
            .into_iter()
            .collect();

        match self.orders.orders_for_work(work.id()) {
            Ok(rows) => links.extend(rows.iter().filter(|r| r.has_pdf()).map(|r| {
                match &self.pdf_base_url {
                    Some(base) => format!("{}/{}", base.trim_end_matches('/'), r.pdf),
                    None => r.pdf.clone(),
                }
            })),
            Err(e) => warn!(work = work.id(), error = %e, "Failed to read stored PDFs"),
        }
        links
    }
}

/// Default self-introduction for an author page.
pub fn author_intro(author: &ResolvedRecord) -> String {
    let name = author.display_name().unwrap_or(author.id());
    let mut intro = format!("I'm {}. ", name);

    if let Some(institution) = author.str_path(&["last_known_institution", "display_name"]) {
        intro.push_str(&format!("I'm currently working at {}. ", institution));
    }
    if let Some(work) = author.str_field("most_cited_work") {
        intro.push_str(&format!(
            "I've post \"{}\", which is my most-cited work. ",
            work
        ));
    }

    let concepts: Vec<&str> = author
        .get("x_concepts")
        .and_then(Value::as_array)
        .map(|concepts| {
            concepts
                .iter()
                .filter_map(|c| c.get("display_name")?.as_str())
                .take(INTRO_CONCEPTS)
                .collect()
        })
        .unwrap_or_default();
    if !concepts.is_empty() {
        intro.push_str(&format!("I'm interested in {}. ", concepts.join(", ")));
    }

    intro.push_str("I'm looking for highly motivate students...");
    intro
}
