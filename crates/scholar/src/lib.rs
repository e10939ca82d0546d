//! Scholar: academic-object resolution and derivation.
//!
//! Turns an opaque OpenAlex-style id (work, author, institution, venue,
//! concept) into a schema-projected record, reading a local search index
//! first and falling back to the remote catalog. On top of resolution it
//! derives citation strings, co-authorship networks and ordered pages of an
//! author's personal works.
//!
//! # Example
//!
//! ```no_run
//! use scholar::Scholar;
//!
//! let scholar = Scholar::new().unwrap();
//! let citations = scholar.citations("W2741809807").unwrap();
//! println!("{}", citations.apa);
//!
//! let graph = scholar.author_network("A2764814280").unwrap();
//! println!("{} collaborators", graph.edges.len());
//! ```

pub mod citation;
pub mod detail;
pub mod entity;
pub mod error;
pub mod listing;
pub mod network;
pub mod resolve;
pub mod schema;
pub mod store;
pub mod works;

mod scholar;

pub use crate::scholar::{DEFAULT_HOT_WORKS, Scholar, ScholarConfig};
pub use citation::{CitationSet, format_citations, short_citation};
pub use detail::ObjectDetail;
pub use entity::{EntityKind, EntityRef, Origin, ResolvedRecord};
pub use error::{Result, ScholarError};
pub use network::{CancelToken, CollaborationGraph};
pub use resolve::{BatchResult, MissingIdPolicy};
pub use works::{DisplayMode, WorksPage};
