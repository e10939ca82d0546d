//! Entity identifiers and resolved records.

mod kind;
mod record;

pub use kind::{EntityKind, EntityRef, OPENALEX_PREFIX, strip_uri_prefix};
pub use record::{Origin, ResolvedRecord};
