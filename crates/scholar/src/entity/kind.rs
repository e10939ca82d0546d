//! Entity kinds and references.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScholarError};

/// URI prefix the catalog puts in front of every entity id.
pub const OPENALEX_PREFIX: &str = "https://openalex.org/";

/// Strip the well-known catalog URI prefix from an id or id-bearing string.
///
/// Repeated prefixes are all removed, so stripping is idempotent.
pub fn strip_uri_prefix(value: &str) -> &str {
    value.trim_start_matches(OPENALEX_PREFIX)
}

/// The kinds of academic objects the catalog knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Work,
    Author,
    Institution,
    Venue,
    Concept,
}

impl EntityKind {
    /// All kinds, in prefix order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Work,
        EntityKind::Author,
        EntityKind::Institution,
        EntityKind::Venue,
        EntityKind::Concept,
    ];

    /// Infer the kind from the first character of a bare id.
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'W' => Some(EntityKind::Work),
            'A' => Some(EntityKind::Author),
            'I' => Some(EntityKind::Institution),
            'V' => Some(EntityKind::Venue),
            'C' => Some(EntityKind::Concept),
            _ => None,
        }
    }

    /// The id prefix character for this kind.
    pub fn prefix(&self) -> char {
        match self {
            EntityKind::Work => 'W',
            EntityKind::Author => 'A',
            EntityKind::Institution => 'I',
            EntityKind::Venue => 'V',
            EntityKind::Concept => 'C',
        }
    }

    /// Name of the search index and of the catalog endpoint for this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Work => "works",
            EntityKind::Author => "authors",
            EntityKind::Institution => "institutions",
            EntityKind::Venue => "venues",
            EntityKind::Concept => "concepts",
        }
    }

    /// Parse a collection name ("works", "authors", ...).
    pub fn from_collection(name: &str) -> Option<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.collection() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Work => "work",
            EntityKind::Author => "author",
            EntityKind::Institution => "institution",
            EntityKind::Venue => "venue",
            EntityKind::Concept => "concept",
        };
        f.write_str(label)
    }
}

/// A typed reference to one academic object.
///
/// Deserializing goes through [`EntityRef::parse_as`], so the stored kind
/// must agree with the id prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEntityRef")]
pub struct EntityRef {
    kind: EntityKind,
    id: String,
}

#[derive(Deserialize)]
struct RawEntityRef {
    kind: EntityKind,
    id: String,
}

impl TryFrom<RawEntityRef> for EntityRef {
    type Error = ScholarError;

    fn try_from(raw: RawEntityRef) -> Result<Self> {
        Self::parse_as(raw.kind, &raw.id)
    }
}

impl EntityRef {
    /// Parse an id (bare or catalog URI), inferring the kind from its prefix.
    pub fn parse(raw: &str) -> Result<Self> {
        let id = strip_uri_prefix(raw.trim());
        let kind = id
            .chars()
            .next()
            .and_then(EntityKind::from_prefix)
            .ok_or_else(|| ScholarError::UnknownKind(raw.to_string()))?;

        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }

    /// Parse an id that must be of the given kind.
    pub fn parse_as(kind: EntityKind, raw: &str) -> Result<Self> {
        let entity = Self::parse(raw)?;
        if entity.kind != kind {
            return Err(ScholarError::KindMismatch {
                expected: kind,
                id: entity.id,
            });
        }
        Ok(entity)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The bare id, without the catalog URI prefix.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
