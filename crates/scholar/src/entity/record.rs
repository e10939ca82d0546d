//! Resolved records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::kind::{EntityRef, strip_uri_prefix};

/// Where a resolved record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Local search index hit (already projected at ingest time).
    Index,
    /// Remote catalog fallback (projected on the way in).
    RemoteFallback,
}

/// A fully resolved, schema-projected academic object.
///
/// Records are read-only after construction: citation formatting, network
/// building and pagination only ever borrow them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    entity: EntityRef,
    fields: IndexMap<String, Value>,
    origin: Origin,
}

impl ResolvedRecord {
    /// Create a record from projected fields.
    pub fn new(entity: EntityRef, fields: Map<String, Value>, origin: Origin) -> Self {
        Self {
            entity,
            fields: fields.into_iter().collect(),
            origin,
        }
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn id(&self) -> &str {
        self.entity.id()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// All projected fields, in document order.
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// Raw field access.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Follow a path of object keys starting at a top-level field.
    pub fn path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.fields.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        Some(current)
    }

    /// A string field, if present and a non-empty string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// A string at a nested path, if present and non-empty.
    pub fn str_path(&self, path: &[&str]) -> Option<&str> {
        self.path(path)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// An integer field; catalog payloads sometimes encode integers as floats.
    pub fn i64_field(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
    }

    /// The `title` field, falling back to `display_name`.
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
            .or_else(|| self.str_field("display_name"))
    }

    pub fn display_name(&self) -> Option<&str> {
        self.str_field("display_name")
    }

    /// Ids listed in an array field (e.g. `referenced_works`), prefix-stripped.
    pub fn id_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|s| strip_uri_prefix(s).to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Author display names in authorship order. Authorships without a name are skipped.
    pub fn author_names(&self) -> Vec<&str> {
        self.get("authorships")
            .and_then(Value::as_array)
            .map(|authorships| {
                authorships
                    .iter()
                    .filter_map(|a| a.get("author")?.get("display_name")?.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Consume the record into a JSON object (for responses).
    pub fn into_json(self) -> Value {
        Value::Object(self.fields.into_iter().collect())
    }
}
