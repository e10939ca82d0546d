//! Projection schemas and the recursive projector.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::entity::{OPENALEX_PREFIX, strip_uri_prefix};

use super::inverted::reconstruct_text;

/// What to do with one field of a raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    /// Keep the field, rewriting catalog URIs in string values to bare ids.
    Keep,
    /// Delete the field.
    Drop,
    /// The field is an object; project it with the nested schema.
    Nested(ProjectionSchema),
    /// The field is an array of objects; project every element.
    NestedList(ProjectionSchema),
    /// The field is an inverted index (token -> positions); expand it into
    /// plain text stored under `into` and remove the inverted field.
    InvertedText { into: String },
}

/// Ordered set of field rules for one object level.
///
/// Fields the schema does not mention pass through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionSchema {
    rules: IndexMap<String, FieldRule>,
}

impl ProjectionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep(self, field: &str) -> Self {
        self.rule(field, FieldRule::Keep)
    }

    pub fn drop(self, field: &str) -> Self {
        self.rule(field, FieldRule::Drop)
    }

    /// Drop several fields at once.
    pub fn drop_all(self, fields: &[&str]) -> Self {
        fields.iter().fold(self, |schema, f| schema.drop(f))
    }

    pub fn nested(self, field: &str, schema: ProjectionSchema) -> Self {
        self.rule(field, FieldRule::Nested(schema))
    }

    pub fn nested_list(self, field: &str, schema: ProjectionSchema) -> Self {
        self.rule(field, FieldRule::NestedList(schema))
    }

    pub fn inverted_text(self, field: &str, into: &str) -> Self {
        self.rule(
            field,
            FieldRule::InvertedText {
                into: into.to_string(),
            },
        )
    }

    /// Set the rule for a field, replacing any earlier rule for it.
    pub fn rule(mut self, field: &str, rule: FieldRule) -> Self {
        self.rules.insert(field.to_string(), rule);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules.get(field)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Project a raw record with a schema.
///
/// Takes ownership of the record and returns the projected copy. The
/// transform is idempotent: projecting a projected record changes nothing.
pub fn project(mut raw: Map<String, Value>, schema: &ProjectionSchema) -> Map<String, Value> {
    for (field, rule) in schema.rules() {
        match rule {
            FieldRule::Keep => {
                if let Some(value) = raw.get_mut(field) {
                    rewrite_uris(value);
                }
            }
            FieldRule::Drop => remove_field(&mut raw, field),
            FieldRule::Nested(inner) => {
                if let Some(Value::Object(object)) = raw.get_mut(field) {
                    let taken = std::mem::take(object);
                    *object = project(taken, inner);
                }
            }
            FieldRule::NestedList(inner) => {
                if let Some(Value::Array(items)) = raw.get_mut(field) {
                    for item in items.iter_mut() {
                        if let Value::Object(object) = item {
                            let taken = std::mem::take(object);
                            *object = project(taken, inner);
                        }
                    }
                }
            }
            FieldRule::InvertedText { into } => {
                let Some(inverted) = raw.get(field) else {
                    continue;
                };
                let text = inverted.as_object().map(reconstruct_text);
                remove_field(&mut raw, field);
                if let Some(text) = text {
                    raw.insert(into.clone(), Value::String(text));
                }
            }
        }
    }
    raw
}

/// Remove a field without disturbing the order of the remaining ones.
fn remove_field(raw: &mut Map<String, Value>, field: &str) {
    if raw.contains_key(field) {
        raw.retain(|key, _| key != field);
    }
}

/// Strip the catalog URI prefix from a string or from every string in an array.
fn rewrite_uris(value: &mut Value) {
    match value {
        Value::String(s) => strip_in_place(s),
        Value::Array(items) => {
            for item in items.iter_mut() {
                if let Value::String(s) = item {
                    strip_in_place(s);
                }
            }
        }
        _ => {}
    }
}

fn strip_in_place(s: &mut String) {
    if s.starts_with(OPENALEX_PREFIX) {
        *s = strip_uri_prefix(s).to_string();
    }
}
