//! Co-authorship graph types and the tally that builds them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::strip_uri_prefix;

/// Characters of a display name shown as the vertex label.
pub const LABEL_CHARS: usize = 5;

/// One author in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: String,
    /// First five characters of the display name.
    pub label: String,
    /// Full display name.
    pub full: String,
}

impl Vertex {
    pub fn new(id: impl Into<String>, name: &str) -> Self {
        Self {
            id: id.into(),
            label: name.chars().take(LABEL_CHARS).collect(),
            full: name.to_string(),
        }
    }
}

/// A work shared by both ends of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRef {
    pub id: String,
    pub title: String,
}

/// Seed-to-co-author edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Number of co-authored works.
    pub weight: u32,
    /// Rendering width; always equal to `weight`.
    pub width: u32,
    pub works: Vec<WorkRef>,
}

/// Pruned collaboration network around one author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationGraph {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

impl CollaborationGraph {
    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn edge_to(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.to == id)
    }
}

/// Accumulates co-authorship counts for one seed author, in discovery order.
#[derive(Debug, Clone)]
pub struct CoauthorTally {
    seed: String,
    vertices: IndexMap<String, Vertex>,
    edges: IndexMap<String, Edge>,
}

impl CoauthorTally {
    pub fn new(seed_id: &str, seed_name: &str) -> Self {
        let seed = strip_uri_prefix(seed_id).to_string();
        let mut vertices = IndexMap::new();
        vertices.insert(seed.clone(), Vertex::new(seed.clone(), seed_name));
        Self {
            seed,
            vertices,
            edges: IndexMap::new(),
        }
    }

    /// Count every authorship of one work. Authorships without an author id
    /// are skipped.
    pub fn add_work(&mut self, work: &Map<String, Value>) {
        let work_ref = WorkRef {
            id: work
                .get("id")
                .and_then(Value::as_str)
                .map(|id| strip_uri_prefix(id).to_string())
                .unwrap_or_default(),
            title: work
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        };

        let Some(authorships) = work.get("authorships").and_then(Value::as_array) else {
            return;
        };

        for authorship in authorships {
            let Some(author) = authorship.get("author") else {
                continue;
            };
            let Some(author_id) = author.get("id").and_then(Value::as_str) else {
                continue;
            };
            let author_id = strip_uri_prefix(author_id);
            if author_id.is_empty() {
                continue;
            }
            let name = author
                .get("display_name")
                .and_then(Value::as_str)
                .unwrap_or(author_id);

            if !self.vertices.contains_key(author_id) {
                self.vertices
                    .insert(author_id.to_string(), Vertex::new(author_id, name));
            }

            if author_id == self.seed {
                continue;
            }
            match self.edges.get_mut(author_id) {
                Some(edge) => {
                    edge.weight += 1;
                    edge.width += 1;
                    edge.works.push(work_ref.clone());
                }
                None => {
                    self.edges.insert(
                        author_id.to_string(),
                        Edge {
                            from: self.seed.clone(),
                            to: author_id.to_string(),
                            weight: 1,
                            width: 1,
                            works: vec![work_ref.clone()],
                        },
                    );
                }
            }
        }
    }

    /// Distinct co-authors seen so far.
    pub fn coauthor_count(&self) -> usize {
        self.edges.len()
    }

    /// Keep the `top_n` heaviest edges (ties in discovery order) and the
    /// vertices they touch, seed first.
    pub fn into_graph(self, top_n: usize) -> CollaborationGraph {
        let mut edges: Vec<Edge> = self.edges.into_values().collect();
        edges.sort_by(|a, b| b.weight.cmp(&a.weight));
        edges.truncate(top_n);

        let mut vertices: IndexMap<String, Vertex> = IndexMap::new();
        for id in std::iter::once(&self.seed).chain(edges.iter().map(|e| &e.to)) {
            if vertices.contains_key(id) {
                continue;
            }
            if let Some(vertex) = self.vertices.get(id) {
                vertices.insert(id.clone(), vertex.clone());
            }
        }

        CollaborationGraph {
            vertices: vertices.into_values().collect(),
            edges,
        }
    }
}
