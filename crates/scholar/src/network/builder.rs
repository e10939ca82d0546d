//! Builds an author's collaboration network from their works listing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::entity::{EntityKind, EntityRef};
use crate::error::Result;
use crate::listing::{DEFAULT_MAX_IN_FLIGHT, DEFAULT_PER_PAGE, ListingWalker};
use crate::resolve::Resolver;
use crate::schema::{project, schema_for};

use super::cancel::CancelToken;
use super::graph::{CoauthorTally, CollaborationGraph};

/// Settings for [`NetworkBuilder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Edges kept after pruning.
    pub top_n: usize,
    /// Works per listing page.
    pub per_page: usize,
    /// Listing pages fetched at the same time.
    pub max_in_flight: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            per_page: DEFAULT_PER_PAGE,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

/// Builds pruned co-authorship graphs.
#[derive(Clone)]
pub struct NetworkBuilder {
    resolver: Resolver,
    config: NetworkConfig,
}

impl NetworkBuilder {
    pub fn new(resolver: Resolver) -> Self {
        Self::with_config(resolver, NetworkConfig::default())
    }

    pub fn with_config(resolver: Resolver, config: NetworkConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Build the network around an author.
    pub fn build(&self, author_id: &str) -> Result<CollaborationGraph> {
        self.build_with_cancel(author_id, &CancelToken::new())
    }

    /// Build the network, aborting with `Cancelled` once `cancel` fires.
    pub fn build_with_cancel(
        &self,
        author_id: &str,
        cancel: &CancelToken,
    ) -> Result<CollaborationGraph> {
        let entity = EntityRef::parse_as(EntityKind::Author, author_id)?;
        let seed = self.resolver.resolve_ref(&entity)?;
        let name = seed.display_name().unwrap_or(seed.id());

        let mut tally = CoauthorTally::new(seed.id(), name);
        match seed.str_field("works_api_url") {
            Some(url) => {
                for work in self.fetch_all_works(url, cancel)? {
                    tally.add_work(&work);
                }
            }
            None => debug!(author = seed.id(), "No works listing, graph is the seed alone"),
        }

        let coauthors = tally.coauthor_count();
        let graph = tally.into_graph(self.config.top_n);
        info!(
            author = seed.id(),
            coauthors,
            edges = graph.edges.len(),
            vertices = graph.vertices.len(),
            "Collaboration network built"
        );
        Ok(graph)
    }

    /// Every work in a listing, in page order, reduced to `id`, `title` and
    /// `authorships` and projected.
    pub fn fetch_all_works(
        &self,
        works_api_url: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<Map<String, Value>>> {
        let walker = ListingWalker::new(self.resolver.lookup().catalog().clone())
            .with_per_page(self.config.per_page)
            .with_max_in_flight(self.config.max_in_flight);

        Ok(walker
            .fetch_all(works_api_url, cancel)?
            .into_iter()
            .map(reduce_work)
            .collect())
    }
}

/// Keep only what the graph needs from a listed work, then project it.
fn reduce_work(mut work: Map<String, Value>) -> Map<String, Value> {
    work.retain(|key, _| matches!(key.as_str(), "id" | "title" | "authorships"));
    project(work, schema_for(EntityKind::Work))
}
