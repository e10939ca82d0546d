//! Main Scholar struct and public API.

use std::sync::Arc;
use std::time::Duration;

use crate::citation::{CitationSet, format_citations};
use crate::detail::{DetailAssembler, ObjectDetail};
use crate::entity::{EntityKind, EntityRef, ResolvedRecord};
use crate::error::{Result, ScholarError};
use crate::listing::ListingWalker;
use crate::network::{CancelToken, CollaborationGraph, NetworkBuilder, NetworkConfig};
use crate::resolve::{
    BatchResult, Catalog, CatalogConfig, ElasticIndex, IndexConfig, MemoryIndex, OpenAlexCatalog,
    Resolver, ResolverConfig, SearchIndex, TieredLookup,
};
use crate::store::{MemoryStore, ViewCounter, WorkOrderStore, WorkView};
use crate::works::{DisplayMode, WorksPage, WorksPaginator};

/// Works listed by [`Scholar::hot_works`] when no count is given.
pub const DEFAULT_HOT_WORKS: usize = 10;

/// Configuration for a [`Scholar`] instance.
#[derive(Debug, Clone, Default)]
pub struct ScholarConfig {
    /// Remote catalog settings.
    pub catalog: CatalogConfig,
    /// Elasticsearch settings; `None` uses an empty in-memory index.
    pub index: Option<IndexConfig>,
    pub resolver: ResolverConfig,
    pub network: NetworkConfig,
    /// Prefix for stored PDF references in work details.
    pub pdf_base_url: Option<String>,
}

impl ScholarConfig {
    /// Read configuration from `SCHOLAR_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup function.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = var("SCHOLAR_CATALOG_URL") {
            config.catalog.base_url = url;
        }
        config.catalog.mailto = var("SCHOLAR_CATALOG_MAILTO");

        if let Some(url) = var("SCHOLAR_INDEX_URL") {
            config.index = Some(IndexConfig {
                url,
                username: var("SCHOLAR_INDEX_USER"),
                password: var("SCHOLAR_INDEX_PASSWORD"),
                ..IndexConfig::default()
            });
        }

        if let Some(secs) = var("SCHOLAR_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ScholarError::Config(format!("SCHOLAR_TIMEOUT_SECS must be whole seconds, got '{}'", secs))
            })?;
            config.set_timeout(Duration::from_secs(secs));
        }

        config.pdf_base_url = var("SCHOLAR_PDF_BASE_URL");

        if let Some(n) = var("SCHOLAR_TOP_N") {
            config.network.top_n = n.trim().parse().map_err(|_| {
                ScholarError::Config(format!("SCHOLAR_TOP_N must be a number, got '{}'", n))
            })?;
        }

        Ok(config)
    }

    /// Set the timeout of every remote call.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.catalog.timeout = timeout;
        if let Some(index) = &mut self.index {
            index.timeout = timeout;
        }
    }
}

/// The resolution and derivation engine.
#[derive(Clone)]
pub struct Scholar {
    config: ScholarConfig,
    resolver: Resolver,
    network: NetworkBuilder,
    works: WorksPaginator,
    detail: DetailAssembler,
    views: Arc<dyn ViewCounter>,
}

impl Scholar {
    /// Create an instance with default configuration: the public catalog, an
    /// empty in-memory index and an in-memory store.
    pub fn new() -> Result<Self> {
        Self::from_config(ScholarConfig::default())
    }

    /// Create an instance talking to the configured catalog and index.
    pub fn from_config(config: ScholarConfig) -> Result<Self> {
        let catalog: Arc<dyn Catalog> = Arc::new(OpenAlexCatalog::with_config(config.catalog.clone())?);
        let index: Arc<dyn SearchIndex> = match &config.index {
            Some(index) => Arc::new(ElasticIndex::new(index.clone())?),
            None => Arc::new(MemoryIndex::new()),
        };
        Ok(Self::with_backends(
            config,
            index,
            catalog,
            Arc::new(MemoryStore::new()),
        ))
    }

    /// Create an instance over explicit backends.
    pub fn with_backends<S>(
        config: ScholarConfig,
        index: Arc<dyn SearchIndex>,
        catalog: Arc<dyn Catalog>,
        store: Arc<S>,
    ) -> Self
    where
        S: ViewCounter + WorkOrderStore + 'static,
    {
        let views: Arc<dyn ViewCounter> = store.clone();
        let orders: Arc<dyn WorkOrderStore> = store;

        let lookup = TieredLookup::new(index, catalog.clone());
        let resolver =
            Resolver::with_config(lookup, config.resolver.clone()).with_view_counter(views.clone());

        let network = NetworkBuilder::with_config(resolver.clone(), config.network.clone());
        let walker = ListingWalker::new(catalog)
            .with_per_page(config.network.per_page)
            .with_max_in_flight(config.network.max_in_flight);
        let works = WorksPaginator::new(resolver.clone(), orders.clone()).with_walker(walker);

        let mut detail = DetailAssembler::new(resolver.clone(), orders);
        if let Some(base) = &config.pdf_base_url {
            detail = detail.with_pdf_base_url(base.clone());
        }

        Self {
            config,
            resolver,
            network,
            works,
            detail,
            views,
        }
    }

    pub fn config(&self) -> &ScholarConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve one object; the kind comes from the id prefix.
    pub fn resolve(&self, id: &str) -> Result<ResolvedRecord> {
        self.resolver.resolve(id)
    }

    /// Resolve many objects of one kind.
    pub fn resolve_many<S: AsRef<str>>(&self, kind: EntityKind, ids: &[S]) -> Result<BatchResult> {
        self.resolver.resolve_many(kind, ids)
    }

    /// Resolve an object with its citations, references, network data or intro.
    pub fn get_object(&self, id: &str) -> Result<ObjectDetail> {
        self.detail.get_object(id)
    }

    /// Citation set of a work.
    pub fn citations(&self, work_id: &str) -> Result<CitationSet> {
        let entity = EntityRef::parse_as(EntityKind::Work, work_id)?;
        let work = self.resolver.resolve_ref(&entity)?;
        Ok(format_citations(&work))
    }

    /// Collaboration network of an author.
    pub fn author_network(&self, author_id: &str) -> Result<CollaborationGraph> {
        self.network.build(author_id)
    }

    /// Collaboration network of an author, cancellable from another thread.
    pub fn author_network_with_cancel(
        &self,
        author_id: &str,
        cancel: &CancelToken,
    ) -> Result<CollaborationGraph> {
        self.network.build_with_cancel(author_id, cancel)
    }

    /// One page of an author's personal works.
    pub fn personal_works(
        &self,
        author_id: &str,
        page: usize,
        page_size: usize,
        display: DisplayMode,
    ) -> Result<WorksPage> {
        self.works.page_works(author_id, page, page_size, display)
    }

    /// The `n` most-viewed works.
    pub fn hot_works(&self, n: usize) -> Result<Vec<WorkView>> {
        self.views.top_viewed(n)
    }
}
