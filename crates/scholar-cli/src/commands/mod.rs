//! CLI command implementations.

pub mod cite;
pub mod get;
pub mod hot;
pub mod network;
pub mod serve;
pub mod works;

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use scholar::resolve::{
    Catalog, ElasticIndex, IndexConfig, MemoryIndex, MockCatalog, OpenAlexCatalog, SearchIndex,
};
use scholar::store::{JsonFileStore, MemoryStore};
use scholar::{Scholar, ScholarConfig};
use tracing::debug;

use crate::cli::BackendArgs;

/// Build a [`Scholar`] from `SCHOLAR_*` variables overridden by CLI flags.
pub fn build_scholar(
    args: &BackendArgs,
    config: ScholarConfig,
) -> Result<Scholar, Box<dyn std::error::Error>> {
    let config = apply_flags(args, config);

    let catalog: Arc<dyn Catalog> = if args.offline {
        match &args.catalog_snapshot {
            Some(path) => Arc::new(MockCatalog::from_jsonl(BufReader::new(File::open(path)?))?),
            None => Arc::new(MockCatalog::new()),
        }
    } else {
        Arc::new(OpenAlexCatalog::with_config(config.catalog.clone())?)
    };

    let index: Arc<dyn SearchIndex> = match (&args.index_snapshot, &config.index) {
        (Some(path), _) => Arc::new(MemoryIndex::from_jsonl(BufReader::new(File::open(path)?))?),
        (None, Some(index)) => Arc::new(ElasticIndex::new(index.clone())?),
        (None, None) => Arc::new(MemoryIndex::new()),
    };
    debug!(catalog = catalog.name(), index = index.name(), "Backends ready");

    Ok(match &args.store {
        Some(path) => {
            let store = Arc::new(JsonFileStore::open(path)?);
            Scholar::with_backends(config, index, catalog, store)
        }
        None => Scholar::with_backends(config, index, catalog, Arc::new(MemoryStore::new())),
    })
}

fn apply_flags(args: &BackendArgs, mut config: ScholarConfig) -> ScholarConfig {
    if let Some(url) = &args.catalog_url {
        config.catalog.base_url = url.clone();
    }
    if let Some(mailto) = &args.mailto {
        config.catalog.mailto = Some(mailto.clone());
    }
    if let Some(url) = &args.index_url {
        let index = config.index.get_or_insert_with(IndexConfig::default);
        index.url = url.clone();
    }
    if let Some(secs) = args.timeout {
        config.set_timeout(Duration::from_secs(secs));
    }
    config
}
