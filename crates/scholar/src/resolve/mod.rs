//! Object resolution through a local search index with a remote catalog fallback.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scholar::resolve::{MemoryIndex, OpenAlexCatalog, Resolver, TieredLookup};
//!
//! let lookup = TieredLookup::new(
//!     Arc::new(MemoryIndex::new()),
//!     Arc::new(OpenAlexCatalog::new().unwrap()),
//! );
//! let record = Resolver::new(lookup).resolve("W2741809807").unwrap();
//! println!("{:?}", record.title());
//! ```

mod catalog;
mod elastic;
mod index;
mod mock;
mod openalex;
mod resolver;
mod tiered;

pub use catalog::{Catalog, ListingPage};
pub use elastic::{DEFAULT_INDEX_URL, ElasticIndex, IndexConfig};
pub use index::{MemoryIndex, SearchIndex};
pub use mock::MockCatalog;
pub use openalex::{CatalogConfig, DEFAULT_CATALOG_URL, OpenAlexCatalog};
pub use resolver::{BatchResult, MissingIdPolicy, Resolver, ResolverConfig};
pub use tiered::{DEFAULT_BATCH_CHUNK, TieredLookup};
