//! OpenAlex catalog client.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::entity::{EntityKind, EntityRef};
use crate::error::{Result, ScholarError};

use super::catalog::{Catalog, ListingPage};

/// Default OpenAlex API endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://api.openalex.org";

/// Settings for [`OpenAlexCatalog`].
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the API.
    pub base_url: String,
    /// Contact address sent as `mailto` to join the polite pool.
    pub mailto: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            mailto: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    meta: ListMeta,
    #[serde(default)]
    results: Vec<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct ListMeta {
    #[serde(default)]
    count: usize,
}

/// Remote catalog backed by the OpenAlex REST API.
pub struct OpenAlexCatalog {
    client: Client,
    config: CatalogConfig,
}

impl OpenAlexCatalog {
    /// Create a client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(CatalogConfig::default())
    }

    pub fn with_config(config: CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScholarError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn polite(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.mailto {
            Some(mailto) => request.query(&[("mailto", mailto.as_str())]),
            None => request,
        }
    }

    fn fetch_request(&self, entity: &EntityRef) -> RequestBuilder {
        let url = format!("{}/{}/{}", self.base(), entity.kind().collection(), entity.id());
        self.polite(self.client.get(url))
    }

    fn fetch_many_request(&self, kind: EntityKind, ids: &[String]) -> RequestBuilder {
        let url = format!("{}/{}", self.base(), kind.collection());
        let filter = format!("openalex_id:{}", ids.join("|"));
        let per_page = ids.len().to_string();
        self.polite(
            self.client
                .get(url)
                .query(&[("filter", filter.as_str()), ("per_page", per_page.as_str())]),
        )
    }

    fn works_page_request(&self, works_api_url: &str, page: usize, per_page: usize) -> RequestBuilder {
        let page = page.to_string();
        let per_page = per_page.to_string();
        self.polite(
            self.client
                .get(works_api_url)
                .query(&[("per_page", per_page.as_str()), ("page", page.as_str())]),
        )
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .send()
            .map_err(|e| ScholarError::UpstreamUnavailable(format!("catalog request failed: {}", e)))
    }

    fn list(&self, request: RequestBuilder) -> Result<ListResponse> {
        let response = self.send(request)?;
        if !response.status().is_success() {
            return Err(ScholarError::UpstreamUnavailable(format!(
                "catalog returned {}",
                response.status()
            )));
        }
        response.json().map_err(|e| {
            ScholarError::UpstreamUnavailable(format!("catalog response undecodable: {}", e))
        })
    }
}

impl Catalog for OpenAlexCatalog {
    fn fetch(&self, entity: &EntityRef) -> Result<Map<String, Value>> {
        debug!(entity = %entity, "Fetching from catalog");
        let response = self.send(self.fetch_request(entity))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ScholarError::NotFound {
                kind: entity.kind(),
                id: entity.id().to_string(),
            }),
            status if !status.is_success() => Err(ScholarError::UpstreamUnavailable(format!(
                "catalog returned {} for {}",
                status, entity
            ))),
            _ => response.json().map_err(|e| {
                ScholarError::UpstreamUnavailable(format!("catalog response undecodable: {}", e))
            }),
        }
    }

    fn fetch_many(&self, kind: EntityKind, ids: &[String]) -> Result<Vec<Map<String, Value>>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!(kind = %kind, count = ids.len(), "Batch fetch from catalog");
        Ok(self.list(self.fetch_many_request(kind, ids))?.results)
    }

    fn works_page(&self, works_api_url: &str, page: usize, per_page: usize) -> Result<ListingPage> {
        debug!(url = works_api_url, page, "Fetching works page");
        let body = self.list(self.works_page_request(works_api_url, page, per_page))?;
        Ok(ListingPage {
            count: body.meta.count,
            results: body.results,
        })
    }

    fn name(&self) -> &str {
        "openalex"
    }
}
