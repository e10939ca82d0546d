//! Elasticsearch-backed search index.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::entity::{EntityKind, EntityRef};
use crate::error::{Result, ScholarError};

use super::index::SearchIndex;

/// Default Elasticsearch endpoint.
pub const DEFAULT_INDEX_URL: &str = "http://localhost:9200";

/// Connection settings for [`ElasticIndex`].
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Base URL of the cluster.
    pub url: String,
    /// Basic-auth user, if the cluster needs one.
    pub username: Option<String>,
    pub password: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INDEX_URL.to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Search index served by Elasticsearch, one index per entity collection
/// (`works`, `authors`, ...).
pub struct ElasticIndex {
    client: Client,
    config: IndexConfig,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source")]
    source: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct MultiGetResponse {
    #[serde(default)]
    docs: Vec<GetResponse>,
}

impl ElasticIndex {
    pub fn new(config: IndexConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScholarError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    fn url(&self, kind: EntityKind, suffix: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.url.trim_end_matches('/'),
            kind.collection(),
            suffix
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.username {
            Some(user) => request.basic_auth(user, self.config.password.as_deref()),
            None => request,
        }
    }

    fn get_request(&self, entity: &EntityRef) -> RequestBuilder {
        let url = self.url(entity.kind(), &format!("_doc/{}", entity.id()));
        self.authorize(self.client.get(url))
    }

    fn mget_request(&self, kind: EntityKind, ids: &[String]) -> RequestBuilder {
        let url = self.url(kind, "_mget");
        self.authorize(self.client.post(url).json(&json!({ "ids": ids })))
    }
}

fn unavailable(context: &str, e: impl std::fmt::Display) -> ScholarError {
    ScholarError::UpstreamUnavailable(format!("search index {}: {}", context, e))
}

impl SearchIndex for ElasticIndex {
    fn get(&self, entity: &EntityRef) -> Result<Option<Map<String, Value>>> {
        let response = self
            .get_request(entity)
            .send()
            .map_err(|e| unavailable("request failed", e))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(entity = %entity, "Index miss");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(unavailable("returned", response.status()));
        }

        let body: GetResponse = response
            .json()
            .map_err(|e| unavailable("response undecodable", e))?;
        Ok(body.source.filter(|_| body.found))
    }

    fn multi_get(&self, kind: EntityKind, ids: &[String]) -> Result<Vec<Map<String, Value>>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .mget_request(kind, ids)
            .send()
            .map_err(|e| unavailable("request failed", e))?;

        if !response.status().is_success() {
            return Err(unavailable("returned", response.status()));
        }

        let body: MultiGetResponse = response
            .json()
            .map_err(|e| unavailable("response undecodable", e))?;
        Ok(body
            .docs
            .into_iter()
            .filter(|doc| doc.found)
            .filter_map(|doc| doc.source)
            .collect())
    }

    fn name(&self) -> &str {
        "elasticsearch"
    }
}
