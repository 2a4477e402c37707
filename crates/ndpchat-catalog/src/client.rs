//! HTTP client for the catalog search endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use ndpchat_core::DatasetRecord;

/// Catalog search errors. Any of these aborts the search phase; there is no
/// retry.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Http(String),
    #[error("catalog response error: {0}")]
    Response(String),
}

/// Catalog search contract: terms in, raw dataset records out.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, terms: &[String]) -> Result<Vec<DatasetRecord>, CatalogError>;
}

#[async_trait]
impl CatalogSearch for Arc<dyn CatalogSearch> {
    async fn search(&self, terms: &[String]) -> Result<Vec<DatasetRecord>, CatalogError> {
        (**self).search(terms).await
    }
}

/// Catalog client configuration.
#[derive(Debug, Clone)]
pub struct HttpCatalogClientConfig {
    /// Search endpoint URL.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpCatalogClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://sparcal.sdsc.edu/staging-api/v1/Utility/ndp".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Catalog client issuing `GET <endpoint>?search_terms=<space-joined>`.
pub struct HttpCatalogClient {
    client: reqwest::Client,
    config: HttpCatalogClientConfig,
}

impl HttpCatalogClient {
    /// Create a new catalog client.
    pub fn new(config: HttpCatalogClientConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }
}

/// Join search terms into the single query-parameter value.
pub(crate) fn query_value(terms: &[String]) -> String {
    terms.join(" ")
}

#[async_trait]
impl CatalogSearch for HttpCatalogClient {
    async fn search(&self, terms: &[String]) -> Result<Vec<DatasetRecord>, CatalogError> {
        let search_terms = query_value(terms);
        debug!(%search_terms, endpoint = %self.config.endpoint, "catalog query");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("search_terms", search_terms.as_str())])
            .send()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Response(format!("HTTP {}: {}", status, text)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        let records: Vec<DatasetRecord> =
            serde_json::from_str(&text).map_err(|e| CatalogError::Response(e.to_string()))?;

        debug!(record_count = records.len(), "catalog response parsed");
        Ok(records)
    }
}
