//! Storefront REST client.
//!
//! Serves both cart lookups from one JSON API:
//! `GET {base}/stock/{id}` and `GET {base}/products/{id}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use rocketshoes_cart::{ProductCatalog, ServiceError, StockService};
use rocketshoes_core::ProductId;
use rocketshoes_inventory::Stock;
use rocketshoes_products::Product;

use crate::config::ClientConfig;

/// HTTP adapter for [`StockService`] and [`ProductCatalog`].
#[derive(Debug, Clone)]
pub struct HttpStorefront {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStorefront {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        Self::with_timeout(base_url, ClientConfig::DEFAULT_HTTP_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ServiceError> {
        Self::with_timeout(config.api_url.clone(), config.http_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        product_id: ProductId,
    ) -> Result<T, ServiceError> {
        let url = format!("{}/{}/{}", self.base_url, resource, product_id);
        tracing::debug!(%url, "storefront request");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(product_id));
        }
        if !status.is_success() {
            return Err(ServiceError::Api(
                status.as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl StockService for HttpStorefront {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, ServiceError> {
        self.get_json("stock", product_id).await
    }
}

#[async_trait]
impl ProductCatalog for HttpStorefront {
    async fn product(&self, product_id: ProductId) -> Result<Product, ServiceError> {
        self.get_json("products", product_id).await
    }
}
