//! Store and menu fetchers over the backend REST API.
//!
//! One request, one response. There is no retry and no client-side timeout;
//! whatever the transport does by default applies.

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::LocatorError;
use crate::models::{BrandId, Menu, Store};
use crate::query::QueryPayload;
use crate::search::StoreRequest;

pub const STORES_PATH: &str = "/api/v1/stores";
pub const FILTERED_STORES_PATH: &str = "/api/v1/stores/filtered";

pub fn menus_path(brand_id: BrandId) -> String {
    format!("/api/v1/brands/{brand_id}/menus/filtered")
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    /// Unfiltered store list.
    pub async fn fetch_all_stores(&self) -> Result<Vec<Store>, LocatorError> {
        let url = self.config.url(STORES_PATH);
        tracing::debug!(%url, "Fetching all stores");
        let request = self.client.get(&url);
        send(request, &url).await
    }

    pub async fn fetch_stores(&self, payload: &QueryPayload) -> Result<Vec<Store>, LocatorError> {
        let url = self.config.url(FILTERED_STORES_PATH);
        tracing::debug!(%url, "Fetching filtered stores");
        let request = self.client.post(&url).json(payload);
        send(request, &url).await
    }

    /// Menus of one brand. Categories never go to this endpoint.
    pub async fn fetch_menus(
        &self,
        brand_id: BrandId,
        payload: &QueryPayload,
    ) -> Result<Vec<Menu>, LocatorError> {
        let url = self.config.url(&menus_path(brand_id));
        tracing::debug!(%url, brand_id, "Fetching menus");
        let request = self.client.post(&url).json(&payload.for_menus());
        send(request, &url).await
    }

    pub async fn execute(&self, request: &StoreRequest) -> Result<Vec<Store>, LocatorError> {
        match request {
            StoreRequest::All => self.fetch_all_stores().await,
            StoreRequest::Filtered(payload) => self.fetch_stores(payload).await,
        }
    }
}

async fn send<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<T, LocatorError> {
    let resp = request.send().await.map_err(|e| network(url, &e))?;

    let status = resp.status();
    if !status.is_success() {
        tracing::warn!(%url, status = status.as_u16(), "Backend returned an error status");
        return Err(LocatorError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    resp.json::<T>().await.map_err(|e| network(url, &e))
}

fn network(url: &str, e: &reqwest::Error) -> LocatorError {
    tracing::warn!(%url, error = %e, "Request failed");
    LocatorError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menus_path() {
        assert_eq!(menus_path(12), "/api/v1/brands/12/menus/filtered");
    }
}
