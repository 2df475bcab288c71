//! Catalog fetch gateway: a transport seam plus typed decoding.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    error::{ApiError, FetchError},
    protocol::{GenreListResponse, MovieListPage},
};
use tracing::debug;
use url::Url;

use crate::outcome::{Completion, FetchRequest, FetchTarget};

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Issues exactly one request per call; implementations must not retry.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn fetch(&self, endpoint: &str, params: &[(String, String)])
        -> Result<Vec<u8>, FetchError>;
}

pub struct MissingCatalogTransport;

#[async_trait]
impl CatalogTransport for MissingCatalogTransport {
    async fn fetch(
        &self,
        endpoint: &str,
        _params: &[(String, String)],
    ) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::transport(
            endpoint,
            "catalog transport is unavailable",
        ))
    }
}

pub struct HttpCatalogTransport {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpCatalogTransport {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, url::ParseError> {
        // Url::join drops the last path segment unless it ends with '/'.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        Ok(Self {
            http: Client::new(),
            base_url,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|err| FetchError::transport(endpoint, format!("invalid endpoint url: {err}")))
    }
}

#[async_trait]
impl CatalogTransport for HttpCatalogTransport {
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Vec<u8>, FetchError> {
        let url = self.endpoint_url(endpoint)?;
        let mut request = self.http.get(url).query(params);
        if let Some(api_key) = &self.api_key {
            request = request.query(&[("api_key", api_key)]);
        }

        let response = request
            .send()
            .await
            .map_err(|err| FetchError::transport(endpoint, err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .bytes()
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<ApiError>(&bytes).ok());
            return Err(FetchError::status(endpoint, status.as_u16(), body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::transport(endpoint, err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[derive(Clone)]
pub struct CatalogGateway {
    transport: Arc<dyn CatalogTransport>,
}

impl CatalogGateway {
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self { transport }
    }

    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T, FetchError> {
        let body = self.transport.fetch(endpoint, params).await?;
        serde_json::from_slice(&body).map_err(|err| FetchError::decode(endpoint, &err))
    }

    /// Runs one fetch order and wraps its outcome for the home actor.
    pub async fn execute(&self, request: FetchRequest) -> Completion {
        debug!(token = %request.token, endpoint = request.endpoint, "catalog fetch started");
        match request.target {
            FetchTarget::MoviePage { page } => Completion::Movies {
                token: request.token,
                page,
                result: self
                    .fetch::<MovieListPage>(request.endpoint, &request.params)
                    .await
                    .map(|body| body.results),
            },
            FetchTarget::Genres => Completion::Genres {
                token: request.token,
                result: self
                    .fetch::<GenreListResponse>(request.endpoint, &request.params)
                    .await
                    .map(|body| body.genres),
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
