//! Herald API clients

pub mod arts;
pub mod auth;
pub mod error;
pub mod links;
pub mod raids;

use crate::gateway::{Gateway, RequestOptions};
use error::ClientError;
use herald_core::{KeyValueStore, Navigator};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the unauthenticated login endpoint
#[derive(Clone)]
pub struct PublicClient {
    client: Client,
    base_url: String,
}

impl PublicClient {
    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = ensure_success(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Client for the collection endpoints. Every call goes through the gateway.
#[derive(Clone)]
pub struct AdminClient<S, N> {
    gateway: Gateway<S, N>,
}

impl<S: KeyValueStore, N: Navigator> AdminClient<S, N> {
    pub fn new(gateway: Gateway<S, N>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway<S, N> {
        &self.gateway
    }

    /// Send through the gateway and decode a JSON body from a 2xx response
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let response = self.gateway.request(endpoint, options).await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Send through the gateway, ignoring the body of a 2xx response
    pub async fn send(&self, endpoint: &str, options: RequestOptions) -> Result<(), ClientError> {
        let response = self.gateway.request(endpoint, options).await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Map a non-2xx response to the matching error, carrying the body text
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_else(|_| status.to_string());
    Err(ClientError::from_status(status, message))
}

/// Builder for the Herald clients
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout. Ignored on wasm32, where the browser owns timeouts.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a client for public endpoints
    pub fn build_public(self) -> Result<PublicClient, ClientError> {
        let (client, base_url) = self.into_parts()?;
        Ok(PublicClient { client, base_url })
    }

    /// Build a gateway-backed client over the given storage and navigator
    pub fn build_admin<S, N>(
        self,
        storage: S,
        navigator: N,
    ) -> Result<AdminClient<S, N>, ClientError>
    where
        S: KeyValueStore,
        N: Navigator,
    {
        let (client, base_url) = self.into_parts()?;
        Ok(AdminClient::new(Gateway::new(client, base_url, storage, navigator)))
    }

    fn into_parts(self) -> Result<(Client, String), ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        #[cfg(not(target_arch = "wasm32"))]
        let client = {
            let mut builder = Client::builder().user_agent("herald-admin/0.1.0");
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        #[cfg(target_arch = "wasm32")]
        let client = Client::builder().build()?;

        Ok((client, base_url))
    }
}
