//! Authenticated request gateway

use crate::error::GatewayError;
use herald_core::{APP_ROOT, KeyValueStore, Navigator, TOKEN_KEY, erase_credential};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;

/// Method, extra headers and body of a gateway call
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Add a header. Repeated names are kept as multiple values.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        Ok(self.body(serde_json::to_string(value)?))
    }
}

/// Single chokepoint for calls to the community API.
///
/// The token is read from persisted storage on every call rather than from
/// the in-memory session, so a credential written by another tab or by the
/// session's own startup read is picked up. The gateway never touches the
/// in-memory session: on a 401 it erases storage and hard-redirects, and the
/// reload rebuilds the session from scratch.
#[derive(Clone)]
pub struct Gateway<S, N> {
    client: Client,
    base_url: String,
    storage: S,
    navigator: N,
}

impl<S: KeyValueStore, N: Navigator> Gateway<S, N> {
    pub fn new(client: Client, base_url: impl Into<String>, storage: S, navigator: N) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            storage,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue `options.method` against `base_url + endpoint`.
    ///
    /// The raw response is returned for every status, 401 included. Transport
    /// failures are returned as-is and never retried.
    pub async fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Response, GatewayError> {
        let token = self.storage.get(TOKEN_KEY);
        let headers = merge_headers(&options.headers, token.as_deref())?;
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!(
            method = %options.method,
            endpoint,
            authenticated = token.is_some(),
            "Sending request"
        );

        let mut request = self.client.request(options.method, url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                endpoint,
                "Credential rejected by server, reloading at application root"
            );
            erase_credential(&self.storage);
            self.navigator.hard_redirect(APP_ROOT);
        }

        Ok(response)
    }
}

/// JSON content type first, caller headers over it, computed authorization last
fn merge_headers(caller: &HeaderMap, token: Option<&str>) -> Result<HeaderMap, GatewayError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for name in caller.keys() {
        headers.remove(name);
    }
    for (name, value) in caller {
        headers.append(name.clone(), value.clone());
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
