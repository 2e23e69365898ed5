//! Authenticated fetch
//!
//! Every call to the Vouch API goes through [`ApiClient::fetch`], which
//! attaches the stored access token and, when the API answers 401, renews the
//! token once and replays the request. Callers see either the replayed
//! response or, if the session could not be renewed, the original 401.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, instrument, warn};
use vouch_common::auth::{TokenRefresher, TokenStore};
use vouch_domain::{join_url, Config};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL every endpoint is joined to
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
}

impl ApiClientConfig {
    /// Take the API settings out of the client configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            timeout: Duration::from_secs(config.api.timeout_seconds),
        }
    }
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A request that can be issued more than once
///
/// The body is buffered so the replay after a refresh sends the same bytes.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Request with `method`, no headers and no body
    pub fn new(method: Method) -> Self {
        Self { method, headers: HeaderMap::new(), body: None }
    }

    /// `GET` request
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// `POST` request
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// `DELETE` request
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Set a header. An `Authorization` header is always replaced by the
    /// client's own.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Merge `headers` into the request headers
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Raw request body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `body` as JSON and set the content type
    ///
    /// # Errors
    /// Returns `ApiError::InvalidInput` if `body` cannot be serialized
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| ApiError::InvalidInput(format!("Failed to serialize body: {e}")))?;
        Ok(self.header(CONTENT_TYPE, HeaderValue::from_static("application/json")).body(bytes))
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }
}

impl Default for ApiRequest {
    fn default() -> Self {
        Self::get()
    }
}

/// API client attaching bearer credentials with refresh-and-retry on 401
pub struct ApiClient {
    http_client: HttpClient,
    store: Arc<TokenStore>,
    refresher: Arc<dyn TokenRefresher>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration
    /// * `store` - Token store the access token is read from
    /// * `refresher` - Renews the access token after a 401
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn new(
        config: ApiClientConfig,
        store: Arc<TokenStore>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;

        Ok(Self { http_client, store, refresher, config })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Token store requests are authenticated from
    #[must_use]
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Issue `request` against `endpoint`
    ///
    /// Makes at most two network calls. A 401 triggers one refresh and one
    /// replay; if the refresh fails the original 401 response is returned.
    /// Every other status, including a 401 on the replay, is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if either request fails in transport
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn fetch(&self, endpoint: &str, request: ApiRequest) -> Result<Response, ApiError> {
        let url = join_url(&self.config.base_url, endpoint);
        let token = self.store.access_token();

        let response = self.send(&url, &request, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("Access token rejected, refreshing");
        match self.refresher.refresh_after_rejection(token.as_deref()).await {
            Ok(fresh) => {
                debug!("Replaying request with refreshed token");
                self.send(&url, &request, Some(&fresh)).await
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, returning original response");
                Ok(response)
            }
        }
    }

    /// `GET endpoint`
    ///
    /// # Errors
    ///
    /// As for [`fetch`](Self::fetch)
    pub async fn get(&self, endpoint: &str) -> Result<Response, ApiError> {
        self.fetch(endpoint, ApiRequest::get()).await
    }

    /// `POST endpoint` with a JSON body
    ///
    /// # Errors
    ///
    /// As for [`fetch`](Self::fetch), or `ApiError::InvalidInput` if `body`
    /// cannot be serialized
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        self.fetch(endpoint, ApiRequest::post().json(body)?).await
    }

    /// `DELETE endpoint`
    ///
    /// # Errors
    ///
    /// As for [`fetch`](Self::fetch)
    pub async fn delete(&self, endpoint: &str) -> Result<Response, ApiError> {
        self.fetch(endpoint, ApiRequest::delete()).await
    }

    async fn send(
        &self,
        url: &str,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        let mut builder = self
            .http_client
            .request(request.method.clone(), url)
            .headers(Self::request_headers(request, token)?);

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        Ok(self.http_client.send(builder).await?)
    }

    fn request_headers(request: &ApiRequest, token: Option<&str>) -> Result<HeaderMap, ApiError> {
        let mut headers = request.headers.clone();
        headers.remove(AUTHORIZATION);

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                ApiError::InvalidInput(format!("access token is not a valid header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    store: Option<Arc<TokenStore>>,
    refresher: Option<Arc<dyn TokenRefresher>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the token store
    pub fn store(mut self, store: Arc<TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the token refresher
    pub fn refresher(mut self, refresher: Arc<dyn TokenRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let store = self.store.ok_or_else(|| ApiError::Config("Token store not set".to_string()))?;
        let refresher = self
            .refresher
            .ok_or_else(|| ApiError::Config("Token refresher not set".to_string()))?;

        ApiClient::new(config, store, refresher)
    }
}
