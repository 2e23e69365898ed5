//! Identity API client
//!
//! Handles the session lifecycle against the Vouch identity endpoints:
//! - Email/password login
//! - Access-token refresh (single-flight across concurrent callers)
//! - Session teardown when the refresh token is no longer accepted

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use vouch_domain::{join_url, Config, VouchError};

use super::redirect::NavigationRedirector;
use super::token_store::TokenStore;
use super::traits::TokenRefresher;
use super::types::{AuthError, LoginRequest, RefreshRequest, TokenPair, TokenResponse};

/// Endpoints and transport settings for [`AuthClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClientConfig {
    /// API root the endpoints are resolved against
    pub base_url: String,
    /// Login path, relative to `base_url`
    pub login_endpoint: String,
    /// Refresh path, relative to `base_url`
    pub refresh_endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl AuthClientConfig {
    /// Take the identity settings out of the client configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            login_endpoint: config.auth.login_endpoint.clone(),
            refresh_endpoint: config.auth.refresh_endpoint.clone(),
            timeout: Duration::from_secs(config.api.timeout_seconds),
        }
    }

    fn login_url(&self) -> String {
        join_url(&self.base_url, &self.login_endpoint)
    }

    fn refresh_url(&self) -> String {
        join_url(&self.base_url, &self.refresh_endpoint)
    }
}

/// Client for the identity endpoints
///
/// Owns the refresh-token lifecycle: it is the only writer of the token store
/// besides explicit logout, and the only component that ends a session.
pub struct AuthClient {
    config: AuthClientConfig,
    client: Client,
    store: Arc<TokenStore>,
    redirector: Arc<NavigationRedirector>,
    refresh_gate: Mutex<()>,
}

impl AuthClient {
    /// Create a new auth client
    ///
    /// # Arguments
    /// * `config` - Identity endpoints and timeout
    /// * `store` - Token store the session is kept in
    /// * `redirector` - Used to send the user to the login route when the
    ///   session cannot be renewed
    ///
    /// # Errors
    /// Returns `VouchError::Config` if the HTTP client cannot be built
    pub fn new(
        config: AuthClientConfig,
        store: Arc<TokenStore>,
        redirector: Arc<NavigationRedirector>,
    ) -> vouch_domain::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .map_err(|e| VouchError::Config(format!("Failed to build identity HTTP client: {e}")))?;

        Ok(Self { config, client, store, redirector, refresh_gate: Mutex::new(()) })
    }

    /// Token store this client writes to
    #[must_use]
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Log in with email and password
    ///
    /// On success the returned pair has already been written to the token
    /// store.
    ///
    /// # Errors
    /// Returns `AuthError::AuthenticationFailed` if either field is blank,
    /// the request fails, the server rejects the credentials, or the response
    /// lacks a token. The token store is left untouched in every error case.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::AuthenticationFailed(
                "Please enter email and password".to_string(),
            ));
        }

        let response = self
            .client
            .post(self.config.login_url())
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Login request failed");
                AuthError::AuthenticationFailed(format!("login request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Login rejected");
            return Err(AuthError::AuthenticationFailed(format!(
                "login rejected with status {status}"
            )));
        }

        let pair = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| {
                AuthError::AuthenticationFailed(format!("invalid login response: {e}"))
            })?
            .into_pair()
            .ok_or_else(|| {
                AuthError::AuthenticationFailed("login response is missing a token".to_string())
            })?;

        self.store.set_tokens(pair.clone());
        info!("Login successful");

        Ok(pair)
    }

    /// Exchange the stored refresh token for a new access token
    ///
    /// # Returns
    /// The new access token, already written to the token store
    ///
    /// # Errors
    /// Returns `AuthError::RefreshFailed` if there is no refresh token or the
    /// endpoint does not issue a new access token. Before returning the
    /// error the session is ended: tokens are cleared and the redirector is
    /// sent to the login route.
    pub async fn refresh_access_token(&self) -> Result<String, AuthError> {
        let _gate = self.refresh_gate.lock().await;
        self.refresh_or_end_session().await
    }

    /// Refresh on behalf of a request that was rejected with `rejected`
    ///
    /// Refreshes are serialized. A caller that queued behind another refresh
    /// finds its rejected token already replaced and gets the new one without
    /// spending the refresh token again; a caller that finds the session
    /// already ended fails without tearing it down a second time.
    ///
    /// # Errors
    /// Returns `AuthError::RefreshFailed` as for
    /// [`refresh_access_token`](Self::refresh_access_token).
    pub async fn refresh_after_rejection(
        &self,
        rejected: Option<&str>,
    ) -> Result<String, AuthError> {
        let _gate = self.refresh_gate.lock().await;

        match (rejected, self.store.access_token()) {
            (Some(rejected), Some(current)) if current != rejected => {
                debug!("Access token already refreshed by a concurrent request");
                return Ok(current);
            }
            (Some(_), None) => {
                debug!("Session ended while request was in flight");
                return Err(AuthError::RefreshFailed("session has ended".to_string()));
            }
            (None, Some(current)) => return Ok(current),
            _ => {}
        }

        self.refresh_or_end_session().await
    }

    /// Clear the session and return to the login route
    pub fn logout(&self) {
        info!("Logging out");
        self.end_session();
    }

    async fn refresh_or_end_session(&self) -> Result<String, AuthError> {
        match self.request_refresh().await {
            Ok(access) => {
                info!("Successfully refreshed access token");
                Ok(access)
            }
            Err(e) => {
                warn!(error = %e, "Access token refresh failed, ending session");
                self.end_session();
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    async fn request_refresh(&self) -> Result<String, AuthError> {
        let refresh_token = self
            .store
            .refresh_token()
            .ok_or_else(|| AuthError::RefreshFailed("no refresh token available".to_string()))?;

        let response = self
            .client
            .post(self.config.refresh_url())
            .json(&RefreshRequest { refresh: &refresh_token })
            .send()
            .await
            .map_err(|e| AuthError::RefreshFailed(format!("refresh request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::RefreshFailed(format!("refresh rejected with status {status}")));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::RefreshFailed(format!("invalid refresh response: {e}")))?;

        if body.access.is_empty() {
            return Err(AuthError::RefreshFailed("refresh response is missing a token".to_string()));
        }

        let rotated = body.refresh.filter(|r| !r.is_empty());
        self.store.update_access_token(body.access.clone(), rotated);

        Ok(body.access)
    }

    fn end_session(&self) {
        self.store.clear_tokens();
        self.redirector.redirect_to_login();
    }
}

#[async_trait]
impl TokenRefresher for AuthClient {
    async fn refresh_after_rejection(&self, rejected: Option<&str>) -> Result<String, AuthError> {
        AuthClient::refresh_after_rejection(self, rejected).await
    }
}
