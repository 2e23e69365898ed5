//! Session composition root
//!
//! Wires the token store, auth client, authenticated fetch and events API
//! from one [`Config`].

use std::sync::Arc;

use tracing::info;
use vouch_common::auth::{
    AuthClient, AuthClientConfig, CredentialStorage, NavigationRedirector, RouteGuard, TokenStore,
};
use vouch_domain::Config;

use crate::api::{ApiClient, ApiClientConfig, ApiError, EventsApi};

/// Fully wired client session
pub struct Session {
    store: Arc<TokenStore>,
    redirector: Arc<NavigationRedirector>,
    auth: Arc<AuthClient>,
    api: Arc<ApiClient>,
    events: EventsApi,
    guard: RouteGuard,
}

impl Session {
    /// Build a session on `storage`, navigating through `redirector`
    ///
    /// `redirector` is retargeted at the configured login route so forced
    /// logouts and the route guard agree.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if an HTTP client cannot be built
    pub fn new(
        config: &Config,
        storage: Arc<dyn CredentialStorage>,
        redirector: Arc<NavigationRedirector>,
    ) -> Result<Self, ApiError> {
        redirector.set_login_route(config.auth.login_route.clone());

        let store = Arc::new(TokenStore::load(storage));
        let auth = Arc::new(AuthClient::new(
            AuthClientConfig::from_config(config),
            store.clone(),
            redirector.clone(),
        )?);
        let api = Arc::new(ApiClient::new(
            ApiClientConfig::from_config(config),
            store.clone(),
            auth.clone(),
        )?);
        let events = EventsApi::new(api.clone());
        let guard = RouteGuard::new(config.auth.login_route.clone());

        info!(base_url = %config.api.base_url, "Session initialized");

        Ok(Self { store, redirector, auth, api, events, guard })
    }

    /// Build a session persisting tokens in the platform keychain, navigating
    /// through the process-wide redirector
    ///
    /// # Errors
    /// Returns `ApiError::Config` if an HTTP client cannot be built
    #[cfg(feature = "platform")]
    pub fn from_config_with_keychain(config: &Config) -> Result<Self, ApiError> {
        let keychain =
            vouch_common::security::KeychainProvider::new(config.storage.keychain_service.clone());
        Self::new(config, Arc::new(keychain), vouch_common::auth::redirect::global())
    }

    /// Token store shared by every component
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Redirector used for forced logouts
    pub fn redirector(&self) -> &Arc<NavigationRedirector> {
        &self.redirector
    }

    /// Login, refresh and logout
    pub fn auth(&self) -> &Arc<AuthClient> {
        &self.auth
    }

    /// Authenticated fetch
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Typed events endpoints
    pub fn events(&self) -> &EventsApi {
        &self.events
    }

    /// Guard for protected routes
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }
}
