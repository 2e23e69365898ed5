//! Route guarding for screens that require a session

use tracing::debug;
use vouch_domain::constants::LOGIN_ROUTE;

use super::redirect::NavigateOptions;
use super::token_store::TokenStore;

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected screen
    Allow,
    /// Navigate away instead of rendering
    Redirect { to: String, options: NavigateOptions },
}

/// Allows protected routes only while an access token is held
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_route: String,
}

impl RouteGuard {
    /// Guard redirecting to `login_route`
    pub fn new(login_route: impl Into<String>) -> Self {
        Self { login_route: login_route.into() }
    }

    /// Decide whether a protected route may render.
    ///
    /// Only the presence of a token is checked; an expired token is let
    /// through and renewed by the first API call that gets a 401.
    #[must_use]
    pub fn check(&self, store: &TokenStore) -> GuardDecision {
        if store.is_authenticated() {
            GuardDecision::Allow
        } else {
            debug!(route = %self.login_route, "No session, redirecting protected route");
            GuardDecision::Redirect {
                to: self.login_route.clone(),
                options: NavigateOptions { replace: true },
            }
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(LOGIN_ROUTE)
    }
}
