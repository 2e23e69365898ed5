//! Late-bound navigation to the login screen
//!
//! Code outside the UI tree (the auth client tearing down an expired session)
//! needs to send the user back to the login route without holding the
//! router. The UI binds a [`NavigateHandle`] once it is mounted; until then
//! redirects are no-ops.
//!
//! Components take an `Arc<NavigationRedirector>`; [`global`] is the
//! process-wide instance for callers that cannot have one injected.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, info};
use vouch_domain::constants::LOGIN_ROUTE;

/// How a navigation affects history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one
    pub replace: bool,
}

/// Navigation function supplied by the UI router
pub type NavigateHandle = Arc<dyn Fn(&str, NavigateOptions) + Send + Sync>;

/// Single-slot holder for the active navigation function
pub struct NavigationRedirector {
    handle: RwLock<Option<NavigateHandle>>,
    login_route: RwLock<String>,
}

impl NavigationRedirector {
    /// Redirector targeting the default login route
    #[must_use]
    pub fn new() -> Self {
        Self::with_login_route(LOGIN_ROUTE)
    }

    /// Redirector targeting `login_route`
    pub fn with_login_route(login_route: impl Into<String>) -> Self {
        Self { handle: RwLock::new(None), login_route: RwLock::new(login_route.into()) }
    }

    /// Bind the navigation function; a later bind replaces an earlier one
    pub fn set_navigate_handle(&self, handle: NavigateHandle) {
        *self.handle.write() = Some(handle);
        debug!("Navigation handle bound");
    }

    /// Unbind the navigation function
    pub fn clear_navigate_handle(&self) {
        *self.handle.write() = None;
    }

    /// Whether a navigation function is bound
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.handle.read().is_some()
    }

    /// Route used by [`redirect_to_login`](Self::redirect_to_login)
    #[must_use]
    pub fn login_route(&self) -> String {
        self.login_route.read().clone()
    }

    /// Point redirects at `login_route`
    pub fn set_login_route(&self, login_route: impl Into<String>) {
        *self.login_route.write() = login_route.into();
    }

    /// Navigate to the login route, replacing the current history entry
    ///
    /// # Returns
    /// `true` if a handle was bound and invoked, `false` if nothing happened
    pub fn redirect_to_login(&self) -> bool {
        // Clone out of the lock so the handle may rebind without deadlocking.
        let handle = self.handle.read().clone();
        match handle {
            Some(navigate) => {
                let route = self.login_route();
                info!(route = %route, "Redirecting to login");
                navigate(&route, NavigateOptions { replace: true });
                true
            }
            None => {
                debug!("No navigation handle bound, skipping login redirect");
                false
            }
        }
    }
}

impl Default for NavigationRedirector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NavigationRedirector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationRedirector")
            .field("login_route", &*self.login_route.read())
            .field("bound", &self.is_bound())
            .finish()
    }
}

static GLOBAL: Lazy<Arc<NavigationRedirector>> =
    Lazy::new(|| Arc::new(NavigationRedirector::new()));

/// Process-wide redirector
#[must_use]
pub fn global() -> Arc<NavigationRedirector> {
    GLOBAL.clone()
}

/// Bind the process-wide navigation function
pub fn set_navigate_handle(handle: NavigateHandle) {
    GLOBAL.set_navigate_handle(handle);
}

/// Redirect through the process-wide handle
pub fn redirect_to_login() -> bool {
    GLOBAL.redirect_to_login()
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::redirect.
    use super::*;
    use crate::testing::RecordingNavigator;

    #[test]
    fn unbound_redirect_is_noop() {
        let redirector = NavigationRedirector::new();
        assert!(!redirector.is_bound());
        assert!(!redirector.redirect_to_login());
    }

    #[test]
    fn redirect_replaces_history_with_login_route() {
        let redirector = NavigationRedirector::new();
        let navigator = RecordingNavigator::new();
        redirector.set_navigate_handle(navigator.handle());

        assert!(redirector.redirect_to_login());
        assert_eq!(
            navigator.calls(),
            vec![("/loginsignup".to_string(), NavigateOptions { replace: true })]
        );
    }

    #[test]
    fn last_bind_wins() {
        let redirector = NavigationRedirector::with_login_route("/login");
        let first = RecordingNavigator::new();
        let second = RecordingNavigator::new();

        redirector.set_navigate_handle(first.handle());
        redirector.set_navigate_handle(second.handle());
        redirector.redirect_to_login();

        assert!(first.calls().is_empty());
        assert_eq!(second.calls().len(), 1);
        assert_eq!(second.calls()[0].0, "/login");
    }

    #[test]
    fn clearing_the_handle_disables_redirects() {
        let redirector = NavigationRedirector::new();
        let navigator = RecordingNavigator::new();
        redirector.set_navigate_handle(navigator.handle());
        redirector.clear_navigate_handle();

        assert!(!redirector.redirect_to_login());
        assert!(navigator.calls().is_empty());
    }

    #[test]
    fn login_route_can_be_retargeted() {
        let redirector = NavigationRedirector::new();
        let navigator = RecordingNavigator::new();
        redirector.set_navigate_handle(navigator.handle());

        redirector.set_login_route("/signin");
        redirector.redirect_to_login();

        assert_eq!(redirector.login_route(), "/signin");
        assert_eq!(navigator.routes(), vec!["/signin".to_string()]);
    }

    #[test]
    fn global_instance_is_shared() {
        assert!(Arc::ptr_eq(&global(), &global()));
    }
}
