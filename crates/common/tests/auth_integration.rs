//! Integration tests for auth module
//!
//! Exercises login, refresh and session teardown against a mock identity API,
//! through the public surface only.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use vouch_common::auth::{
    logged_in_user_id, AuthClient, AuthClientConfig, AuthError, GuardDecision,
    NavigationRedirector, RouteGuard, TokenPair, TokenStore,
};
use vouch_common::testing::{MockCredentialStorage, RecordingNavigator};
use vouch_domain::UserId;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Session {
    auth: Arc<AuthClient>,
    store: Arc<TokenStore>,
    storage: MockCredentialStorage,
    navigator: RecordingNavigator,
}

fn session(server: &MockServer, storage: MockCredentialStorage) -> Session {
    let store = Arc::new(TokenStore::load(Arc::new(storage.clone())));
    let redirector = Arc::new(NavigationRedirector::new());
    let navigator = RecordingNavigator::new();
    redirector.set_navigate_handle(navigator.handle());

    let config = AuthClientConfig {
        base_url: format!("{}/api/", server.uri()),
        login_endpoint: "auth/login/".to_string(),
        refresh_endpoint: "auth/token/refresh/".to_string(),
        timeout: Duration::from_secs(5),
    };
    let auth = Arc::new(AuthClient::new(config, store.clone(), redirector).unwrap());

    Session { auth, store, storage, navigator }
}

/// Validates a full login: tokens land in memory and in durable storage, and
/// the identity decoded from the new access token is available.
///
/// # Test Steps
/// 1. Mock the login endpoint to issue a token pair for user 9
/// 2. Log in
/// 3. Verify the store, the persisted entries, the route guard and the
///    decoded user id
#[tokio::test(flavor = "multi_thread")]
async fn test_login_establishes_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({ "email": "student@iitb.ac.in", "password": "hunter2" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access": "h.eyJ1c2VyX2lkIjo5fQ.s", "refresh": "r1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let s = session(&server, MockCredentialStorage::new());
    assert_eq!(
        RouteGuard::default().check(&s.store),
        GuardDecision::Redirect {
            to: "/loginsignup".to_string(),
            options: vouch_common::auth::NavigateOptions { replace: true },
        }
    );

    s.auth.login("student@iitb.ac.in", "hunter2").await.expect("login should succeed");

    assert_eq!(s.store.access_token().as_deref(), Some("h.eyJ1c2VyX2lkIjo5fQ.s"));
    assert_eq!(s.storage.entry("refresh").as_deref(), Some("r1"));
    assert_eq!(RouteGuard::default().check(&s.store), GuardDecision::Allow);
    assert_eq!(logged_in_user_id(&s.store), Some(UserId::Number(9)));
}

/// Validates that a login response without a refresh token is rejected and
/// leaves a previously stored session untouched.
#[tokio::test(flavor = "multi_thread")]
async fn test_login_without_refresh_token_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "a-only" })))
        .mount(&server)
        .await;

    let s = session(
        &server,
        MockCredentialStorage::with_entries([("access", "old-a"), ("refresh", "old-r")]),
    );

    let result = s.auth.login("student@iitb.ac.in", "hunter2").await;

    assert!(matches!(result, Err(AuthError::AuthenticationFailed(_))));
    assert_eq!(s.store.access_token().as_deref(), Some("old-a"));
    assert_eq!(s.store.refresh_token().as_deref(), Some("old-r"));
}

/// Validates that a session persisted by an earlier process is resumed and
/// refreshed with the persisted refresh token.
#[tokio::test(flavor = "multi_thread")]
async fn test_persisted_session_refreshes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .and(body_json(json!({ "refresh": "r1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "a2" })))
        .expect(1)
        .mount(&server)
        .await;

    let s = session(&server, MockCredentialStorage::with_entries([("access", "a1"), ("refresh", "r1")]));

    let access = s.auth.refresh_access_token().await.expect("refresh should succeed");

    assert_eq!(access, "a2");
    assert_eq!(s.storage.entry("access").as_deref(), Some("a2"));
    assert_eq!(s.storage.entry("refresh").as_deref(), Some("r1"));
}

/// Validates session teardown when the refresh token is rejected.
///
/// # Test Steps
/// 1. Start from a persisted session
/// 2. Mock the refresh endpoint to answer 401
/// 3. Verify the error, the emptied storage and exactly one login redirect
#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_refresh_ends_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "expired" })))
        .mount(&server)
        .await;

    let s = session(&server, MockCredentialStorage::with_entries([("access", "a1"), ("refresh", "r1")]));

    let result = s.auth.refresh_access_token().await;

    assert!(matches!(result, Err(AuthError::RefreshFailed(_))));
    assert!(s.storage.is_empty());
    assert!(!s.store.is_authenticated());
    assert_eq!(s.navigator.routes(), vec!["/loginsignup".to_string()]);
    assert!(s.navigator.calls()[0].1.replace);
}

/// Validates that concurrent callers rejected with the same token share one
/// refresh request.
///
/// # Test Steps
/// 1. Mock a slow refresh endpoint that may be hit only once
/// 2. Issue three refreshes for the same rejected token concurrently
/// 3. Verify every caller receives the new token
#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_refreshes_are_single_flight() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access": "a2" }))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let s = session(&server, MockCredentialStorage::with_entries([("access", "a1"), ("refresh", "r1")]));

    let calls = (0..3).map(|_| {
        let auth = s.auth.clone();
        tokio::spawn(async move { auth.refresh_after_rejection(Some("a1")).await })
    });
    let handles: Vec<_> = calls.collect();

    for handle in handles {
        let access = handle.await.expect("task panicked").expect("refresh should succeed");
        assert_eq!(access, "a2");
    }
    assert!(s.navigator.calls().is_empty());
}

/// Validates logout against a live session.
#[tokio::test(flavor = "multi_thread")]
async fn test_logout_clears_storage() {
    let server = MockServer::start().await;
    let s = session(&server, MockCredentialStorage::new());
    s.store.set_tokens(TokenPair::new("a1", "r1"));

    s.auth.logout();

    assert!(s.storage.is_empty());
    assert_eq!(s.navigator.calls().len(), 1);
}
