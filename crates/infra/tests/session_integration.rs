//! Integration tests for the wired client session
//!
//! Drives a `Session` against a mock Vouch API: login, authenticated calls,
//! transparent refresh, and the forced return to the login route.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;
use vouch_common::auth::{logged_in_user_id, GuardDecision, NavigationRedirector};
use vouch_common::testing::{MockCredentialStorage, RecordingNavigator};
use vouch_domain::{Config, NewReview, UserId};
use vouch_infra::Session;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// payload {"user_id":9}
const USER_9_TOKEN: &str = "h.eyJ1c2VyX2lkIjo5fQ.s";

fn session(server: &MockServer) -> (Session, MockCredentialStorage, RecordingNavigator) {
    let mut config = Config::default();
    config.api.base_url = format!("{}/api/", server.uri());
    config.api.timeout_seconds = 5;

    let storage = MockCredentialStorage::new();
    let navigator = RecordingNavigator::new();
    let redirector = Arc::new(NavigationRedirector::new());
    redirector.set_navigate_handle(navigator.handle());

    let session = Session::new(&config, Arc::new(storage.clone()), redirector).unwrap();
    (session, storage, navigator)
}

/// Validates the happy path a user walks through on the events pages.
///
/// # Test Steps
/// 1. Log in and check the decoded identity
/// 2. List events with the bearer token attached
/// 3. Recognise the user's own event and cancel it
#[tokio::test(flavor = "multi_thread")]
async fn test_login_list_and_cancel_own_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access": USER_9_TOKEN, "refresh": "r1" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/events/"))
        .and(header("Authorization", format!("Bearer {USER_9_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "upcoming": [
                { "id": 1, "user": 9, "title": "Hackathon", "startTime": "2026-11-01T09:00:00Z" },
                { "id": 2, "user": 4, "title": "Quiz", "startTime": "2026-11-02T18:00:00Z" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/events/1/delete/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (session, storage, _) = session(&server);
    assert!(matches!(session.guard().check(session.store()), GuardDecision::Redirect { .. }));

    session.auth().login("student@iitb.ac.in", "hunter2").await.unwrap();
    assert_eq!(logged_in_user_id(session.store()), Some(UserId::Number(9)));
    assert_eq!(storage.entry("access").as_deref(), Some(USER_9_TOKEN));

    let listing = session.events().list_events().await.unwrap();
    let own: Vec<_> =
        listing.upcoming.iter().filter(|e| session.events().is_own_event(e)).collect();
    assert_eq!(own.len(), 1);

    session.events().cancel_event(own[0].id).await.unwrap();
}

/// Validates that an expired access token is renewed behind a review
/// submission without the caller noticing.
#[tokio::test(flavor = "multi_thread")]
async fn test_expired_token_is_refreshed_transparently() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/events/5/reviews/"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/events/5/reviews/"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 40, "rating": 5, "comment": "loved it" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;

    let (session, storage, navigator) = session(&server);
    session.store().set_tokens(vouch_common::TokenPair::new("stale", "r1"));

    let review =
        session.events().submit_review(5, NewReview::new(5, "loved it")).await.unwrap();

    assert_eq!(review.id, 40);
    assert_eq!(storage.entry("access").as_deref(), Some("fresh"));
    assert!(navigator.calls().is_empty());
}

/// Validates the end of a session: refresh is refused, the caller gets the
/// original 401, tokens are gone and the UI was sent to the login route.
#[tokio::test(flavor = "multi_thread")]
async fn test_refused_refresh_returns_401_and_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let (session, storage, navigator) = session(&server);
    session.store().set_tokens(vouch_common::TokenPair::new("stale", "r1"));

    let response = session.api().get("events/").await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(storage.is_empty());
    assert_eq!(navigator.routes(), vec!["/loginsignup".to_string()]);
    assert!(matches!(session.guard().check(session.store()), GuardDecision::Redirect { .. }));
}
