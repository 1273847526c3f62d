//! End-to-end tests for the gate mounted as axum middleware.
//!
//! These tests verify that:
//! 1. Anonymous browsers are redirected to the SSO login URL
//! 2. Anonymous XHR requests are rejected without a redirect
//! 3. A valid platform cookie is validated once and then served from cache
//! 4. Excluded API routes are handled by the Basic fallback only

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::{middleware, routing::get, Router};
use http::{header, Request, StatusCode};
use session_client::{PlatformIdentity, SessionError, SessionValidator};
use sso_gate::{GateConfig, GateState, HeaderBasicAuth, SsoGate};
use tower::ServiceExt;

const API_KEY: &str = "test-api-key";

struct CountingValidator {
    calls: AtomicUsize,
    identity: Option<PlatformIdentity>,
}

impl CountingValidator {
    fn accepting() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            identity: Some(PlatformIdentity {
                org_id: "14301".to_string(),
                username: "dev@example.com".to_string(),
            }),
        })
    }

    fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            identity: None,
        })
    }
}

#[async_trait]
impl SessionValidator for CountingValidator {
    async fn validate_session(&self, _sid: &str) -> session_client::Result<PlatformIdentity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.identity.clone().ok_or(SessionError::InvalidSession)
    }
}

/// Router with one protected page and one API route, behind the gate.
fn app(validator: Arc<dyn SessionValidator>) -> (Router, Arc<SsoGate>) {
    let config = GateConfig::default();
    let fallback = Arc::new(HeaderBasicAuth::for_api(&config, API_KEY));
    let gate = Arc::new(SsoGate::new(config, validator, fallback).expect("gate should build"));

    let router = Router::new()
        .route("/dashboard/apps", get(|| async { "apps" }))
        .route("/api/v1/things", get(|| async { "things" }))
        .layer(middleware::from_fn_with_state(
            GateState::new(gate.clone()),
            sso_gate::require_platform_session,
        ));

    (router, gate)
}

fn request(path: &str) -> http::request::Builder {
    Request::builder()
        .uri(path)
        .header(header::HOST, "dashboard.example.com")
}

#[tokio::test]
async fn test_anonymous_browser_is_redirected_to_sso() {
    let (app, _) = app(CountingValidator::rejecting());

    let response = app
        .oneshot(request("/dashboard/apps").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .expect("Location header should be present");
    assert_eq!(
        location,
        "https://login.example.com/?redirect=https%3A%2F%2Fdashboard.example.com%2Fdashboard%2Fapps"
    );
}

#[tokio::test]
async fn test_anonymous_xhr_is_rejected_without_redirect() {
    let (app, _) = app(CountingValidator::rejecting());

    let response = app
        .oneshot(
            request("/dashboard/apps")
                .header("X-Requested-With", "XMLHttpRequest")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::LOCATION).is_none());
}

#[tokio::test]
async fn test_valid_cookie_is_validated_once_then_cached() {
    let validator = CountingValidator::accepting();
    let (app, _) = app(validator.clone());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                request("/dashboard/apps")
                    .header(header::COOKIE, "connect.sid=abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(validator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_invalid_cookie_still_redirects_browser() {
    let (app, _) = app(CountingValidator::rejecting());

    let response = app
        .oneshot(
            request("/dashboard/apps")
                .header(header::COOKIE, "connect.sid=expired")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_api_route_accepts_fallback_credentials() {
    let (app, gate) = app(CountingValidator::rejecting());

    let mut builder = request("/api/v1/things");
    let headers = builder.headers_mut().expect("builder headers");
    gate.apply_test_credentials(headers);

    let response = app
        .oneshot(builder.body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_route_without_credentials_is_rejected_not_redirected() {
    let (app, _) = app(CountingValidator::accepting());

    let response = app
        .oneshot(
            request("/api/v1/things")
                .header(header::COOKIE, "connect.sid=abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    // A platform cookie is irrelevant here; the fallback owns this route.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::LOCATION).is_none());
}

#[tokio::test]
async fn test_changed_cookie_forces_revalidation() {
    let validator = CountingValidator::accepting();
    let (app, _) = app(validator.clone());

    for sid in ["first", "second"] {
        let response = app
            .clone()
            .oneshot(
                request("/dashboard/apps")
                    .header(header::COOKIE, format!("connect.sid={}", sid))
                    .header(header::COOKIE, "gate.sid=host-1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(validator.calls.load(Ordering::SeqCst), 2);
}
