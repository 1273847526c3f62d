use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::Deserialize;

use crate::error::{Result, SessionError};
use crate::models::PlatformIdentity;

/// Path of the platform's session check endpoint.
const CHECK_SESSION_PATH: &str = "/api/v1/auth/checkSession";

/// Cookie name the platform expects the session id under.
const SESSION_COOKIE: &str = "connect.sid";

/// Async seam for validating a platform session id.
///
/// Object safe so the gate can hold `Arc<dyn SessionValidator>` and tests
/// can substitute counting doubles.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a session id against the platform.
    ///
    /// Returns the identity bound to the session, or an error when the
    /// session is invalid, the response is malformed, or the round-trip
    /// fails. Callers decide whether those causes matter; the gate treats
    /// them all as "anonymous".
    async fn validate_session(&self, sid: &str) -> Result<PlatformIdentity>;
}

/// Response envelope the platform wraps results in.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    result: Option<PlatformIdentity>,
}

/// HTTP client for the platform session service.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    base_url: String,
    http: reqwest::Client,
}

impl PlatformClient {
    /// Build a client for the given platform base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SessionError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SessionValidator for PlatformClient {
    async fn validate_session(&self, sid: &str) -> Result<PlatformIdentity> {
        let url = format!("{}{}", self.base_url, CHECK_SESSION_PATH);
        tracing::debug!(url = %url, "checking platform session");

        // The platform reads the session id from its own cookie, not from a
        // bearer header.
        let response = self
            .http
            .get(&url)
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, sid))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SessionError::InvalidSession);
        }
        if !status.is_success() {
            return Err(SessionError::MalformedResponse(format!(
                "unexpected status {}",
                status
            )));
        }

        let envelope: Envelope = response.json().await?;

        if !envelope.success {
            return Err(SessionError::InvalidSession);
        }

        envelope.result.ok_or_else(|| {
            SessionError::MalformedResponse("success envelope without a result".to_string())
        })
    }
}
