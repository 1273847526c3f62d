//! Pluggable fallback authenticators for routes outside SSO authority.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use http::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::config::GateConfig;
use crate::plugin::Decision;
use crate::request::RequestMeta;

/// Secondary authentication strategy consulted for excluded routes.
///
/// Exactly three operations; any implementation is substitutable without
/// touching the gate.
#[async_trait]
pub trait FallbackAuth: Send + Sync {
    /// True if this fallback claims the request's path.
    fn matches(&self, request: &RequestMeta) -> bool;

    /// Authenticate the request. Fallbacks never redirect.
    async fn authenticate(&self, request: &RequestMeta) -> Decision;

    /// Inject credentials this fallback would accept, for test harnesses.
    fn apply_test_credentials(&self, headers: &mut HeaderMap);
}

/// HTTP Basic fallback: the API key as username, blank password.
#[derive(Debug, Clone)]
pub struct HeaderBasicAuth {
    prefixes: Vec<String>,
    api_key: String,
}

impl HeaderBasicAuth {
    pub fn new(prefixes: Vec<String>, api_key: &str) -> Self {
        Self {
            prefixes,
            api_key: api_key.to_string(),
        }
    }

    /// Basic auth scoped to the configured API prefix.
    pub fn for_api(config: &GateConfig, api_key: &str) -> Self {
        Self::new(vec![config.api_prefix.clone()], api_key)
    }

    fn credentials(&self, request: &RequestMeta) -> Option<String> {
        let encoded = request.authorization.as_deref()?.strip_prefix("Basic ")?;
        let decoded = BASE64.decode(encoded.trim()).ok()?;
        String::from_utf8(decoded).ok()
    }
}

#[async_trait]
impl FallbackAuth for HeaderBasicAuth {
    fn matches(&self, request: &RequestMeta) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| request.path.starts_with(prefix))
    }

    async fn authenticate(&self, request: &RequestMeta) -> Decision {
        match self.credentials(request) {
            Some(credentials) => {
                let username = credentials.split(':').next().unwrap_or("");
                if username == self.api_key {
                    Decision::Granted
                } else {
                    tracing::debug!(path = %request.path, "basic credentials rejected");
                    Decision::Denied
                }
            }
            None => Decision::Denied,
        }
    }

    fn apply_test_credentials(&self, headers: &mut HeaderMap) {
        let token = BASE64.encode(format!("{}:", self.api_key));
        if let Ok(value) = HeaderValue::from_str(&format!("Basic {}", token)) {
            headers.insert(AUTHORIZATION, value);
        }
    }
}

/// Fallback that claims nothing and admits nobody.
#[derive(Debug, Clone, Default)]
pub struct DenyAll;

#[async_trait]
impl FallbackAuth for DenyAll {
    fn matches(&self, _request: &RequestMeta) -> bool {
        false
    }

    async fn authenticate(&self, _request: &RequestMeta) -> Decision {
        Decision::Denied
    }

    fn apply_test_credentials(&self, _headers: &mut HeaderMap) {}
}
