//! The gate itself: classification, session validation, policy, redirect.

use std::sync::Arc;

use http::header::HeaderMap;
use session_client::SessionValidator;

use crate::classifier::ExclusionMatcher;
use crate::config::GateConfig;
use crate::error::Result;
use crate::fallback::FallbackAuth;
use crate::policy::AccessPolicy;
use crate::request::RequestMeta;
use crate::session::SessionState;

/// Outcome of authenticating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the request through.
    Granted,
    /// Reject without redirecting. Used for XHR requests, fallback refusals
    /// and allow-list rejections, where a redirect would loop or be
    /// meaningless.
    Denied,
    /// Send the browser to the SSO login endpoint.
    Redirect(String),
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }
}

/// SSO authentication gate.
///
/// Owns an immutable configuration, the exclusion matcher and access policy
/// derived from it, a session validator for the remote platform, and a
/// fallback authenticator for excluded routes.
pub struct SsoGate {
    config: GateConfig,
    exclude: ExclusionMatcher,
    policy: AccessPolicy,
    validator: Arc<dyn SessionValidator>,
    fallback: Arc<dyn FallbackAuth>,
}

impl SsoGate {
    pub fn new(
        config: GateConfig,
        validator: Arc<dyn SessionValidator>,
        fallback: Arc<dyn FallbackAuth>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            exclude: ExclusionMatcher::new(&config),
            policy: AccessPolicy::new(&config),
            config,
            validator,
            fallback,
        })
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// True if the gate intercepts this request.
    ///
    /// Non-excluded paths are always ours. Excluded paths are still
    /// intercepted when the fallback claims them, unless `skip_fallback`
    /// suppresses that consultation (used internally to avoid mutual
    /// recursion with the fallback's own matcher).
    pub fn matches(&self, request: &RequestMeta, skip_fallback: bool) -> bool {
        if !self.exclude.is_excluded(&request.path) {
            return true;
        }

        if !skip_fallback && self.fallback.matches(request) {
            return true;
        }

        false
    }

    /// Authenticate one request against the platform session service.
    pub async fn authenticate(
        &self,
        request: &RequestMeta,
        session: &mut SessionState,
    ) -> Decision {
        // Excluded path: the fallback owns it entirely.
        if !self.matches(request, true) {
            return self.fallback.authenticate(request).await;
        }

        let sid = request.platform_sid.clone();

        // Unchanged cookie with a cached identity: no remote call.
        if sid.is_some() && session.sid == sid && session.user.is_some() {
            tracing::trace!(path = %request.path, "session cache hit");
            return Decision::Granted;
        }

        // Treat the session as unauthenticated until proven otherwise.
        session.reset(sid.clone());

        if let Some(sid) = sid {
            match self.validator.validate_session(&sid).await {
                Ok(identity) => {
                    if !self.policy.allows(&identity) {
                        // Redirecting a known-disallowed identity would loop.
                        tracing::debug!(
                            username = %identity.username,
                            org_id = %identity.org_id,
                            "identity rejected by allow-list"
                        );
                        return Decision::Denied;
                    }

                    session.user = Some(identity);
                    return Decision::Granted;
                }
                Err(err) => {
                    // Every failure collapses to "anonymous".
                    tracing::debug!(error = %err, "session validation failed");
                }
            }
        }

        // Redirects are meaningless to programmatic clients.
        if request.is_xhr {
            return Decision::Denied;
        }

        Decision::Redirect(self.login_redirect(request))
    }

    /// Inject fallback credentials for test harnesses.
    pub fn apply_test_credentials(&self, headers: &mut HeaderMap) {
        self.fallback.apply_test_credentials(headers);
    }

    /// Build the SSO login URL carrying the current location.
    ///
    /// The return URL is always `https`: behind a TLS-terminating proxy the
    /// inbound hop may be plain HTTP, and echoing that scheme back would
    /// loop through the login endpoint forever.
    fn login_redirect(&self, request: &RequestMeta) -> String {
        let host = request.host.as_deref().unwrap_or_default();
        let current_url = format!("https://{}{}", host, request.path);

        format!(
            "{}/?redirect={}",
            self.config.sso_base_url.trim_end_matches('/'),
            urlencoding::encode(&current_url)
        )
    }
}
