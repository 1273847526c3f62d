use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};

fn default_session_cookies() -> Vec<String> {
    vec!["connect.sid".to_string(), "dashboard.sid".to_string()]
}

fn default_gate_session_cookie() -> String {
    "gate.sid".to_string()
}

/// Gate configuration, built once at construction and never re-read per
/// request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Path prefix of the administrative UI (excluded from SSO authority).
    pub admin_prefix: String,
    /// Path prefix of the API documentation (excluded from SSO authority).
    pub api_doc_prefix: String,
    /// Path prefix of the API root (excluded from SSO authority).
    pub api_prefix: String,
    /// Base URL of the SSO login endpoint browsers are redirected to.
    pub sso_base_url: String,
    /// Candidate platform session cookie names, in priority order.
    #[serde(default = "default_session_cookies")]
    pub session_cookies: Vec<String>,
    /// Host session cookie the in-memory session store is keyed on.
    #[serde(default = "default_gate_session_cookie")]
    pub gate_session_cookie: String,
    /// Allowed organization ids. `None` means no restriction.
    #[serde(default)]
    pub valid_orgs: Option<Vec<String>>,
    /// Allowed usernames. `None` means no restriction.
    #[serde(default)]
    pub valid_emails: Option<Vec<String>>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            admin_prefix: "/admin".to_string(),
            api_doc_prefix: "/apidoc".to_string(),
            api_prefix: "/api".to_string(),
            sso_base_url: "https://login.example.com".to_string(),
            session_cookies: default_session_cookies(),
            gate_session_cookie: default_gate_session_cookie(),
            valid_orgs: None,
            valid_emails: None,
        }
    }
}

impl GateConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, prefix) in [
            ("admin_prefix", &self.admin_prefix),
            ("api_doc_prefix", &self.api_doc_prefix),
            ("api_prefix", &self.api_prefix),
        ] {
            if !prefix.starts_with('/') {
                return Err(GateError::InvalidConfig(format!(
                    "{} must start with '/': {:?}",
                    name, prefix
                )));
            }
        }

        if !self.sso_base_url.starts_with("http://") && !self.sso_base_url.starts_with("https://") {
            return Err(GateError::InvalidConfig(format!(
                "sso_base_url must be an absolute http(s) URL: {:?}",
                self.sso_base_url
            )));
        }

        if self.session_cookies.is_empty() {
            return Err(GateError::InvalidConfig(
                "session_cookies must name at least one cookie".to_string(),
            ));
        }

        Ok(())
    }
}
