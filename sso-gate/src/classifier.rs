//! Request classification: which paths fall under the gate's authority.

use crate::config::GateConfig;

/// Path-prefix matcher for routes excluded from SSO authority, built once
/// from the configured admin, API-doc and API prefixes.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    prefixes: Vec<String>,
}

impl ExclusionMatcher {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            prefixes: vec![
                config.admin_prefix.clone(),
                config.api_doc_prefix.clone(),
                config.api_prefix.clone(),
            ],
        }
    }

    /// True when the path is outside the gate's primary responsibility.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }
}
