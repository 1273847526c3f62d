//! Per-session identity cache.

use std::collections::HashMap;

use session_client::PlatformIdentity;
use tokio::sync::RwLock;

/// Cached validation outcome attached to one host session.
///
/// `user` is a cache, not a source of truth: it is populated only by a
/// successful validation and cleared whenever the presented platform cookie
/// differs from `sid`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Last platform session cookie seen on this session.
    pub sid: Option<String>,
    /// Identity resolved for `sid`, if validation succeeded.
    pub user: Option<PlatformIdentity>,
}

impl SessionState {
    /// Record a newly presented (possibly absent) cookie value and drop the
    /// cached identity until validation proves it again.
    pub fn reset(&mut self, sid: Option<String>) {
        self.sid = sid;
        self.user = None;
    }
}

/// In-memory session store (for single-instance deployments)
/// For distributed systems, use Redis or similar
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<String, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the state for a session key, empty when first seen.
    pub async fn load(&self, key: &str) -> SessionState {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Persist the state for a session key.
    pub async fn save(&self, key: &str, state: SessionState) {
        let mut entries = self.entries.write().await;

        // Unauthenticated entries carry no information worth keeping.
        if entries.len() > 10_000 {
            entries.retain(|_, entry| entry.user.is_some());
        }

        entries.insert(key.to_string(), state);
    }
}
