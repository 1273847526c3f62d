//! Axum glue: turn gate decisions into responses.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use http::StatusCode;

use crate::plugin::{Decision, SsoGate};
use crate::request::RequestMeta;
use crate::session::{SessionState, SessionStore};

/// Shared state for [`require_platform_session`].
#[derive(Clone)]
pub struct GateState {
    plugin: Arc<SsoGate>,
    sessions: Arc<SessionStore>,
}

impl GateState {
    pub fn new(plugin: Arc<SsoGate>) -> Self {
        Self {
            plugin,
            sessions: Arc::new(SessionStore::new()),
        }
    }

    pub fn plugin(&self) -> &Arc<SsoGate> {
        &self.plugin
    }
}

/// Middleware for `axum::middleware::from_fn_with_state`.
///
/// Session state is kept under the host session cookie; when that cookie is
/// absent the presented platform cookie keys the cache instead, and a
/// request with neither gets a transient state that is never persisted.
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/dashboard", get(dashboard))
///     .layer(middleware::from_fn_with_state(
///         GateState::new(gate),
///         require_platform_session,
///     ));
/// ```
pub async fn require_platform_session(
    State(state): State<GateState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let meta = RequestMeta::from_parts(&parts, state.plugin.config());
    let request = Request::from_parts(parts, body);

    let key = meta
        .gate_session_key
        .clone()
        .or_else(|| meta.platform_sid.clone());

    let mut session = match key.as_deref() {
        Some(key) => state.sessions.load(key).await,
        None => SessionState::default(),
    };

    let decision = state.plugin.authenticate(&meta, &mut session).await;

    if let Some(ref key) = key {
        state.sessions.save(key, session).await;
    }

    match decision {
        Decision::Granted => next.run(request).await,
        Decision::Denied => {
            tracing::debug!(path = %meta.path, "request denied");
            StatusCode::UNAUTHORIZED.into_response()
        }
        Decision::Redirect(url) => {
            tracing::debug!(path = %meta.path, location = %url, "redirecting to SSO");
            Redirect::to(&url).into_response()
        }
    }
}
