//! SSO authentication gate for axum applications
//!
//! Per request, the gate decides whether the visitor holds a valid session
//! against a remote platform session service. Visitors without one are
//! redirected to the SSO login endpoint (browsers) or rejected outright
//! (XHR). Routes under the configured admin, API-doc and API prefixes are
//! outside the gate's authority and handed to a pluggable fallback
//! authenticator instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use axum::{middleware, routing::get, Router};
//! use session_client::PlatformClient;
//! use sso_gate::{GateConfig, GateState, HeaderBasicAuth, SsoGate};
//!
//! let config = GateConfig::default();
//! let fallback = Arc::new(HeaderBasicAuth::for_api(&config, &api_key));
//! let validator = Arc::new(PlatformClient::new("https://platform.example.com")?);
//! let gate = Arc::new(SsoGate::new(config, validator, fallback)?);
//!
//! let app = Router::new()
//!     .route("/dashboard", get(dashboard))
//!     .layer(middleware::from_fn_with_state(
//!         GateState::new(gate),
//!         sso_gate::require_platform_session,
//!     ));
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod fallback;
pub mod middleware;
pub mod plugin;
pub mod policy;
pub mod request;
pub mod session;

pub use config::GateConfig;
pub use error::{GateError, Result};
pub use fallback::{DenyAll, FallbackAuth, HeaderBasicAuth};
pub use middleware::{require_platform_session, GateState};
pub use plugin::{Decision, SsoGate};
pub use request::RequestMeta;
pub use session::{SessionState, SessionStore};
