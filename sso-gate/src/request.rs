//! Per-request snapshot of the attributes the gate reads.
//!
//! Built once from `http::request::Parts` so the decision procedure works on
//! plain data and never touches the host framework's request type again.

use headers::{Cookie, HeaderMapExt};
use http::header;
use http::request::Parts;

use crate::config::GateConfig;

const XHR_HEADER: &str = "x-requested-with";
const XHR_VALUE: &str = "xmlhttprequest";

/// Request attributes the gate's decision procedure reads.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Original path including the query string.
    pub path: String,
    /// `Host` header, as presented by the client or proxy.
    pub host: Option<String>,
    /// True for programmatic requests (`X-Requested-With: XMLHttpRequest`).
    pub is_xhr: bool,
    /// Raw `Authorization` header, consumed by fallback authenticators.
    pub authorization: Option<String>,
    /// Platform session cookie value; first configured name present wins.
    pub platform_sid: Option<String>,
    /// Host session cookie value, used to key the session store.
    pub gate_session_key: Option<String>,
}

impl RequestMeta {
    /// Snapshot a request against the configured cookie names.
    pub fn from_parts(parts: &Parts, config: &GateConfig) -> Self {
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let is_xhr = parts
            .headers
            .get(XHR_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case(XHR_VALUE))
            .unwrap_or(false);

        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let cookies = parts.headers.typed_get::<Cookie>();

        // First configured cookie name present wins.
        let platform_sid = cookies.as_ref().and_then(|jar| {
            config
                .session_cookies
                .iter()
                .find_map(|name| jar.get(name).map(|v| v.to_string()))
        });

        let gate_session_key = cookies
            .as_ref()
            .and_then(|jar| jar.get(&config.gate_session_cookie).map(|v| v.to_string()));

        Self {
            path,
            host,
            is_xhr,
            authorization,
            platform_sid,
            gate_session_key,
        }
    }
}
