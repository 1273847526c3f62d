use serde::{Deserialize, Serialize};

/// Identity attached to a valid platform session.
///
/// The platform returns a larger user document; only the fields the gate's
/// access policy reads are modeled here. Unknown fields are ignored on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformIdentity {
    pub org_id: String,
    pub username: String,
}
