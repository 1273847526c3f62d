//! Client for the remote platform session service
//!
//! This crate provides the pieces the SSO gate needs to talk to the
//! platform's session endpoint:
//! - `PlatformIdentity`: the identity attached to a valid session
//! - `SessionValidator`: the async validation seam, object safe so hosts
//!   and tests can substitute their own implementation
//! - `PlatformClient`: the HTTP implementation over reqwest
//!
//! # Example
//!
//! ```rust,ignore
//! use session_client::{PlatformClient, SessionValidator};
//!
//! let client = PlatformClient::new("https://platform.example.com")?;
//! let identity = client.validate_session(&sid).await?;
//! println!("{} ({})", identity.username, identity.org_id);
//! ```

pub mod client;
pub mod error;
pub mod models;

pub use client::*;
pub use error::*;
pub use models::*;
