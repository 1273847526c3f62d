use thiserror::Error;

/// Construction-time failures.
///
/// Authentication outcomes are never errors; they are `Decision` values.
/// Nothing in the per-request path returns `GateError`.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Invalid gate configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
