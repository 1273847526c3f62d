use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session is invalid or expired")]
    InvalidSession,

    #[error("Malformed session service response: {0}")]
    MalformedResponse(String),

    #[error("Session service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid session service base URL: {0}")]
    InvalidBaseUrl(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
