use crate::validate::ValidationFailed;
use thiserror::Error;

/// Failure classes for gateway operations. `SessionExpired` is always paired
/// with clearing the stored session; `Network` leaves it untouched.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session expired. Please login again.")]
    SessionExpired,

    #[error("{0}")]
    RequestFailed(String),

    #[error("network error: {0}")]
    Network(#[source] Box<ureq::Transport>),

    #[error(transparent)]
    Validation(#[from] ValidationFailed),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;
