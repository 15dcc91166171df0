//! Error types for conveyor-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid entity key: {0}")]
    InvalidKey(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("malformed record at {key}: missing field `{field}`")]
    MalformedRecord { key: String, field: &'static str },

    #[error("transaction conflict on {0}")]
    TransactionConflict(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("cloud queue error: {0}")]
    Queue(String),
}

impl Error {
    /// Is this a transient store failure worth retrying on a later tick?
    ///
    /// Conflicts and connectivity failures leave the pending document in
    /// place; everything else is a caller or data problem.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::TransactionConflict(_) | Error::StoreUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
