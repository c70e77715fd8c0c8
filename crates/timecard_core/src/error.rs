use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    /// Low-level I/O error while reading or writing the local log.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted queue could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum OracleError {
    /// The server could not be reached (no connectivity, DNS failure, timeout).
    /// Transient: queued actions stay queued and the drain is retried later.
    #[error("Network error: {0}")]
    Network(String),

    /// The credential was rejected (**HTTP 401/403**).
    /// Fatal: the drain aborts and the host must re-authenticate.
    #[error("Unauthorized: credentials rejected")]
    Unauthorized,

    /// The server refused the command as logically invalid (**HTTP 4xx**),
    /// e.g. stopping a job with no open interval.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The server failed (**HTTP 5xx**). Transient, retried like a network error.
    #[error("Server error {0}: {1}")]
    Server(u16, String),

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl OracleError {
    /// A fatal error aborts the drain and requires re-authentication.
    pub fn is_fatal(&self) -> bool {
        matches!(self, OracleError::Unauthorized)
    }

    /// A rejection can never succeed on retry; the offending action is dropped.
    pub fn is_rejection(&self) -> bool {
        matches!(self, OracleError::Rejected(_))
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    /// The token is invalid.
    /// Maps to **HTTP 403 Forbidden**.
    #[error("Forbidden: Credentials invalid")]
    Invalid,

    /// The token is valid but has expired.
    /// Maps to **HTTP 403**.
    #[error("Forbidden: Credentials expired")]
    Expired,

    /// The token is missing.
    /// Maps to **HTTP 401 Unauthorized**.
    #[error("Unauthorized: Credentials missing")]
    Missing,

    /// Generic system or provider failure.
    /// Maps to **HTTP 500 Internal Server Error**.
    #[error("Auth system failure: {0}")]
    System(String),
}
