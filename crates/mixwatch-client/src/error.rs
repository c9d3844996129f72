use thiserror::Error;

/// Failure taxonomy for a single fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a successful response: connection
    /// failure, timeout, or a non-success HTTP status.
    #[error("transport failure for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The response body could not be decoded.
    #[error("malformed response from {url}: {reason}")]
    Parse { url: String, reason: String },
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// The URL the failing request was sent to.
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Parse { url, .. } => url,
        }
    }
}
