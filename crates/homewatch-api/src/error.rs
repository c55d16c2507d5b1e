use thiserror::Error;

/// Top-level error type for the `homewatch-api` crate.
///
/// Covers every failure mode of a single request: transport, HTTP status,
/// and body decoding. `homewatch-core` folds these into its own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// Response body was not valid JSON, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never produced a usable HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. } | Self::Tls(_))
    }

    /// HTTP status code, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
