// ── Core error types ──
//
// Consumers never see raw reqwest or serde errors: the `From` impl folds
// every `homewatch_api::Error` into either a transport or a decode failure.

use thiserror::Error;

use crate::decode::DecodeError;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// Network failure, non-success HTTP status, or TLS/URL setup problem.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        /// HTTP status code, when the backend produced one.
        status: Option<u16>,
    },

    /// The response arrived but did not have the expected shape.
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// The backend understood the request and refused it (`success: false`).
    #[error("Rejected by backend: {}", message.as_deref().unwrap_or("no message"))]
    Application { message: Option<String> },

    /// Local input validation failed before anything was sent.
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// `true` for failures that happened on the wire rather than in our data.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<homewatch_api::Error> for CoreError {
    fn from(err: homewatch_api::Error) -> Self {
        match err {
            homewatch_api::Error::Deserialization { message, .. } => CoreError::Decode { message },
            other => CoreError::Transport {
                status: other.status(),
                message: other.to_string(),
            },
        }
    }
}

impl From<DecodeError> for CoreError {
    fn from(err: DecodeError) -> Self {
        CoreError::Decode {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_maps_to_transport() {
        let err: CoreError = homewatch_api::Error::Status {
            status: 502,
            body: "bad gateway".into(),
        }
        .into();
        assert!(err.is_transport());
        assert!(matches!(err, CoreError::Transport { status: Some(502), .. }));
    }

    #[test]
    fn deserialization_maps_to_decode() {
        let err: CoreError = homewatch_api::Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Decode { .. }));
    }

    #[test]
    fn application_error_without_message() {
        let err = CoreError::Application { message: None };
        assert_eq!(err.to_string(), "Rejected by backend: no message");
    }
}
