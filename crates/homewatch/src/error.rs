//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use homewatch_config::ConfigError;
use homewatch_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const REJECTED: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the monitoring server: {message}")]
    #[diagnostic(
        code(homewatch::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             Set its address with --url, HOMEWATCH_URL, or backend.url in the config file."
        )
    )]
    ConnectionFailed { message: String },

    #[error("Unexpected response from the server: {message}")]
    #[diagnostic(
        code(homewatch::bad_response),
        help("The server answered, but not with the data this client expects.")
    )]
    BadResponse { message: String },

    // ── Actions ──────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(homewatch::rejected))]
    Rejected { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(homewatch::action_failed),
        help("The request did not reach the server or it answered with an error status.")
    )]
    ActionFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(homewatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(homewatch::config),
        help("Inspect the effective settings with: homewatch config show")
    )]
    Config(Box<ConfigError>),

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(homewatch::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render configuration: {0}")]
    #[diagnostic(code(homewatch::toml))]
    Toml(#[from] toml::ser::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(homewatch::internal))]
    Internal(String),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::ActionFailed { .. } => exit_code::CONNECTION,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport { message, .. } => CliError::ConnectionFailed { message },
            CoreError::Decode { message } => CliError::BadResponse { message },
            CoreError::Application { message } => CliError::Rejected {
                message: message.unwrap_or_else(|| "Rejected by the server.".into()),
            },
            CoreError::Validation { field, message } => CliError::Validation {
                field: field.into(),
                reason: message,
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_exit_with_connection_code() {
        let err: CliError = CoreError::Transport {
            message: "connection refused".into(),
            status: None,
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn application_rejection_without_message_gets_generic_text() {
        let err: CliError = CoreError::Application { message: None }.into();
        assert_eq!(err.exit_code(), exit_code::REJECTED);
        assert_eq!(err.to_string(), "Rejected by the server.");
    }

    #[test]
    fn config_errors_are_usage_errors() {
        let err: CliError = CoreError::Config {
            message: "table_rows must be positive".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
