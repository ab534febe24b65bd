//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use booking_config::ConfigError;
use booking_core::{CoreError, FailureKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the booking API: {message}")]
    #[diagnostic(
        code(booking::connection_failed),
        help(
            "Check that the API server is running and accessible.\n\
             Override the endpoint with --base-url or BOOKING_BASE_URL."
        )
    )]
    ConnectionFailed { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(booking::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response from the API: {message}")]
    #[diagnostic(
        code(booking::unexpected_response),
        help("Is --base-url pointing at the API root (e.g. http://localhost:3000/api)?")
    )]
    UnexpectedResponse { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(booking::not_found),
        help("Run: booking {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("No availability for practitioner {practitioner} at {requested}")]
    #[diagnostic(
        code(booking::slot_unavailable),
        help("Run: booking availabilities --practitioner {practitioner} to see open slots")
    )]
    SlotUnavailable {
        practitioner: String,
        requested: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(booking::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(booking::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: booking config init --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(booking::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(booking::config))]
    Config(Box<ConfigError>),

    #[error("Internal error: {message}")]
    #[diagnostic(code(booking::internal))]
    Internal { message: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not serialize output: {0}")]
    #[diagnostic(code(booking::json))]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. }
            | Self::ProfileNotFound { .. }
            | Self::ApiError { status: 404, .. } => exit_code::NOT_FOUND,
            Self::ApiError { status: 409, .. } | Self::SlotUnavailable { .. } => {
                exit_code::CONFLICT
            }
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Fetch(failure) => match failure.kind {
                FailureKind::Transport => CliError::ConnectionFailed {
                    message: failure.message,
                },
                FailureKind::Remote { status } => CliError::ApiError {
                    status,
                    message: failure.message,
                },
                FailureKind::Decode => CliError::UnexpectedResponse {
                    message: failure.message,
                },
            },

            CoreError::NotFound {
                entity_type,
                identifier,
                collection,
            } => CliError::NotFound {
                resource_type: entity_type,
                identifier,
                list_command: collection,
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "booking".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}
