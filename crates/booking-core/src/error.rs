// ── Core error types ──
//
// `FetchFailure` is the structured value a store keeps in its `Errored`
// state; it is cloneable so every status subscriber can hold a copy.
// `CoreError` is what fallible core operations return. The
// `From<booking_api::Error>` impls fold transport-layer errors into the
// three-way failure taxonomy.

use std::fmt;

use thiserror::Error;

/// Which stage of a remote call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// No response reached the client.
    Transport,
    /// A response arrived but signalled failure.
    Remote { status: u16 },
    /// The body could not be interpreted as the expected shape.
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport failure"),
            Self::Remote { status } => write!(f, "remote failure (HTTP {status})"),
            Self::Decode => write!(f, "decode failure"),
        }
    }
}

/// Last failure recorded on an entity store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            message: message.into(),
        }
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Remote { status },
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Decode,
            message: message.into(),
        }
    }

    /// HTTP status for remote failures.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FailureKind::Remote { status } => Some(status),
            _ => None,
        }
    }
}

impl From<booking_api::Error> for FetchFailure {
    fn from(err: booking_api::Error) -> Self {
        match err {
            booking_api::Error::Remote { status, message } => Self::remote(status, message),
            booking_api::Error::Deserialization { message, body: _ } => Self::decode(message),
            e @ (booking_api::Error::Transport(_)
            | booking_api::Error::InvalidUrl(_)
            | booking_api::Error::Tls(_)) => Self::transport(e.to_string()),
        }
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote errors ────────────────────────────────────────────────
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchFailure),

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
        /// Collection the record was looked up in, e.g. `"patients"`.
        collection: String,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<booking_api::Error> for CoreError {
    fn from(err: booking_api::Error) -> Self {
        match err {
            booking_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            booking_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS setup failed: {msg}"),
            },
            other => CoreError::Fetch(FetchFailure::from(other)),
        }
    }
}
