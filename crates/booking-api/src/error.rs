use thiserror::Error;

/// Top-level error type for the `booking-api` crate.
///
/// Covers every failure mode of a single remote call: the request never
/// reached the server, the server answered with a failure status, or the
/// body could not be read as JSON. `booking-core` folds these into the
/// store-level failure taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Remote ──────────────────────────────────────────────────────
    /// The server answered with a non-2xx status.
    #[error("Remote API error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The response body was not valid JSON, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_shows_status_and_message() {
        let err = Error::Remote {
            status: 503,
            message: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "Remote API error (HTTP 503): unavailable");
    }

    #[test]
    fn deserialization_display_omits_body() {
        let err = Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        };
        assert!(!err.to_string().contains("<html>"));
    }
}
