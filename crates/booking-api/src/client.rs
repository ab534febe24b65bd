// Booking API HTTP client
//
// Wraps `reqwest::Client` with collection URL construction, scope query
// parameters and status/body handling. Bodies are returned as raw
// `serde_json::Value` so the caller can normalize identifiers before
// typed decoding.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Longest body excerpt carried in error messages.
const BODY_PREVIEW_LEN: usize = 200;

/// A single `field=value` query filter narrowing a collection fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub field: String,
    pub value: String,
}

impl Scope {
    pub fn new(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

/// Raw HTTP client for the booking API.
///
/// Every collection lives at `{base}/{collection}`. Reads may carry one
/// scope query parameter; absence of a scope means "fetch all".
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{collection}[?field=value]`.
    pub fn collection_url(&self, collection: &str, scope: Option<&Scope>) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let collection = collection.trim_matches('/');
        let mut url = Url::parse(&format!("{base}/{collection}"))?;
        if let Some(scope) = scope {
            url.query_pairs_mut()
                .append_pair(&scope.field, &scope.value);
        }
        Ok(url)
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// GET a collection, optionally narrowed by a scope parameter.
    pub async fn list(&self, collection: &str, scope: Option<&Scope>) -> Result<Value, Error> {
        let url = self.collection_url(collection, scope)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        parse_body(resp).await
    }

    /// POST a new record into a collection.
    ///
    /// Returns the decoded response body, or `Value::Null` when the server
    /// answers with an empty body.
    pub async fn create(
        &self,
        collection: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        let url = self.collection_url(collection, None)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        parse_body(resp).await
    }
}

/// Check the status and decode the body as JSON.
async fn parse_body(resp: reqwest::Response) -> Result<Value, Error> {
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Remote {
            status: status.as_u16(),
            message: remote_message(status, &body),
        });
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(len = body.len(), "response body received");

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

/// Prefer a JSON `{"message": ...}` or `{"error": ...}` field, fall back to
/// the status text plus a body preview.
fn remote_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        let explicit = map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str);
        if let Some(msg) = explicit {
            return msg.to_owned();
        }
    }
    let preview = preview(body);
    if preview.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {preview}")
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn collection_url_without_scope() {
        let c = client("http://localhost:3000/api");
        let url = c.collection_url("practitioners", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/practitioners");
    }

    #[test]
    fn collection_url_trims_slashes() {
        let c = client("http://localhost:3000/api/");
        let url = c.collection_url("/patients/", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/patients");
    }

    #[test]
    fn collection_url_with_scope() {
        let c = client("http://localhost:3000/api");
        let scope = Scope::new("practitionerId", 10);
        let url = c.collection_url("availabilities", Some(&scope)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/availabilities?practitionerId=10"
        );
    }

    #[test]
    fn remote_message_prefers_json_message() {
        let msg = remote_message(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"message":"slot already taken"}"#,
        );
        assert_eq!(msg, "slot already taken");
    }

    #[test]
    fn remote_message_falls_back_to_status() {
        let msg = remote_message(reqwest::StatusCode::BAD_GATEWAY, "");
        assert_eq!(msg, "HTTP 502 Bad Gateway");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "é".repeat(300);
        assert_eq!(preview(&body).chars().count(), BODY_PREVIEW_LEN);
    }
}
