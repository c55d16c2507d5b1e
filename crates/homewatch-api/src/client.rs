// Backend HTTP client
//
// Wraps `reqwest::Client` with URL construction and response classification.
// Endpoint groups (alarm, nodes, actuators) are implemented as inherent
// methods in separate files to keep this module focused on transport.

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Maximum number of body bytes carried into an error message.
const BODY_PREVIEW_LEN: usize = 200;

/// Raw HTTP client for the monitoring backend.
///
/// GET endpoints return the decoded JSON body untouched; shaping it into
/// typed records is the caller's job. Mutating endpoints either return the
/// JSON result object or, for transport-ack-only commands, nothing.
#[derive(Clone)]
pub struct HomeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HomeClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root, e.g. `http://192.168.1.10:5001`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a backend path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get_json(&self, url: Url) -> Result<serde_json::Value, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::read_json(resp).await
    }

    /// Send a POST request with a JSON body and decode the JSON reply.
    pub(crate) async fn post_json(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<serde_json::Value, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        Self::read_json(resp).await
    }

    /// Send a POST request whose reply body is irrelevant: only the
    /// transport outcome and status code matter.
    pub(crate) async fn post_ack(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        debug!("POST {} (ack only)", url);
        let resp = self.http.post(url).json(body).send().await?;
        Self::check_status(resp).await.map(drop)
    }

    /// Reject non-2xx responses, keeping a short body preview for the logs.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Status {
            status: status.as_u16(),
            body: preview(&body).to_owned(),
        })
    }

    async fn read_json(resp: reqwest::Response) -> Result<serde_json::Value, Error> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
