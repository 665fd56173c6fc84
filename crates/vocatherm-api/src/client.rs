// Domoticz HTTP client
//
// Wraps `reqwest::Client` with `json.htm` URL construction, optional
// Basic auth, and envelope unwrapping. Endpoint groups (devices,
// hardware, commands) are implemented as inherent methods via separate
// files to keep this module focused on transport mechanics.

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ApiResponse;
use crate::transport::{BasicCredentials, TransportConfig};

/// Raw HTTP client for the Domoticz JSON API.
///
/// Every call is a GET against `/json.htm?{query}`. The query string is
/// assembled literally and percent-encoded by the URL parser, leaving
/// `&` and `=` intact -- Domoticz expects `switchcmd=Set Level` to
/// arrive as `Set%20Level`. All methods return unwrapped `result`
/// payloads; the `{status, result}` envelope is stripped before the
/// caller sees it.
pub struct DomoticzClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<BasicCredentials>,
}

impl DomoticzClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` should be the server root, e.g. `http://192.168.0.160:8080`.
    pub fn new(
        base_url: Url,
        credentials: Option<BasicCredentials>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Option<BasicCredentials>,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build the full URL for an API query: `{base}/json.htm?{query}`.
    ///
    /// The parser percent-encodes what needs encoding (spaces in
    /// `switchcmd=Set Level`) and leaves `&`/`=` alone.
    pub(crate) fn api_url(&self, query: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/json.htm?{query}");
        Url::parse(&full).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Run a query call and unwrap the envelope into its `result` array.
    pub(crate) async fn get<T: DeserializeOwned>(&self, query: &str) -> Result<Vec<T>, Error> {
        let url = self.api_url(query)?;
        debug!("GET {}", url);

        let mut builder = self.http.get(url);
        if let Some(ref creds) = self.credentials {
            // Only attach auth when a username is actually configured.
            if !creds.username.is_empty() {
                builder = builder
                    .basic_auth(&creds.username, Some(creds.password.expose_secret()));
            }
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        self.parse_envelope(resp).await
    }

    /// Run a command call, discarding any result payload.
    pub(crate) async fn command(&self, query: &str) -> Result<(), Error> {
        let _: Vec<serde_json::Value> = self.get(query).await?;
        Ok(())
    }

    /// Parse the `{ status, result }` envelope, returning `result` when
    /// `status == "OK"` or an `Error::Api` otherwise.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Vec<T>, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                message: format!("HTTP {status}: {}", preview(&body)),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        let envelope: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| {
            Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            }
        })?;

        match envelope.status.as_str() {
            "OK" => Ok(envelope.result),
            other => Err(Error::Api {
                message: format!("status = {other:?}"),
            }),
        }
    }
}

/// First 200 characters of a body, for error messages.
fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((i, _)) => &body[..i],
        None => body,
    }
}
