use thiserror::Error;

/// Top-level error type for the `vocatherm-api` crate.
///
/// Covers every failure mode of the Domoticz JSON API round trip:
/// transport, envelope status, and payload decoding. `vocatherm-core`
/// maps these into logged absences -- the facade never surfaces them
/// to the voice runtime.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Error reported by the server: non-2xx HTTP status, or a JSON
    /// envelope whose `status` field is not `"OK"`.
    #[error("Domoticz API error: {message}")]
    Api { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A status query returned an empty `result` array where one entry
    /// was expected.
    #[error("Empty result set from device status query")]
    EmptyResult,
}
