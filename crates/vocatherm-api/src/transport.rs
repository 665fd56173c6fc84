// Transport configuration for building reqwest::Client instances.
//
// Domoticz installations on a LAN speak plain HTTP with optional Basic
// auth. The one setting that matters is the timeout: the bridge handles
// intents synchronously, so a hung request would block the whole voice
// session. Never leave it unbounded.

use std::time::Duration;

use secrecy::SecretString;

/// HTTP Basic credentials, applied to every request when present.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: SecretString,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("vocatherm/0.1.0")
            .build()
            .map_err(crate::error::Error::Transport)
    }
}
