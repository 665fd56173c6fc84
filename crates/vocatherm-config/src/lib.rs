//! Configuration for the vocatherm bridge.
//!
//! TOML file + `VOCATHERM_`-prefixed environment variables, merged with
//! figment. Two sections: the Domoticz server and the MQTT broker the
//! voice runtime lives on. Defaults match a stock LAN installation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vocatherm_api::{BasicCredentials, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub mqtt: MqttConfig,
}

/// Domoticz server section.
#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Basic-auth username; empty or absent disables auth.
    pub username: Option<String>,

    /// Basic-auth password (plaintext in the file -- prefer the
    /// `VOCATHERM_SERVER_PASSWORD` environment variable).
    pub password: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            username: None,
            password: None,
            timeout: default_timeout(),
        }
    }
}

/// MQTT broker section (where the voice runtime publishes intents).
#[derive(Debug, Deserialize, Serialize)]
pub struct MqttConfig {
    #[serde(default = "default_mqtt_host")]
    pub host: String,

    #[serde(default = "default_mqtt_port")]
    pub port: u16,

    pub username: Option<String>,

    pub password: Option<String>,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: default_mqtt_host(),
            port: default_mqtt_port(),
            username: None,
            password: None,
        }
    }
}

fn default_server_host() -> String {
    "192.168.0.160".into()
}
fn default_server_port() -> u16 {
    8080
}
fn default_timeout() -> u64 {
    10
}
fn default_mqtt_host() -> String {
    "localhost".into()
}
fn default_mqtt_port() -> u16 {
    1883
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("fr", "onlinux", "vocatherm").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vocatherm");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
///
/// `path` overrides the canonical location; a missing file is fine --
/// defaults and environment still apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("VOCATHERM_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Translation to API types ────────────────────────────────────────

impl ServerConfig {
    /// The Domoticz base URL, e.g. `http://192.168.0.160:8080`.
    pub fn base_url(&self) -> Result<url::Url, ConfigError> {
        let raw = format!("http://{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Validation {
            field: "server.host".into(),
            reason: format!("invalid URL: {raw}"),
        })
    }

    /// Basic credentials, if a non-empty username is configured.
    pub fn credentials(&self) -> Option<BasicCredentials> {
        let username = self.username.clone().filter(|u| !u.is_empty())?;
        let password = self.password.clone().unwrap_or_default();
        Some(BasicCredentials {
            username,
            password: SecretString::from(password),
        })
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(self.timeout),
        }
    }
}
