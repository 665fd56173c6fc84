//! Bridge error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use vocatherm_config::ConfigError;

#[derive(Debug, Error, Diagnostic)]
pub enum BridgeError {
    #[error("configuration error")]
    #[diagnostic(
        code(vocatherm::config),
        help(
            "Check your config file (default: XDG config dir, override with -c)\n\
             and any VOCATHERM_-prefixed environment variables."
        )
    )]
    Config(#[from] ConfigError),

    #[error("could not reach the Domoticz server")]
    #[diagnostic(
        code(vocatherm::api),
        help("Check that Domoticz is running and that server.host/server.port are correct.")
    )]
    Api(#[from] vocatherm_api::Error),

    #[error("MQTT client error")]
    #[diagnostic(
        code(vocatherm::mqtt),
        help("Check that the broker is reachable at mqtt.host:mqtt.port.")
    )]
    Mqtt(#[from] rumqttc::ClientError),

    #[error("malformed intent payload")]
    #[diagnostic(code(vocatherm::payload))]
    Payload(#[from] serde_json::Error),
}
