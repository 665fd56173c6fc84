//! Clap derive structures for the `vocatherm` binary.

use std::path::PathBuf;

use clap::Parser;

/// vocatherm -- voice-controlled thermostat bridge for Domoticz
#[derive(Debug, Parser)]
#[command(
    name = "vocatherm",
    version,
    about = "Bridge spoken thermostat intents to a Domoticz server",
    long_about = "Listens for recognized thermostat intents on the voice runtime's\n\
        MQTT bus, translates them into Domoticz device-control calls, and\n\
        answers each one with a spoken confirmation."
)]
pub struct Cli {
    /// Config file path (default: XDG config dir)
    #[arg(long, short = 'c', env = "VOCATHERM_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Domoticz host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Domoticz port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// MQTT broker host (overrides config)
    #[arg(long)]
    pub mqtt_host: Option<String>,

    /// MQTT broker port (overrides config)
    #[arg(long)]
    pub mqtt_port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
