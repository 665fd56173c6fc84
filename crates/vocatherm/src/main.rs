mod cli;
mod error;
mod hermes;

use std::time::Duration;

use clap::Parser;
use rumqttc::{AsyncClient, Event, Incoming, MqttOptions, QoS};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use vocatherm_api::DomoticzClient;
use vocatherm_core::{Dispatcher, InitStatus, Thermostat};

use crate::cli::Cli;
use crate::error::BridgeError;
use crate::hermes::{
    EndSession, IntentMessage, SUBSCRIBED_INTENTS, TOPIC_END_SESSION, TOPIC_INTENT_PREFIX,
};

// One thermostat, one dialogue at a time. A multi-threaded runtime
// would buy nothing here.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    if let Err(err) = run(cli).await {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), BridgeError> {
    let mut config = vocatherm_config::load_config(cli.config.as_deref())?;

    // CLI flags win over file and environment.
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.mqtt_host {
        config.mqtt.host = host;
    }
    if let Some(port) = cli.mqtt_port {
        config.mqtt.port = port;
    }

    let client = DomoticzClient::new(
        config.server.base_url()?,
        config.server.credentials(),
        &config.server.transport(),
    )?;
    info!(server = %client.base_url(), "connecting to Domoticz");

    let mut thermostat = Thermostat::discover(client).await;
    match thermostat.init_status() {
        InitStatus::Full => info!("all thermostat devices resolved"),
        InitStatus::Partial(missing) => {
            let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
            warn!(missing = ?missing, "some thermostat devices were not found");
        }
        InitStatus::Failed => {
            warn!("device discovery failed, intents will be answered with an apology");
        }
    }
    thermostat.log_snapshot().await;

    let mut dispatcher = Dispatcher::new(thermostat);

    let mut options = MqttOptions::new("vocatherm", &config.mqtt.host, config.mqtt.port);
    options.set_keep_alive(Duration::from_secs(30));
    if let (Some(user), Some(pass)) = (&config.mqtt.username, &config.mqtt.password) {
        if !user.is_empty() {
            options.set_credentials(user, pass);
        }
    }

    let (mqtt, mut eventloop) = AsyncClient::new(options, 16);
    for intent in SUBSCRIBED_INTENTS {
        mqtt.subscribe(format!("{TOPIC_INTENT_PREFIX}{intent}"), QoS::AtMostOnce)
            .await?;
    }
    info!(
        broker = %format!("{}:{}", config.mqtt.host, config.mqtt.port),
        "listening for thermostat intents"
    );

    // Intents are handled inline, one at a time. An utterance that
    // arrives while another is in flight waits in the broker queue.
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Incoming::Publish(publish))) => {
                if let Err(err) = handle_publish(&mqtt, &mut dispatcher, &publish.payload).await {
                    warn!(error = %err, topic = %publish.topic, "intent handling failed");
                }
            }
            Ok(Event::Incoming(Incoming::ConnAck(_))) => {
                info!("mqtt connected");
            }
            Ok(event) => {
                debug!(?event, "mqtt event");
            }
            Err(err) => {
                warn!(error = %err, "mqtt connection lost, retrying");
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}

/// Decode one intent message, run it, and close the dialogue session
/// with the resulting sentence.
async fn handle_publish(
    mqtt: &AsyncClient,
    dispatcher: &mut Dispatcher,
    payload: &[u8],
) -> Result<(), BridgeError> {
    let message: IntentMessage = serde_json::from_slice(payload)?;

    let Some(intent) = message.to_intent() else {
        debug!(intent = %message.intent.intent_name, "ignoring unknown intent");
        return Ok(());
    };

    info!(
        intent = %message.intent.intent_name,
        session = %message.session_id,
        input = message.input.as_deref().unwrap_or(""),
        "handling intent"
    );
    let sentence = dispatcher.handle(intent).await;
    info!(sentence = %sentence, "answering");

    let end = EndSession {
        session_id: &message.session_id,
        text: &sentence,
    };
    mqtt.publish(
        TOPIC_END_SESSION,
        QoS::AtLeastOnce,
        false,
        serde_json::to_vec(&end)?,
    )
    .await?;

    Ok(())
}
