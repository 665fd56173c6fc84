//! Wire model for the Hermes voice-runtime protocol.
//!
//! The runtime publishes one JSON message per recognized intent on
//! `hermes/intent/{intentName}` and expects the handler to close the
//! dialogue session with exactly one sentence on
//! `hermes/dialogueManager/endSession`.

use serde::{Deserialize, Serialize};

use vocatherm_core::Intent;

// Intent names as registered with the voice runtime.
pub const INTENT_SET_MODE: &str = "ericvde31830:thermostatMode";
pub const INTENT_TURN_OFF: &str = "ericvde31830:thermostatTurnOff";
pub const INTENT_SHIFT: &str = "ericvde31830:thermostatShift";

pub const SUBSCRIBED_INTENTS: [&str; 3] = [INTENT_SET_MODE, INTENT_TURN_OFF, INTENT_SHIFT];

pub const TOPIC_INTENT_PREFIX: &str = "hermes/intent/";
pub const TOPIC_END_SESSION: &str = "hermes/dialogueManager/endSession";

// Slot names per intent.
const SLOT_MODE: &str = "thermostat_mode";
const SLOT_DEVICE: &str = "temperature_device";
const SLOT_DIRECTION: &str = "up_down";

// ── Incoming ────────────────────────────────────────────────────────

/// One recognized intent, as published by the dialogue manager.
#[derive(Debug, Deserialize)]
pub struct IntentMessage {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "siteId", default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
    pub intent: IntentPayload,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

#[derive(Debug, Deserialize)]
pub struct IntentPayload {
    #[serde(rename = "intentName")]
    pub intent_name: String,
    #[serde(rename = "confidenceScore", default)]
    pub confidence_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Slot {
    #[serde(rename = "slotName")]
    pub slot_name: String,
    #[serde(rename = "rawValue", default)]
    pub raw_value: Option<String>,
    pub value: SlotValue,
}

#[derive(Debug, Deserialize)]
pub struct SlotValue {
    pub value: serde_json::Value,
}

impl IntentMessage {
    /// First value of the named slot, as text. Later values of a
    /// multi-valued slot are deliberately ignored.
    pub fn first_slot(&self, name: &str) -> Option<String> {
        self.slots
            .iter()
            .find(|s| s.slot_name == name)
            .and_then(|s| match &s.value.value {
                serde_json::Value::String(text) => Some(text.clone()),
                other => other.as_f64().map(|n| n.to_string()),
            })
    }

    /// Map onto the dispatcher's typed intent; `None` for intent names
    /// this bridge did not subscribe to.
    pub fn to_intent(&self) -> Option<Intent> {
        match self.intent.intent_name.as_str() {
            INTENT_SET_MODE => Some(Intent::SetMode {
                value: self.first_slot(SLOT_MODE),
            }),
            INTENT_TURN_OFF => Some(Intent::TurnOff {
                device: self.first_slot(SLOT_DEVICE),
            }),
            INTENT_SHIFT => Some(Intent::Shift {
                direction: self.first_slot(SLOT_DIRECTION),
            }),
            _ => None,
        }
    }
}

// ── Outgoing ────────────────────────────────────────────────────────

/// Close the dialogue session with a spoken sentence.
#[derive(Debug, Serialize)]
pub struct EndSession<'a> {
    #[serde(rename = "sessionId")]
    pub session_id: &'a str,
    pub text: &'a str,
}
