// ── Intent dispatcher ──
//
// Receives one recognized voice intent at a time, decides which facade
// property to read and/or write, and produces exactly one French
// confirmation sentence. At most one logical mutation happens per
// intent (forcing control to automatique before a mode change is the
// one defined two-write sequence).
//
// Handling is strictly sequential: the caller owns the dispatcher
// mutably and awaits each intent to completion before the next.

use tracing::{debug, warn};

use crate::model::{Control, Mode};
use crate::thermostat::{InitStatus, Thermostat};

// Spoken responses. The default confirmation stands unless a branch
// picks something more specific; the runtime must never stay silent.
const SENTENCE_DONE: &str = "Voilà c'est fait.";
const SENTENCE_TURNED_OFF: &str = "Ok, je coupe le thermostat.";
const SENTENCE_MODE_OFF: &str =
    "Désolée mais nous sommes en mode Off. Je ne fais rien dans ce cas.";
const SENTENCE_FORCED: &str = "Nous sommes en mode économique, je passe donc en mode forcé.";
const SENTENCE_NO_UP: &str =
    "Désolée, je ne peux pas monter la température dans ce mode.";
const SENTENCE_BAD_DIRECTION: &str = "Je n'ai pas compris s'il fait froid ou s'il fait chaud.";
const SENTENCE_NO_ACTION: &str =
    "Je ne comprends pas l'action à effectuer avec le thermostat.";
const SENTENCE_READ_FAILED: &str = "Désolée, je n'arrive pas à lire la consigne actuelle.";
const SENTENCE_BACKEND_DOWN: &str = "Désolée, le thermostat ne répond pas pour le moment.";

/// How far one "monte/descends" request moves a setpoint, in °C.
const SETPOINT_STEP: f64 = 0.1;

/// A recognized spoken command, already reduced to the first value of
/// each slot the intent consults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Change the thermostat mode; the slot may name a mode (jour/nuit)
    /// or a control state (automatique/forcé/stop).
    SetMode { value: Option<String> },
    /// Cut the thermostat; the slot names which device to cut.
    TurnOff { device: Option<String> },
    /// Nudge the active setpoint; the slot is "up" or "down".
    Shift { direction: Option<String> },
}

/// Turns intents into facade calls. Owns the facade outright -- there
/// is no ambient shared thermostat anywhere.
pub struct Dispatcher {
    thermostat: Thermostat,
}

impl Dispatcher {
    pub fn new(thermostat: Thermostat) -> Self {
        Self { thermostat }
    }

    pub fn thermostat(&self) -> &Thermostat {
        &self.thermostat
    }

    /// Handle one intent to completion and return the sentence to speak.
    pub async fn handle(&mut self, intent: Intent) -> String {
        if self.thermostat.init_status() == InitStatus::Failed {
            warn!(?intent, "no device references resolved, apologizing");
            return SENTENCE_BACKEND_DOWN.to_owned();
        }

        match intent {
            Intent::SetMode { value } => self.handle_set_mode(value).await,
            Intent::TurnOff { device } => self.handle_turn_off(device).await,
            Intent::Shift { direction } => self.handle_shift(direction).await,
        }
    }

    // ── set-mode ─────────────────────────────────────────────────────

    async fn handle_set_mode(&mut self, value: Option<String>) -> String {
        let Some(value) = value else {
            return SENTENCE_DONE.to_owned();
        };
        debug!(%value, "mode change requested");

        if let Some(mode) = Mode::from_label(&value) {
            // Selecting a setpoint profile only takes effect under
            // automatic regulation, so force that first if needed.
            if self.thermostat.control().await != Some(Control::Automatic) {
                self.thermostat.set_control(Control::Automatic).await;
            }
            self.thermostat.set_mode(mode).await;
            format!("OK, je passe le thermostat en mode {value}.")
        } else if let Some(control) = Control::from_label(&value) {
            self.thermostat.set_control(control).await;
            format!("OK, je passe le thermostat en mode {value}.")
        } else {
            format!("Désolée mais je ne connais pas le mode {value}.")
        }
    }

    // ── turn-off ─────────────────────────────────────────────────────

    async fn handle_turn_off(&mut self, device: Option<String>) -> String {
        if device.is_none() {
            return SENTENCE_DONE.to_owned();
        }
        debug!("turning thermostat off");
        self.thermostat.set_control(Control::Stop).await;
        SENTENCE_TURNED_OFF.to_owned()
    }

    // ── shift-temperature ────────────────────────────────────────────

    async fn handle_shift(&mut self, direction: Option<String>) -> String {
        let Some(direction) = direction else {
            return SENTENCE_NO_ACTION.to_owned();
        };

        let mode = self.thermostat.mode().await;
        let control = self.thermostat.control().await;
        debug!(?control, ?mode, %direction, "shift requested");

        if mode == Some(Mode::Off) {
            return SENTENCE_MODE_OFF.to_owned();
        }

        let sentence = match direction.as_str() {
            "down" => self.shift_down(mode, control).await,
            "up" => self.shift_up(mode, control).await,
            _ => SENTENCE_BAD_DIRECTION.to_owned(),
        };

        debug!(shadow = ?self.thermostat.shadow(), "after shift");
        sentence
    }

    async fn shift_down(&mut self, mode: Option<Mode>, control: Option<Control>) -> String {
        if matches!(control, Some(Control::Forced | Control::Stop)) {
            // Leaving forced or stopped regulation already lowers the
            // effective heating; the setpoints stay untouched.
            self.thermostat.set_control(Control::Automatic).await;
            return SENTENCE_DONE.to_owned();
        }

        if mode == Some(Mode::Day) {
            match self.thermostat.setpoint_normal().await {
                // The server takes a while to reflect a setpoint write,
                // so the sentence quotes the locally computed target.
                Some(current) => {
                    let target = current - SETPOINT_STEP;
                    self.thermostat.set_setpoint_normal(target).await;
                    format!(
                        "Nous sommes en mode jour, je descends donc la consigne de jour à {} degrés.",
                        fr_degrees(target)
                    )
                }
                None => SENTENCE_READ_FAILED.to_owned(),
            }
        } else {
            match self.thermostat.setpoint_economy().await {
                Some(current) => {
                    let target = current - SETPOINT_STEP;
                    self.thermostat.set_setpoint_economy(target).await;
                    format!(
                        "Nous sommes en mode {}, je descends donc la consigne de nuit à {} degrés.",
                        mode.map_or("inconnu", Mode::label),
                        fr_degrees(target)
                    )
                }
                None => SENTENCE_READ_FAILED.to_owned(),
            }
        }
    }

    async fn shift_up(&mut self, mode: Option<Mode>, control: Option<Control>) -> String {
        // Deliberately loose: any mode whose label mentions "jour"
        // counts as daytime.
        if mode.is_some_and(|m| m.label().contains("jour")) {
            match self.thermostat.setpoint_normal().await {
                Some(current) => {
                    let target = current + SETPOINT_STEP;
                    self.thermostat.set_setpoint_normal(target).await;
                    format!(
                        "Nous sommes en mode jour, je monte la consigne de jour à {} degrés.",
                        fr_degrees(target)
                    )
                }
                None => SENTENCE_READ_FAILED.to_owned(),
            }
        } else if control == Some(Control::Automatic) && mode == Some(Mode::Night) {
            self.thermostat.set_control(Control::Forced).await;
            SENTENCE_FORCED.to_owned()
        } else {
            // Night mode with control already forced (or anything else
            // unexpected): nothing sensible to raise, say so explicitly.
            SENTENCE_NO_UP.to_owned()
        }
    }
}

/// Spoken-French decimal: one digit, comma separator ("20,5").
fn fr_degrees(value: f64) -> String {
    format!("{value:.1}").replace('.', ",")
}
