//! Core domain logic for the vocatherm bridge.
//!
//! Two components live here: the [`Thermostat`] device facade, which maps
//! logical thermostat concepts (mode, control, pause, setpoints, probes)
//! onto Domoticz device references and performs one remote round trip per
//! property access, and the [`Dispatcher`], which turns recognized voice
//! intents into at most one facade mutation plus a spoken confirmation.

pub mod dispatcher;
pub mod model;
pub mod thermostat;

pub use dispatcher::{Dispatcher, Intent};
pub use model::{Control, Mode, StateArg, SwitchState};
pub use thermostat::{DeviceRole, InitStatus, Shadow, Thermostat};
