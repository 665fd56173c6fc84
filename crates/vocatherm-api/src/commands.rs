// Command endpoints
//
// All mutations go through `type=command` queries: selector levels and
// on/off toggles via `param=switchlight`, target temperatures via
// `param=setsetpoint`. Fire and forget -- no read-back, no retry.

use std::fmt;

use tracing::debug;

use crate::client::DomoticzClient;
use crate::error::Error;
use crate::models::DeviceRef;

/// Explicit on/off command for a switch device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchCmd {
    On,
    Off,
}

impl fmt::Display for SwitchCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "On",
            Self::Off => "Off",
        })
    }
}

impl DomoticzClient {
    /// Set a selector switch to a level.
    ///
    /// `GET ...&param=switchlight&idx={idx}&switchcmd=Set Level&level={level}`
    /// (the space in `Set Level` goes over the wire as `%20`).
    pub async fn set_level(&self, idx: DeviceRef, level: u8) -> Result<(), Error> {
        debug!(%idx, level, "setting selector level");
        self.command(&format!(
            "type=command&param=switchlight&idx={idx}&switchcmd=Set Level&level={level}"
        ))
        .await
    }

    /// Turn a switch device on or off.
    ///
    /// `GET ...&param=switchlight&idx={idx}&switchcmd=On|Off`
    pub async fn switch(&self, idx: DeviceRef, cmd: SwitchCmd) -> Result<(), Error> {
        debug!(%idx, %cmd, "switching device");
        self.command(&format!(
            "type=command&param=switchlight&idx={idx}&switchcmd={cmd}"
        ))
        .await
    }

    /// Write a target temperature to a setpoint device.
    ///
    /// `GET ...&param=setsetpoint&idx={idx}&setpoint={value}`
    pub async fn set_setpoint(&self, idx: DeviceRef, value: f64) -> Result<(), Error> {
        debug!(%idx, value, "writing setpoint");
        self.command(&format!(
            "type=command&param=setsetpoint&idx={idx}&setpoint={value}"
        ))
        .await
    }
}
