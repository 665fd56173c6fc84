// ── Thermostat device facade ──
//
// Maps logical thermostat concepts onto Domoticz device references and
// performs one remote round trip per property access. The server is the
// single source of truth: reads are never served from cache, and the
// advisory shadow values are overwritten on every successful read.
//
// Accessors never return errors for expected failure modes. An
// unresolved reference, a failed call, or a missing field is logged and
// reported as absence; invalid write values are logged and perform zero
// remote calls.

use std::fmt;

use tracing::{debug, error, warn};

use vocatherm_api::{DeviceRef, DomoticzClient, SwitchCmd};

use crate::model::{Control, Mode, StateArg, SwitchState};

// Exact device names the SVT plugin registers in Domoticz.
const NAME_CONTROL: &str = "SVT - Thermostat Control";
const NAME_PAUSE: &str = "SVT - Thermostat Pause";
const NAME_MODE: &str = "SVT - Thermostat Mode";
const NAME_SETPOINT_NORMAL: &str = "SVT - Setpoint Normal";
const NAME_SETPOINT_ECONOMY: &str = "SVT - Setpoint Economy";
const NAME_HARDWARE: &str = "SVT";

// ── Device roles ─────────────────────────────────────────────────────

/// The eight logical devices the facade can hold a reference to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRole {
    Control,
    Pause,
    Mode,
    SetpointNormal,
    SetpointEconomy,
    IndoorProbe,
    OutdoorProbe,
    Switch,
}

impl DeviceRole {
    pub const ALL: [Self; 8] = [
        Self::Control,
        Self::Pause,
        Self::Mode,
        Self::SetpointNormal,
        Self::SetpointEconomy,
        Self::IndoorProbe,
        Self::OutdoorProbe,
        Self::Switch,
    ];
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Control => "control",
            Self::Pause => "pause",
            Self::Mode => "mode",
            Self::SetpointNormal => "setpoint-normal",
            Self::SetpointEconomy => "setpoint-economy",
            Self::IndoorProbe => "indoor-probe",
            Self::OutdoorProbe => "outdoor-probe",
            Self::Switch => "switch",
        })
    }
}

/// Outcome of device discovery, reported once after construction and
/// recomputable at any time. Lets the dispatcher decide per intent
/// whether an action is worth attempting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStatus {
    /// Every device reference resolved.
    Full,
    /// Some references resolved; the listed roles are missing.
    Partial(Vec<DeviceRole>),
    /// Nothing resolved -- the facade is unusable.
    Failed,
}

#[derive(Debug, Default)]
struct DeviceRefs {
    control: Option<DeviceRef>,
    pause: Option<DeviceRef>,
    mode: Option<DeviceRef>,
    setpoint_normal: Option<DeviceRef>,
    setpoint_economy: Option<DeviceRef>,
    indoor_probe: Option<DeviceRef>,
    outdoor_probe: Option<DeviceRef>,
    switch: Option<DeviceRef>,
}

impl DeviceRefs {
    fn get(&self, role: DeviceRole) -> Option<DeviceRef> {
        match role {
            DeviceRole::Control => self.control,
            DeviceRole::Pause => self.pause,
            DeviceRole::Mode => self.mode,
            DeviceRole::SetpointNormal => self.setpoint_normal,
            DeviceRole::SetpointEconomy => self.setpoint_economy,
            DeviceRole::IndoorProbe => self.indoor_probe,
            DeviceRole::OutdoorProbe => self.outdoor_probe,
            DeviceRole::Switch => self.switch,
        }
    }
}

/// Last values seen over the wire. Advisory only: overwritten on every
/// successful read, updated on successful writes, never consulted for
/// decisions (the server may lag behind a write by several seconds).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Shadow {
    pub mode: Option<Mode>,
    pub control: Option<Control>,
    pub pause: Option<bool>,
    pub indoor_temp: Option<f64>,
    pub outdoor_temp: Option<f64>,
    pub setpoint_normal: Option<f64>,
    pub setpoint_economy: Option<f64>,
}

// ── Facade ───────────────────────────────────────────────────────────

/// The thermostat device facade. Constructed once per process by
/// [`discover`](Self::discover); owns the API client.
pub struct Thermostat {
    client: DomoticzClient,
    refs: DeviceRefs,
    shadow: Shadow,
}

impl Thermostat {
    /// Resolve all device references by scanning three API result sets.
    ///
    /// A failed scan leaves its references unresolved and is logged;
    /// construction itself never fails. Check [`init_status`](Self::init_status)
    /// to learn how much of the facade is usable.
    pub async fn discover(client: DomoticzClient) -> Self {
        let mut refs = DeviceRefs::default();

        match client.list_light_switches().await {
            Ok(switches) => {
                for device in &switches {
                    match device.name.as_deref() {
                        Some(NAME_CONTROL) => {
                            debug!(idx = %device.idx, "resolved thermostat control");
                            refs.control = Some(device.idx);
                        }
                        Some(NAME_PAUSE) => {
                            debug!(idx = %device.idx, "resolved thermostat pause");
                            refs.pause = Some(device.idx);
                        }
                        Some(NAME_MODE) => {
                            debug!(idx = %device.idx, "resolved thermostat mode");
                            refs.mode = Some(device.idx);
                        }
                        _ => {}
                    }
                }
            }
            Err(e) => warn!("light switch discovery failed: {e}"),
        }

        match client.list_utility_devices().await {
            Ok(devices) => {
                for device in &devices {
                    match device.name.as_deref() {
                        Some(NAME_SETPOINT_NORMAL) => {
                            debug!(idx = %device.idx, "resolved normal setpoint");
                            refs.setpoint_normal = Some(device.idx);
                        }
                        Some(NAME_SETPOINT_ECONOMY) => {
                            debug!(idx = %device.idx, "resolved economy setpoint");
                            refs.setpoint_economy = Some(device.idx);
                        }
                        _ => {}
                    }
                }
            }
            Err(e) => warn!("utility device discovery failed: {e}"),
        }

        match client.list_hardware().await {
            Ok(entries) => {
                if let Some(hw) = entries
                    .iter()
                    .find(|h| h.name.as_deref() == Some(NAME_HARDWARE))
                {
                    refs.indoor_probe = hw.mode1;
                    refs.outdoor_probe = hw.mode2;
                    refs.switch = hw.mode3;
                    debug!(
                        indoor = ?hw.mode1,
                        outdoor = ?hw.mode2,
                        switch = ?hw.mode3,
                        "resolved probe and switch references"
                    );
                } else {
                    warn!("no hardware entry named {NAME_HARDWARE:?}");
                }
            }
            Err(e) => warn!("hardware discovery failed: {e}"),
        }

        Self {
            client,
            refs,
            shadow: Shadow::default(),
        }
    }

    /// How much of the facade resolved during discovery.
    pub fn init_status(&self) -> InitStatus {
        let missing: Vec<DeviceRole> = DeviceRole::ALL
            .into_iter()
            .filter(|role| self.refs.get(*role).is_none())
            .collect();
        if missing.is_empty() {
            InitStatus::Full
        } else if missing.len() == DeviceRole::ALL.len() {
            InitStatus::Failed
        } else {
            InitStatus::Partial(missing)
        }
    }

    /// Last-known values, for logging only.
    pub fn shadow(&self) -> &Shadow {
        &self.shadow
    }

    // ── Read accessors ───────────────────────────────────────────────

    /// Current mode, freshly read from the server.
    pub async fn mode(&mut self) -> Option<Mode> {
        let level = self.read_level(DeviceRole::Mode).await?;
        let mode = Mode::from_code(level);
        if mode.is_none() {
            warn!(level, "mode level not in table");
        }
        self.shadow.mode = mode;
        mode
    }

    /// Current control state, freshly read from the server.
    pub async fn control(&mut self) -> Option<Control> {
        let level = self.read_level(DeviceRole::Control).await?;
        let control = Control::from_code(level);
        if control.is_none() {
            warn!(level, "control level not in table");
        }
        self.shadow.control = control;
        control
    }

    /// Whether the pause switch is on.
    pub async fn pause(&mut self) -> Option<bool> {
        let status = self.read_status(DeviceRole::Pause).await?;
        let Some(text) = status.status else {
            warn!("pause device carries no Status field");
            return None;
        };
        let Some(state) = SwitchState::from_label(&text) else {
            warn!(status = %text, "pause status not in table");
            return None;
        };
        self.shadow.pause = Some(state.is_on());
        Some(state.is_on())
    }

    /// Indoor probe temperature in °C.
    pub async fn indoor_temp(&mut self) -> Option<f64> {
        let temp = self.read_temp(DeviceRole::IndoorProbe).await;
        if temp.is_some() {
            self.shadow.indoor_temp = temp;
        }
        temp
    }

    /// Outdoor probe temperature in °C.
    pub async fn outdoor_temp(&mut self) -> Option<f64> {
        let temp = self.read_temp(DeviceRole::OutdoorProbe).await;
        if temp.is_some() {
            self.shadow.outdoor_temp = temp;
        }
        temp
    }

    /// Day (normal) target temperature.
    pub async fn setpoint_normal(&mut self) -> Option<f64> {
        let value = self.read_setpoint(DeviceRole::SetpointNormal).await;
        if value.is_some() {
            self.shadow.setpoint_normal = value;
        }
        value
    }

    /// Night (economy) target temperature.
    pub async fn setpoint_economy(&mut self) -> Option<f64> {
        let value = self.read_setpoint(DeviceRole::SetpointEconomy).await;
        if value.is_some() {
            self.shadow.setpoint_economy = value;
        }
        value
    }

    // ── Write accessors ──────────────────────────────────────────────

    /// Set the mode selector. Accepts the integer code or display label;
    /// anything outside the table is logged and performs no remote call.
    pub async fn set_mode(&mut self, arg: impl Into<StateArg>) {
        let arg = arg.into();
        let Some(mode) = Mode::resolve(&arg) else {
            error!(?arg, "mode not in table, ignoring write");
            return;
        };
        let Some(idx) = self.refs.mode else {
            error!("mode reference unresolved, ignoring write");
            return;
        };
        match self.client.set_level(idx, mode.code()).await {
            Ok(()) => self.shadow.mode = Some(mode),
            Err(e) => error!(%mode, "mode write failed: {e}"),
        }
    }

    /// Set the control selector.
    pub async fn set_control(&mut self, arg: impl Into<StateArg>) {
        let arg = arg.into();
        let Some(control) = Control::resolve(&arg) else {
            error!(?arg, "control not in table, ignoring write");
            return;
        };
        let Some(idx) = self.refs.control else {
            error!("control reference unresolved, ignoring write");
            return;
        };
        match self.client.set_level(idx, control.code()).await {
            Ok(()) => self.shadow.control = Some(control),
            Err(e) => error!(%control, "control write failed: {e}"),
        }
    }

    /// Toggle the pause switch. Accepts bool, code, or label.
    pub async fn set_pause(&mut self, arg: impl Into<StateArg>) {
        let arg = arg.into();
        let Some(state) = SwitchState::resolve(&arg) else {
            error!(?arg, "pause value not in table, ignoring write");
            return;
        };
        let Some(idx) = self.refs.pause else {
            error!("pause reference unresolved, ignoring write");
            return;
        };
        let cmd = if state.is_on() {
            SwitchCmd::On
        } else {
            SwitchCmd::Off
        };
        match self.client.switch(idx, cmd).await {
            Ok(()) => self.shadow.pause = Some(state.is_on()),
            Err(e) => error!(%state, "pause write failed: {e}"),
        }
    }

    /// Write the day (normal) target temperature.
    pub async fn set_setpoint_normal(&mut self, value: f64) {
        self.write_setpoint(DeviceRole::SetpointNormal, value).await;
    }

    /// Write the night (economy) target temperature.
    pub async fn set_setpoint_economy(&mut self, value: f64) {
        self.write_setpoint(DeviceRole::SetpointEconomy, value).await;
    }

    /// Debug-log one full reading of every property. Run once after
    /// discovery so the operator sees what the bridge sees.
    pub async fn log_snapshot(&mut self) {
        debug!(" Indoor Temperature: {:?}°C", self.indoor_temp().await);
        debug!(" Outdoor Temperature: {:?}°C", self.outdoor_temp().await);
        debug!(" Thermostat Mode: {:?}", self.mode().await);
        debug!(" Thermostat Pause: {:?}", self.pause().await);
        debug!(" Thermostat Control: {:?}", self.control().await);
        debug!(" Setpoint Day: {:?}°C", self.setpoint_normal().await);
        debug!(" Setpoint Night: {:?}°C", self.setpoint_economy().await);
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn read_status(&self, role: DeviceRole) -> Option<vocatherm_api::DeviceStatus> {
        let Some(idx) = self.refs.get(role) else {
            warn!(%role, "reference unresolved, skipping read");
            return None;
        };
        match self.client.device_status(idx).await {
            Ok(status) => Some(status),
            Err(e) => {
                warn!(%role, "status read failed: {e}");
                None
            }
        }
    }

    async fn read_level(&self, role: DeviceRole) -> Option<u8> {
        let status = self.read_status(role).await?;
        if status.level.is_none() {
            warn!(%role, "device carries no Level field");
        }
        status.level
    }

    async fn read_temp(&self, role: DeviceRole) -> Option<f64> {
        let status = self.read_status(role).await?;
        if status.temp.is_none() {
            warn!(%role, "device carries no Temp field");
        }
        status.temp
    }

    async fn read_setpoint(&self, role: DeviceRole) -> Option<f64> {
        let status = self.read_status(role).await?;
        if status.set_point.is_none() {
            warn!(%role, "device carries no SetPoint field");
        }
        status.set_point
    }

    async fn write_setpoint(&mut self, role: DeviceRole, value: f64) {
        if !value.is_finite() {
            error!(%role, value, "non-finite setpoint, ignoring write");
            return;
        }
        let Some(idx) = self.refs.get(role) else {
            error!(%role, "reference unresolved, ignoring write");
            return;
        };
        match self.client.set_setpoint(idx, value).await {
            Ok(()) => match role {
                DeviceRole::SetpointNormal => self.shadow.setpoint_normal = Some(value),
                DeviceRole::SetpointEconomy => self.shadow.setpoint_economy = Some(value),
                _ => {}
            },
            Err(e) => error!(%role, value, "setpoint write failed: {e}"),
        }
    }
}
