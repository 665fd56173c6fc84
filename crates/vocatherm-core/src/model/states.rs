// ── Enumerated thermostat states ──
//
// The remote API stores these as selector levels (mode, control) or
// switch status strings (pause); the voice runtime delivers them as
// French display labels. Each enum owns the canonical code<->label table
// and the inverse lookups. The tables must stay collision-free: no two
// labels share a code and no two codes share a label.

use std::fmt;

/// Untyped input for a state setter: either the remote integer code or
/// the display label. One resolution path per concept replaces the
/// string/int/bool type-branching of ad-hoc setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateArg {
    Code(u8),
    Name(String),
}

impl From<u8> for StateArg {
    fn from(code: u8) -> Self {
        Self::Code(code)
    }
}

impl From<&str> for StateArg {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for StateArg {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<bool> for StateArg {
    fn from(on: bool) -> Self {
        Self::Code(u8::from(on))
    }
}

// ── Mode ─────────────────────────────────────────────────────────────

/// Thermostat mode selector: which setpoint profile is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Off,
    Day,
    Night,
}

impl Mode {
    pub const ALL: [Self; 3] = [Self::Off, Self::Day, Self::Night];

    /// Selector level on the remote device.
    pub fn code(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Day => 10,
            Self::Night => 20,
        }
    }

    /// Spoken display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Day => "jour",
            Self::Night => "nuit",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }

    /// Resolve a setter argument through the canonical table.
    pub fn resolve(arg: &StateArg) -> Option<Self> {
        match arg {
            StateArg::Code(c) => Self::from_code(*c),
            StateArg::Name(n) => Self::from_label(n),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Mode> for StateArg {
    fn from(mode: Mode) -> Self {
        Self::Code(mode.code())
    }
}

// ── Control ──────────────────────────────────────────────────────────

/// Thermostat control selector: how the regulation loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Stop,
    Automatic,
    Forced,
}

impl Control {
    pub const ALL: [Self; 3] = [Self::Stop, Self::Automatic, Self::Forced];

    pub fn code(self) -> u8 {
        match self {
            Self::Stop => 0,
            Self::Automatic => 10,
            Self::Forced => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Automatic => "automatique",
            Self::Forced => "forcé",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn resolve(arg: &StateArg) -> Option<Self> {
        match arg {
            StateArg::Code(c) => Self::from_code(*c),
            StateArg::Name(n) => Self::from_label(n),
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Control> for StateArg {
    fn from(control: Control) -> Self {
        Self::Code(control.code())
    }
}

// ── SwitchState ──────────────────────────────────────────────────────

/// Plain on/off state for the pause switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    Off,
    On,
}

impl SwitchState {
    pub const ALL: [Self; 2] = [Self::Off, Self::On];

    pub fn code(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::On => "On",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    pub fn resolve(arg: &StateArg) -> Option<Self> {
        match arg {
            StateArg::Code(c) => Self::from_code(*c),
            StateArg::Name(n) => Self::from_label(n),
        }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
