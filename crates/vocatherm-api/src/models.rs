// Domoticz JSON API response types
//
// Every call answers with the `{ "status": "OK", "result": [...] }`
// envelope. Domoticz is loose with types -- `idx`, `SetPoint` and the
// hardware `Mode1..Mode3` slots arrive as strings even though they are
// numbers -- so the models coerce where needed and use `#[serde(default)]`
// liberally for fields that come and go between device types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard Domoticz response envelope.
///
/// `status` must equal `"OK"`; command calls omit `result` entirely.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub result: Vec<T>,
    #[serde(default)]
    pub title: Option<String>,
}

// ── Device reference ─────────────────────────────────────────────────

/// Opaque numeric identifier the server assigns to one logical device.
///
/// Domoticz serializes it as a JSON string (`"idx": "117"`), and the
/// hardware config slots carry it the same way, so deserialization
/// accepts both representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceRef(pub u32);

impl fmt::Display for DeviceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for DeviceRef {
    fn from(idx: u32) -> Self {
        Self(idx)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RefRepr {
    Num(u32),
    Text(String),
}

impl<'de> Deserialize<'de> for DeviceRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RefRepr::deserialize(deserializer)? {
            RefRepr::Num(n) => Ok(Self(n)),
            RefRepr::Text(s) => s
                .trim()
                .parse::<u32>()
                .map(Self)
                .map_err(|_| serde::de::Error::custom(format!("invalid device idx: {s:?}"))),
        }
    }
}

/// Lenient variant for the hardware `Mode1..Mode3` slots, which may be
/// empty strings when the plugin is not fully configured.
fn opt_ref<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DeviceRef>, D::Error> {
    match Option::<RefRepr>::deserialize(deserializer)? {
        Some(RefRepr::Num(n)) => Ok(Some(DeviceRef(n))),
        Some(RefRepr::Text(s)) => Ok(s.trim().parse::<u32>().ok().map(DeviceRef)),
        None => Ok(None),
    }
}

/// Floats that Domoticz sometimes quotes (`"SetPoint": "21.0"`).
fn opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumRepr {
        Num(f64),
        Text(String),
    }
    match Option::<NumRepr>::deserialize(deserializer)? {
        Some(NumRepr::Num(v)) => Ok(Some(v)),
        Some(NumRepr::Text(s)) => Ok(s.trim().parse::<f64>().ok()),
        None => Ok(None),
    }
}

// ── Listing entries ──────────────────────────────────────────────────

/// One entry from `param=getlightswitches`.
#[derive(Debug, Clone, Deserialize)]
pub struct LightSwitch {
    pub idx: DeviceRef,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

/// One entry from the utility device listing.
#[derive(Debug, Clone, Deserialize)]
pub struct UtilityDevice {
    pub idx: DeviceRef,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "SetPoint", default, deserialize_with = "opt_f64")]
    pub set_point: Option<f64>,
}

/// One entry from `type=hardware`.
///
/// The SVT plugin stores its probe and switch references in the generic
/// `Mode1..Mode3` configuration slots.
#[derive(Debug, Clone, Deserialize)]
pub struct HardwareEntry {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Mode1", default, deserialize_with = "opt_ref")]
    pub mode1: Option<DeviceRef>,
    #[serde(rename = "Mode2", default, deserialize_with = "opt_ref")]
    pub mode2: Option<DeviceRef>,
    #[serde(rename = "Mode3", default, deserialize_with = "opt_ref")]
    pub mode3: Option<DeviceRef>,
}

// ── Device status ────────────────────────────────────────────────────

/// Status entry from `type=devices&rid={idx}`.
///
/// A single shape serves every device kind the bridge reads; the fields
/// that apply depend on the device (selector switches carry `Level`,
/// on/off switches `Status`, probes `Temp`, setpoints `SetPoint`).
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceStatus {
    #[serde(default)]
    pub idx: Option<DeviceRef>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Level", default)]
    pub level: Option<u8>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Temp", default, deserialize_with = "opt_f64")]
    pub temp: Option<f64>,
    #[serde(rename = "SetPoint", default, deserialize_with = "opt_f64")]
    pub set_point: Option<f64>,
    /// Catch-all for the dozens of fields Domoticz attaches per device.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
