// vocatherm-api: Async Rust client for the Domoticz JSON API

pub mod client;
pub mod commands;
pub mod devices;
pub mod error;
pub mod hardware;
pub mod models;
pub mod transport;

pub use client::DomoticzClient;
pub use commands::SwitchCmd;
pub use error::Error;
pub use models::{DeviceRef, DeviceStatus, HardwareEntry, LightSwitch, UtilityDevice};
pub use transport::{BasicCredentials, TransportConfig};
