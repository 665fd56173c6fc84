// Device listing and status endpoints
//
// Discovery scans the switch and utility listings by name; state reads
// go through `type=devices&rid={idx}` one device at a time. The server
// is the single source of truth -- nothing here is cached.

use tracing::debug;

use crate::client::DomoticzClient;
use crate::error::Error;
use crate::models::{DeviceRef, DeviceStatus, LightSwitch, UtilityDevice};

impl DomoticzClient {
    /// List all light-switch type devices.
    ///
    /// `GET /json.htm?type=command&param=getlightswitches`
    pub async fn list_light_switches(&self) -> Result<Vec<LightSwitch>, Error> {
        debug!("listing light switches");
        self.get("type=command&param=getlightswitches").await
    }

    /// List used utility devices, ordered by name.
    ///
    /// `GET /json.htm?type=devices&filter=utility&used=true&order=Name`
    pub async fn list_utility_devices(&self) -> Result<Vec<UtilityDevice>, Error> {
        debug!("listing utility devices");
        self.get("type=devices&filter=utility&used=true&order=Name")
            .await
    }

    /// Fetch the current status of a single device.
    ///
    /// `GET /json.htm?type=devices&rid={idx}` -- the server answers with
    /// a one-element `result` array; an empty array maps to
    /// [`Error::EmptyResult`].
    pub async fn device_status(&self, idx: DeviceRef) -> Result<DeviceStatus, Error> {
        let entries: Vec<DeviceStatus> = self.get(&format!("type=devices&rid={idx}")).await?;
        entries.into_iter().next().ok_or(Error::EmptyResult)
    }
}
