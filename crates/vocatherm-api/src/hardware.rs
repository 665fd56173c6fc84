// Hardware listing endpoint
//
// The SVT virtual-thermostat plugin registers itself as one hardware
// entry and parks its probe and switch device references in the generic
// Mode1..Mode3 configuration slots.

use tracing::debug;

use crate::client::DomoticzClient;
use crate::error::Error;
use crate::models::HardwareEntry;

impl DomoticzClient {
    /// List all hardware entries.
    ///
    /// `GET /json.htm?type=hardware`
    pub async fn list_hardware(&self) -> Result<Vec<HardwareEntry>, Error> {
        debug!("listing hardware");
        self.get("type=hardware").await
    }
}
