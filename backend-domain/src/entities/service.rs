// Service entity
// The catalog always carries the reserved Check-In service under the sentinel
// id; all other entries are redeemable on-site services.

use serde::{Deserialize, Serialize};

use crate::value_objects::ServiceId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
}

impl Service {
    pub fn check_in() -> Self {
        Self {
            id: ServiceId::CHECK_IN,
            name: "Check-In".to_string(),
            deleted: false,
        }
    }
}
