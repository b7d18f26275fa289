// Veteran entity
// Enrollment itself is managed elsewhere; this core only reads the roster.

use serde::{Deserialize, Serialize};

use crate::value_objects::VeteranId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Veteran {
    pub id: VeteranId,
    pub name: String,
    /// Membership card number, if one has been issued.
    pub card_number: Option<u32>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}
