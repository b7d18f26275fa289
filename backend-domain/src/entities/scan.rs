// Scan ledger entry
// A record is either a check-in (sentinel service id) or the redemption of a
// specific service, keyed by (event, veteran, service).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{AccountId, EventId, ServiceId, VeteranId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanKey {
    pub event_id: EventId,
    pub veteran_id: VeteranId,
    pub service_id: ServiceId,
}

impl ScanKey {
    pub fn check_in(event_id: EventId, veteran_id: VeteranId) -> Self {
        Self {
            event_id,
            veteran_id,
            service_id: ServiceId::CHECK_IN,
        }
    }
}

/// Operator on whose behalf a scan is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffIdentity {
    pub account_id: AccountId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub event_id: EventId,
    pub veteran_id: VeteranId,
    pub service_id: ServiceId,
    /// Only meaningful on the check-in record; marks that the veteran brought
    /// one guest.
    pub plus_one: bool,
    pub scan_by_id: AccountId,
    pub scan_by: String,
    pub scan_date: DateTime<Utc>,
    #[serde(default)]
    pub deleted: bool,
}

impl ScanRecord {
    pub fn key(&self) -> ScanKey {
        ScanKey {
            event_id: self.event_id,
            veteran_id: self.veteran_id,
            service_id: self.service_id,
        }
    }

    pub fn is_check_in(&self) -> bool {
        self.service_id.is_check_in()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Scan history pagination and filtering options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanFilters {
    pub event_id: Option<EventId>,
    #[serde(rename = "personId")]
    pub veteran_id: Option<VeteranId>,
    pub service_id: Option<ServiceId>,
    pub plus_one: Option<bool>,
    pub scan_date_start: Option<DateTime<Utc>>,
    pub scan_date_end: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub order: Option<SortOrder>,
}
