// Request/response DTOs for the scan workflow
// Field names are the wire contract; do not rename without coordinating with
// the scanner clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use backend_domain::{
    AccountId, EventId, ScanRecord, ServiceId, Veteran, VeteranId,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub event_id: EventId,
    /// Raw scanned token: card number or person id.
    #[serde(rename = "cardOrPersonToken")]
    pub token: String,
    /// Omitted for a plain check-in.
    pub service_id: Option<ServiceId>,
    #[serde(default)]
    pub plus_one: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteScanRequest {
    pub event_id: EventId,
    #[serde(rename = "cardOrPersonToken")]
    pub token: String,
    /// Omitted to target the check-in record (never a wildcard).
    pub service_id: Option<ServiceId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub event_id: EventId,
    #[serde(rename = "personId")]
    pub veteran_id: VeteranId,
    #[serde(rename = "person", skip_serializing_if = "Option::is_none")]
    pub veteran: Option<Veteran>,
    pub service_id: ServiceId,
    pub plus_one: bool,
    #[serde(rename = "performedBy", skip_serializing_if = "Option::is_none")]
    pub scan_by_id: Option<AccountId>,
    #[serde(rename = "performedByName", skip_serializing_if = "Option::is_none")]
    pub scan_by: Option<String>,
    #[serde(rename = "performedAt", skip_serializing_if = "Option::is_none")]
    pub scan_date: Option<DateTime<Utc>>,
}

impl ScanResponse {
    pub fn from_record(record: &ScanRecord, veteran: Option<Veteran>) -> Self {
        Self {
            event_id: record.event_id,
            veteran_id: record.veteran_id,
            veteran,
            service_id: record.service_id,
            plus_one: record.plus_one,
            scan_by_id: Some(record.scan_by_id),
            scan_by: Some(record.scan_by.clone()),
            scan_date: Some(record.scan_date),
        }
    }

    /// Response shape for a rejected scan that never produced a record.
    pub fn from_attempt(
        event_id: EventId,
        veteran: Veteran,
        service_id: ServiceId,
        plus_one: bool,
    ) -> Self {
        Self {
            event_id,
            veteran_id: veteran.id,
            veteran: Some(veteran),
            service_id,
            plus_one,
            scan_by_id: None,
            scan_by: None,
            scan_date: None,
        }
    }
}

/// Conflict/ineligibility payload: the scan context plus an operator-facing
/// message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConflict {
    #[serde(flatten)]
    pub scan: ScanResponse,
    pub message: String,
}

/// Outcome of an accepted scan.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    Created(ScanResponse),
    Updated(ScanResponse),
}
