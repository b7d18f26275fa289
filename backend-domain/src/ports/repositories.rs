use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entities::{Event, ScanFilters, ScanKey, ScanRecord, Service, StaffIdentity, Veteran};
use crate::value_objects::{EventId, ServiceId, VeteranId};

#[derive(Debug, Error)]
pub enum LedgerError {
    /// A live record already occupies the composite key.
    #[error("duplicate scan key")]
    DuplicateKey,
    #[error("scan record not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// The authoritative scan ledger. Every read operates over the live view:
/// soft-deleted records are filtered once, inside the store.
#[async_trait]
pub trait ScanLedger: Send + Sync {
    async fn find(&self, key: &ScanKey) -> anyhow::Result<Option<ScanRecord>>;

    /// All live records sharing (event, veteran): the check-in plus every
    /// redemption.
    async fn find_all_for_check_in(
        &self,
        event_id: EventId,
        veteran_id: VeteranId,
    ) -> anyhow::Result<Vec<ScanRecord>>;

    /// Inserts a new record. The store guarantees composite-key uniqueness
    /// among live records; a lost race surfaces as `DuplicateKey`.
    async fn insert(&self, record: ScanRecord) -> Result<ScanRecord, LedgerError>;

    /// Updates only `plus_one` and the performed-by/performed-at attribution
    /// of an existing live record.
    async fn amend(
        &self,
        key: &ScanKey,
        plus_one: bool,
        staff: &StaffIdentity,
        at: DateTime<Utc>,
    ) -> Result<ScanRecord, LedgerError>;

    async fn soft_delete(&self, key: &ScanKey) -> Result<(), LedgerError>;

    async fn list(&self, filters: &ScanFilters) -> anyhow::Result<Vec<ScanRecord>>;

    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait VeteranDirectory: Send + Sync {
    async fn find_by_card(&self, card_number: u32) -> anyhow::Result<Option<Veteran>>;
    async fn find_by_id(&self, id: VeteranId) -> anyhow::Result<Option<Veteran>>;
}

#[async_trait]
pub trait EventDirectory: Send + Sync {
    async fn get_event(&self, id: EventId) -> anyhow::Result<Option<Event>>;
}

#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    async fn get_service(&self, id: ServiceId) -> anyhow::Result<Option<Service>>;
}
