// In-memory scan ledger
// Holds every record (including soft-deleted ones); reads apply the live view
// in one place. Insert checks the composite key and appends under a single
// write lock, which is the storage-level uniqueness constraint that resolves
// concurrent duplicate scans deterministically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use backend_domain::{
    EventId, LedgerError, ScanFilters, ScanKey, ScanLedger, ScanRecord, SortOrder, StaffIdentity,
    VeteranId,
};

#[derive(Default)]
pub struct MemoryScanLedger {
    records: RwLock<Vec<ScanRecord>>,
}

impl MemoryScanLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filters: &ScanFilters, record: &ScanRecord) -> bool {
    if let Some(event_id) = filters.event_id {
        if record.event_id != event_id {
            return false;
        }
    }
    if let Some(veteran_id) = filters.veteran_id {
        if record.veteran_id != veteran_id {
            return false;
        }
    }
    if let Some(service_id) = filters.service_id {
        if record.service_id != service_id {
            return false;
        }
    }
    if let Some(plus_one) = filters.plus_one {
        if record.plus_one != plus_one {
            return false;
        }
    }
    if let Some(start) = filters.scan_date_start {
        if record.scan_date < start {
            return false;
        }
    }
    if let Some(end) = filters.scan_date_end {
        if record.scan_date > end {
            return false;
        }
    }
    true
}

#[async_trait]
impl ScanLedger for MemoryScanLedger {
    async fn find(&self, key: &ScanKey) -> anyhow::Result<Option<ScanRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|record| !record.deleted && record.key() == *key)
            .cloned())
    }

    async fn find_all_for_check_in(
        &self,
        event_id: EventId,
        veteran_id: VeteranId,
    ) -> anyhow::Result<Vec<ScanRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| {
                !record.deleted && record.event_id == event_id && record.veteran_id == veteran_id
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, record: ScanRecord) -> Result<ScanRecord, LedgerError> {
        let mut records = self.records.write().await;
        if records
            .iter()
            .any(|existing| !existing.deleted && existing.key() == record.key())
        {
            return Err(LedgerError::DuplicateKey);
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn amend(
        &self,
        key: &ScanKey,
        plus_one: bool,
        staff: &StaffIdentity,
        at: DateTime<Utc>,
    ) -> Result<ScanRecord, LedgerError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| !record.deleted && record.key() == *key)
            .ok_or(LedgerError::NotFound)?;
        record.plus_one = plus_one;
        record.scan_by_id = staff.account_id;
        record.scan_by = staff.name.clone();
        record.scan_date = at;
        Ok(record.clone())
    }

    async fn soft_delete(&self, key: &ScanKey) -> Result<(), LedgerError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| !record.deleted && record.key() == *key)
            .ok_or(LedgerError::NotFound)?;
        record.deleted = true;
        Ok(())
    }

    async fn list(&self, filters: &ScanFilters) -> anyhow::Result<Vec<ScanRecord>> {
        let records = self.records.read().await;
        let mut results: Vec<ScanRecord> = records
            .iter()
            .filter(|record| !record.deleted && matches(filters, record))
            .cloned()
            .collect();
        match filters.order.unwrap_or_default() {
            SortOrder::Asc => results.sort_by_key(|record| record.scan_date),
            SortOrder::Desc => {
                results.sort_by_key(|record| std::cmp::Reverse(record.scan_date))
            }
        }
        let offset = filters.offset.unwrap_or(0);
        let results: Vec<ScanRecord> = results.into_iter().skip(offset).collect();
        match filters.limit {
            Some(limit) => Ok(results.into_iter().take(limit).collect()),
            None => Ok(results),
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    use backend_domain::{AccountId, ServiceId};

    fn record(service: u128, minute: u32) -> ScanRecord {
        ScanRecord {
            event_id: EventId(Uuid::from_u128(1)),
            veteran_id: VeteranId(Uuid::from_u128(2)),
            service_id: ServiceId(Uuid::from_u128(service)),
            plus_one: false,
            scan_by_id: AccountId(Uuid::from_u128(3)),
            scan_by: "desk".to_string(),
            scan_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap(),
            deleted: false,
        }
    }

    fn staff() -> StaffIdentity {
        StaffIdentity {
            account_id: AccountId(Uuid::from_u128(4)),
            name: "supervisor".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_rejects_live_duplicate_key() {
        let ledger = MemoryScanLedger::new();
        ledger.insert(record(7, 0)).await.expect("first insert");
        let err = ledger.insert(record(7, 1)).await.expect_err("duplicate");
        assert!(matches!(err, LedgerError::DuplicateKey));
    }

    #[tokio::test]
    async fn insert_allowed_after_soft_delete() {
        let ledger = MemoryScanLedger::new();
        let stored = ledger.insert(record(7, 0)).await.expect("insert");
        ledger.soft_delete(&stored.key()).await.expect("delete");
        assert!(ledger.find(&stored.key()).await.expect("find").is_none());
        ledger.insert(record(7, 5)).await.expect("reinsert");
    }

    #[tokio::test]
    async fn amend_updates_only_guest_flag_and_attribution() {
        let ledger = MemoryScanLedger::new();
        let stored = ledger.insert(record(7, 0)).await.expect("insert");
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let amended = ledger
            .amend(&stored.key(), true, &staff(), at)
            .await
            .expect("amend");
        assert!(amended.plus_one);
        assert_eq!(amended.scan_by, "supervisor");
        assert_eq!(amended.scan_date, at);
        assert_eq!(amended.service_id, stored.service_id);
    }

    #[tokio::test]
    async fn amend_missing_record_is_not_found() {
        let ledger = MemoryScanLedger::new();
        let key = record(7, 0).key();
        let err = ledger
            .amend(&key, true, &staff(), Utc::now())
            .await
            .expect_err("missing");
        assert!(matches!(err, LedgerError::NotFound));
    }

    #[tokio::test]
    async fn list_filters_sorts_and_pages() {
        let ledger = MemoryScanLedger::new();
        for (service, minute) in [(7u128, 30u32), (8, 10), (9, 20)] {
            ledger.insert(record(service, minute)).await.expect("insert");
        }

        let filters = ScanFilters {
            event_id: Some(EventId(Uuid::from_u128(1))),
            ..ScanFilters::default()
        };
        let ascending = ledger.list(&filters).await.expect("list");
        let minutes: Vec<u32> = ascending
            .iter()
            .map(|r| r.scan_date.format("%M").to_string().parse().unwrap())
            .collect();
        assert_eq!(minutes, vec![10, 20, 30]);

        let filters = ScanFilters {
            order: Some(SortOrder::Desc),
            limit: Some(2),
            ..ScanFilters::default()
        };
        let newest = ledger.list(&filters).await.expect("list desc");
        assert_eq!(newest.len(), 2);
        assert!(newest[0].scan_date > newest[1].scan_date);

        let filters = ScanFilters {
            offset: Some(2),
            ..ScanFilters::default()
        };
        let tail = ledger.list(&filters).await.expect("list offset");
        assert_eq!(tail.len(), 1);
    }

    #[tokio::test]
    async fn list_excludes_soft_deleted_records() {
        let ledger = MemoryScanLedger::new();
        let stored = ledger.insert(record(7, 0)).await.expect("insert");
        ledger.insert(record(8, 1)).await.expect("insert");
        ledger.soft_delete(&stored.key()).await.expect("delete");
        let all = ledger.list(&ScanFilters::default()).await.expect("list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].service_id, ServiceId(Uuid::from_u128(8)));
    }
}
