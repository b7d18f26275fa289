// Scan authorization policy
// Pure decision over current ledger state: no lookups, no writes. The caller
// supplies the live check-in record for (event, veteran) and, for a
// redemption, the live record at the requested key.

use crate::entities::ScanRecord;
use crate::value_objects::ServiceId;

#[derive(Debug, Clone, PartialEq)]
pub enum ScanDecision {
    CreateCheckIn,
    /// Re-scan with a different plus_one corrects the stored guest count.
    AmendCheckIn { existing: ScanRecord },
    DuplicateCheckIn { existing: ScanRecord },
    CreateRedemption,
    DuplicateRedemption { existing: ScanRecord },
    /// Redemption attempted without a live check-in.
    NotCheckedIn,
    /// Guest redemption attempted, but the check-in recorded no guest.
    GuestMismatch,
}

pub fn evaluate_scan(
    service_id: ServiceId,
    plus_one: bool,
    check_in: Option<&ScanRecord>,
    at_key: Option<&ScanRecord>,
) -> ScanDecision {
    if service_id.is_check_in() {
        return match check_in {
            None => ScanDecision::CreateCheckIn,
            Some(existing) if existing.plus_one == plus_one => ScanDecision::DuplicateCheckIn {
                existing: existing.clone(),
            },
            Some(existing) => ScanDecision::AmendCheckIn {
                existing: existing.clone(),
            },
        };
    }

    let Some(check_in) = check_in else {
        return ScanDecision::NotCheckedIn;
    };
    if plus_one && !check_in.plus_one {
        return ScanDecision::GuestMismatch;
    }
    match at_key {
        Some(existing) => ScanDecision::DuplicateRedemption {
            existing: existing.clone(),
        },
        None => ScanDecision::CreateRedemption,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ScanRecord;
    use crate::value_objects::{AccountId, EventId, ServiceId, VeteranId};
    use chrono::Utc;
    use uuid::Uuid;

    fn record(service_id: ServiceId, plus_one: bool) -> ScanRecord {
        ScanRecord {
            event_id: EventId(Uuid::from_u128(1)),
            veteran_id: VeteranId(Uuid::from_u128(2)),
            service_id,
            plus_one,
            scan_by_id: AccountId(Uuid::from_u128(3)),
            scan_by: "desk".to_string(),
            scan_date: Utc::now(),
            deleted: false,
        }
    }

    fn meal() -> ServiceId {
        ServiceId(Uuid::from_u128(9))
    }

    #[test]
    fn first_check_in_is_created() {
        let decision = evaluate_scan(ServiceId::CHECK_IN, false, None, None);
        assert_eq!(decision, ScanDecision::CreateCheckIn);
    }

    #[test]
    fn repeat_check_in_with_same_guest_flag_is_duplicate() {
        let existing = record(ServiceId::CHECK_IN, true);
        let decision = evaluate_scan(ServiceId::CHECK_IN, true, Some(&existing), Some(&existing));
        assert_eq!(
            decision,
            ScanDecision::DuplicateCheckIn { existing }
        );
    }

    #[test]
    fn repeat_check_in_with_different_guest_flag_amends() {
        let existing = record(ServiceId::CHECK_IN, false);
        let decision = evaluate_scan(ServiceId::CHECK_IN, true, Some(&existing), Some(&existing));
        assert_eq!(decision, ScanDecision::AmendCheckIn { existing });
    }

    #[test]
    fn redemption_without_check_in_is_rejected() {
        let decision = evaluate_scan(meal(), false, None, None);
        assert_eq!(decision, ScanDecision::NotCheckedIn);
    }

    #[test]
    fn guest_redemption_requires_guest_on_check_in() {
        let check_in = record(ServiceId::CHECK_IN, false);
        let decision = evaluate_scan(meal(), true, Some(&check_in), None);
        assert_eq!(decision, ScanDecision::GuestMismatch);
    }

    #[test]
    fn guest_redemption_allowed_after_guest_check_in() {
        let check_in = record(ServiceId::CHECK_IN, true);
        let decision = evaluate_scan(meal(), true, Some(&check_in), None);
        assert_eq!(decision, ScanDecision::CreateRedemption);
    }

    #[test]
    fn plain_redemption_allowed_after_guest_check_in() {
        let check_in = record(ServiceId::CHECK_IN, true);
        let decision = evaluate_scan(meal(), false, Some(&check_in), None);
        assert_eq!(decision, ScanDecision::CreateRedemption);
    }

    #[test]
    fn second_redemption_of_same_service_is_duplicate() {
        let check_in = record(ServiceId::CHECK_IN, false);
        let existing = record(meal(), false);
        let decision = evaluate_scan(meal(), false, Some(&check_in), Some(&existing));
        assert_eq!(
            decision,
            ScanDecision::DuplicateRedemption { existing }
        );
    }
}
