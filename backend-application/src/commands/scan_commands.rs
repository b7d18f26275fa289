// Scan authorization workflow
// Resolves the veteran and event/service context, evaluates the policy
// against current ledger state, then performs the single conditional write.

use chrono::Utc;
use tracing::{error, warn};

use backend_domain::{
    evaluate_scan, EventId, LedgerError, MalformedToken, ScanDecision, ScanKey, ScanRecord,
    ScanToken, ServiceId, StaffIdentity, Veteran,
};

use crate::dtos::{DeleteScanRequest, ScanConflict, ScanOutcome, ScanRequest, ScanResponse};
use crate::{AppError, AppState};

pub const MSG_DUPLICATE: &str = "Duplicate Scan";
pub const MSG_NOT_CHECKED_IN: &str = "The person has not checked in for this Event.";
pub const MSG_NO_GUEST: &str = "The person did not check in with a guest.";

pub async fn perform_scan(
    state: &AppState,
    staff: &StaffIdentity,
    request: ScanRequest,
) -> Result<ScanOutcome, AppError> {
    let veteran = resolve_veteran(state, &request.token).await?;
    let service_id = request.service_id.unwrap_or(ServiceId::CHECK_IN);

    if state
        .events
        .get_event(request.event_id)
        .await
        .map_err(|err| storage_error(state, err))?
        .is_none()
    {
        state.metrics.record_lookup_failure();
        return Err(AppError::EventNotFound);
    }
    if !service_id.is_check_in()
        && state
            .services
            .get_service(service_id)
            .await
            .map_err(|err| storage_error(state, err))?
            .is_none()
    {
        state.metrics.record_lookup_failure();
        return Err(AppError::ServiceNotFound);
    }

    let records = state
        .ledger
        .find_all_for_check_in(request.event_id, veteran.id)
        .await
        .map_err(|err| storage_error(state, err))?;
    let check_in = records.iter().find(|record| record.is_check_in());
    let at_key = records
        .iter()
        .find(|record| record.service_id == service_id);

    match evaluate_scan(service_id, request.plus_one, check_in, at_key) {
        ScanDecision::CreateCheckIn | ScanDecision::CreateRedemption => {
            let record = ScanRecord {
                event_id: request.event_id,
                veteran_id: veteran.id,
                service_id,
                plus_one: request.plus_one,
                scan_by_id: staff.account_id,
                scan_by: staff.name.clone(),
                scan_date: Utc::now(),
                deleted: false,
            };
            match state.ledger.insert(record).await {
                Ok(stored) => {
                    state.metrics.record_created();
                    Ok(ScanOutcome::Created(ScanResponse::from_record(
                        &stored,
                        Some(veteran),
                    )))
                }
                // Lost a race with a concurrent identical scan: the store's
                // uniqueness constraint fired after our pre-write check
                // passed. Re-read the key and report the winner.
                Err(LedgerError::DuplicateKey) => {
                    warn!(
                        event_id = %request.event_id,
                        veteran_id = %veteran.id,
                        service_id = %service_id,
                        "concurrent duplicate scan lost insert race"
                    );
                    let key = ScanKey {
                        event_id: request.event_id,
                        veteran_id: veteran.id,
                        service_id,
                    };
                    let existing = state
                        .ledger
                        .find(&key)
                        .await
                        .map_err(|err| storage_error(state, err))?;
                    state.metrics.record_duplicate();
                    Err(duplicate_error(existing.as_ref(), veteran, &key, request.plus_one))
                }
                Err(LedgerError::NotFound) => {
                    Err(storage_error(state, anyhow::anyhow!("insert reported not found")))
                }
                Err(LedgerError::Storage(err)) => Err(storage_error(state, err)),
            }
        }
        ScanDecision::AmendCheckIn { existing } => {
            let amended = state
                .ledger
                .amend(&existing.key(), request.plus_one, staff, Utc::now())
                .await
                .map_err(|err| match err {
                    LedgerError::Storage(err) => storage_error(state, err),
                    // Amend target vanished between read and write; treat as a
                    // re-check-in requirement rather than a server fault.
                    _ => AppError::ScanNotFound,
                })?;
            state.metrics.record_amended();
            Ok(ScanOutcome::Updated(ScanResponse::from_record(
                &amended,
                Some(veteran),
            )))
        }
        ScanDecision::DuplicateCheckIn { existing }
        | ScanDecision::DuplicateRedemption { existing } => {
            state.metrics.record_duplicate();
            Err(AppError::Duplicate(Box::new(ScanConflict {
                scan: ScanResponse::from_record(&existing, Some(veteran)),
                message: MSG_DUPLICATE.to_string(),
            })))
        }
        ScanDecision::NotCheckedIn => {
            state.metrics.record_ineligible();
            Err(ineligible_error(
                request.event_id,
                veteran,
                service_id,
                request.plus_one,
                MSG_NOT_CHECKED_IN,
            ))
        }
        ScanDecision::GuestMismatch => {
            state.metrics.record_ineligible();
            Err(ineligible_error(
                request.event_id,
                veteran,
                service_id,
                request.plus_one,
                MSG_NO_GUEST,
            ))
        }
    }
}

/// Soft-deletes the record at (event, veteran, service). An omitted service
/// targets the check-in record specifically, never the whole person+event.
pub async fn delete_scan(state: &AppState, request: DeleteScanRequest) -> Result<(), AppError> {
    let veteran = resolve_veteran(state, &request.token).await?;
    let key = ScanKey {
        event_id: request.event_id,
        veteran_id: veteran.id,
        service_id: request.service_id.unwrap_or(ServiceId::CHECK_IN),
    };
    state.ledger.soft_delete(&key).await.map_err(|err| match err {
        LedgerError::Storage(err) => storage_error(state, err),
        _ => AppError::ScanNotFound,
    })
}

async fn resolve_veteran(state: &AppState, token: &str) -> Result<Veteran, AppError> {
    let parsed = ScanToken::parse(token)
        .map_err(|MalformedToken(raw)| AppError::BadRequest(format!("malformed token '{raw}'")))?;
    let veteran = match parsed {
        ScanToken::Card(card_number) => state.veterans.find_by_card(card_number).await,
        ScanToken::Veteran(id) => state.veterans.find_by_id(id).await,
    }
    .map_err(|err| storage_error(state, err))?;
    veteran.ok_or_else(|| {
        state.metrics.record_lookup_failure();
        AppError::VeteranNotFound
    })
}

fn storage_error(state: &AppState, err: anyhow::Error) -> AppError {
    state.metrics.record_storage_error();
    error!("ledger operation failed: {}", err);
    AppError::Internal(err)
}

fn ineligible_error(
    event_id: EventId,
    veteran: Veteran,
    service_id: ServiceId,
    plus_one: bool,
    message: &str,
) -> AppError {
    AppError::Ineligible(Box::new(ScanConflict {
        scan: ScanResponse::from_attempt(event_id, veteran, service_id, plus_one),
        message: message.to_string(),
    }))
}

fn duplicate_error(
    existing: Option<&ScanRecord>,
    veteran: Veteran,
    key: &ScanKey,
    plus_one: bool,
) -> AppError {
    let scan = match existing {
        Some(record) => ScanResponse::from_record(record, Some(veteran)),
        None => ScanResponse::from_attempt(key.event_id, veteran, key.service_id, plus_one),
    };
    AppError::Duplicate(Box::new(ScanConflict {
        scan,
        message: MSG_DUPLICATE.to_string(),
    }))
}
