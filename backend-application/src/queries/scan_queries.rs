// Scan history queries
// Read-only: validates and clamps paging, then delegates to the ledger's
// live view.

use tracing::error;

use backend_domain::{ScanFilters, SortOrder};

use crate::dtos::ScanResponse;
use crate::{AppError, AppState};

pub async fn list_scans(
    state: &AppState,
    filters: ScanFilters,
) -> Result<Vec<ScanResponse>, AppError> {
    let filters = normalize_filters(
        filters,
        state.config.default_page_limit,
        state.config.max_page_limit,
    )?;

    let records = state.ledger.list(&filters).await.map_err(|err| {
        state.metrics.record_storage_error();
        error!("failed to list scans: {}", err);
        AppError::Internal(err)
    })?;
    Ok(records
        .iter()
        .map(|record| ScanResponse::from_record(record, None))
        .collect())
}

fn normalize_filters(
    mut filters: ScanFilters,
    default_limit: usize,
    max_limit: usize,
) -> Result<ScanFilters, AppError> {
    if let (Some(start), Some(end)) = (filters.scan_date_start, filters.scan_date_end) {
        if start > end {
            return Err(AppError::BadRequest(
                "scanDateStart is after scanDateEnd".to_string(),
            ));
        }
    }
    let limit = filters.limit.unwrap_or(default_limit).clamp(1, max_limit);
    filters.limit = Some(limit);
    filters.offset = Some(filters.offset.unwrap_or(0));
    filters.order = Some(filters.order.unwrap_or(SortOrder::Asc));
    Ok(filters)
}
