use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::dtos::ScanResponse;
use backend_application::queries::scan_queries;
use backend_application::AppState;
use backend_domain::ScanFilters;

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_scans(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filters): Query<ScanFilters>,
) -> Result<Json<Vec<ScanResponse>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let results = scan_queries::list_scans(&state, filters).await?;
    Ok(Json(results))
}
