use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use backend_application::commands::scan_commands;
use backend_application::dtos::{DeleteScanRequest, ScanOutcome, ScanRequest};
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::authenticate;

pub async fn perform_scan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ScanRequest>,
) -> Result<Response, HttpError> {
    let staff = authenticate(&state.config, &headers)?;
    let outcome = scan_commands::perform_scan(&state, &staff, payload).await?;
    Ok(match outcome {
        ScanOutcome::Created(response) => {
            (StatusCode::CREATED, Json(response)).into_response()
        }
        ScanOutcome::Updated(response) => (StatusCode::OK, Json(response)).into_response(),
    })
}

pub async fn delete_scan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeleteScanRequest>,
) -> Result<StatusCode, HttpError> {
    authenticate(&state.config, &headers)?;
    scan_commands::delete_scan(&state, query).await?;
    Ok(StatusCode::NO_CONTENT)
}
