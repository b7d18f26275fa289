use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use backend_application::dtos::ScanConflict;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    BadRequest(String),
    NotFound(String),
    /// Business-rule rejection; body carries the scan context and message.
    Forbidden(Box<ScanConflict>),
    /// Duplicate scan; body carries the prior record for display.
    Conflict(Box<ScanConflict>),
    Internal(String),
}

impl From<backend_application::AppError> for HttpError {
    fn from(value: backend_application::AppError) -> Self {
        use backend_application::AppError;
        match value {
            AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            AppError::VeteranNotFound => HttpError::NotFound("veteran not found".to_string()),
            AppError::EventNotFound => HttpError::NotFound("event not found".to_string()),
            AppError::ServiceNotFound => HttpError::NotFound("service not found".to_string()),
            AppError::ScanNotFound => HttpError::NotFound("scan not found".to_string()),
            AppError::Ineligible(conflict) => HttpError::Forbidden(conflict),
            AppError::Duplicate(conflict) => HttpError::Conflict(conflict),
            AppError::Internal(err) => HttpError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "unauthorized".to_string(),
                }),
            )
                .into_response(),
            HttpError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: format!("bad request: {}", msg),
                }),
            )
                .into_response(),
            HttpError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody { error: msg })).into_response()
            }
            HttpError::Forbidden(conflict) => {
                (StatusCode::FORBIDDEN, Json(conflict)).into_response()
            }
            HttpError::Conflict(conflict) => {
                (StatusCode::CONFLICT, Json(conflict)).into_response()
            }
            HttpError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { error: msg }),
            )
                .into_response(),
        }
    }
}
