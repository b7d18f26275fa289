use thiserror::Error;

use crate::dtos::ScanConflict;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("veteran not found")]
    VeteranNotFound,
    #[error("event not found")]
    EventNotFound,
    #[error("service not found")]
    ServiceNotFound,
    #[error("scan not found")]
    ScanNotFound,
    /// Business-rule rejection (403): no check-in, or no guest on file.
    #[error("{}", .0.message)]
    Ineligible(Box<ScanConflict>),
    /// Idempotent conflict (409); carries the prior record for display.
    #[error("{}", .0.message)]
    Duplicate(Box<ScanConflict>),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
