//! Report error types.

use thiserror::Error;

use super::types::ReportStatus;

/// Errors that can occur during report operations.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Report lifecycle transition not permitted from the current status.
    #[error("Invalid report transition from {from} to {to}")]
    InvalidTransition {
        /// Current report status.
        from: ReportStatus,
        /// Requested report status.
        to: ReportStatus,
    },

    /// Report not found.
    #[error("Report not found: {0}")]
    NotFound(uuid::Uuid),

    /// Accounting period not found.
    #[error("Accounting period not found: {0}")]
    PeriodNotFound(uuid::Uuid),

    /// No generator exists for the requested report type.
    #[error("Report type {0:?} is not supported")]
    UnsupportedType(super::types::ReportType),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_REPORT_TRANSITION",
            Self::NotFound(_) => "REPORT_NOT_FOUND",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::UnsupportedType(_) => "UNSUPPORTED_REPORT_TYPE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } => 422,
            Self::NotFound(_) | Self::PeriodNotFound(_) => 404,
            Self::UnsupportedType(_) => 400,
            Self::Database(_) => 500,
        }
    }
}
