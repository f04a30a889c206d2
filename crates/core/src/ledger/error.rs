//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur during journal entry
//! operations: line validation errors, account eligibility errors,
//! accounting period errors, and entry state errors.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Journal entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// Entry debit and credit totals differ beyond tolerance.
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total of debit-side line amounts.
        debit: Decimal,
        /// Total of credit-side line amounts.
        credit: Decimal,
    },

    /// Line must set exactly one of debit account / credit account.
    #[error("Line {line} must set exactly one of debitAccount and creditAccount")]
    InvalidLineSide {
        /// 1-based line number.
        line: usize,
    },

    /// Line amount cannot be zero.
    #[error("Line {line} amount cannot be zero")]
    ZeroAmount {
        /// 1-based line number.
        line: usize,
    },

    /// Line amount cannot be negative.
    #[error("Line {line} amount cannot be negative")]
    NegativeAmount {
        /// 1-based line number.
        line: usize,
    },

    /// Line description is required.
    #[error("Line {line} description is required")]
    MissingDescription {
        /// 1-based line number.
        line: usize,
    },

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account is not a postable detail account.
    #[error("Account {code} does not accept postings")]
    AccountNotPostable {
        /// Account code.
        code: String,
    },

    /// Account does not allow manual journal entries.
    #[error("Account {code} does not allow manual entries")]
    ManualEntryNotAllowed {
        /// Account code.
        code: String,
    },

    // ========== Accounting Period Errors ==========
    /// Accounting period not found.
    #[error("Accounting period not found: {0}")]
    PeriodNotFound(Uuid),

    /// No accounting period covers the transaction date.
    #[error("No accounting period covers date {0}")]
    NoPeriodForDate(chrono::NaiveDate),

    /// Accounting period is closed or locked; no posting allowed.
    #[error("Accounting period {fiscal_year}-{period_number} is {status}, no posting allowed")]
    PeriodClosed {
        /// Fiscal year of the period.
        fiscal_year: i32,
        /// Period number within the fiscal year.
        period_number: i32,
        /// The period status that rejected the posting.
        status: &'static str,
    },

    /// Period cannot close while draft entries remain in it.
    #[error("Cannot close period: {count} draft entries remain")]
    DraftEntriesRemain {
        /// Number of draft entries still in the period.
        count: u64,
    },

    /// Period lifecycle only moves forward (open -> closed -> locked).
    #[error("Invalid period transition from {from} to {to}")]
    InvalidPeriodTransition {
        /// Current period status.
        from: &'static str,
        /// Requested period status.
        to: &'static str,
    },

    // ========== Entry State Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Entry is already posted.
    #[error("Journal entry {entry_number} is already posted")]
    AlreadyPosted {
        /// Entry number for caller context.
        entry_number: String,
    },

    /// Entry is already reversed.
    #[error("Journal entry {entry_number} is already reversed")]
    AlreadyReversed {
        /// Entry number for caller context.
        entry_number: String,
    },

    /// Entry must be posted before it can be reversed.
    #[error("Journal entry {entry_number} is not posted")]
    NotPosted {
        /// Entry number for caller context.
        entry_number: String,
    },

    /// Cancelled entries are terminal.
    #[error("Journal entry {entry_number} is cancelled")]
    EntryCancelled {
        /// Entry number for caller context.
        entry_number: String,
    },

    /// Only draft entries may be deleted.
    #[error("Only draft journal entries can be deleted")]
    CanOnlyDeleteDraft,

    /// Only draft entries may be cancelled.
    #[error("Only draft journal entries can be cancelled")]
    CanOnlyCancelDraft,

    /// Posted and reversed entries are immutable.
    #[error("Cannot modify journal entry {entry_number} in status {status}")]
    EntryImmutable {
        /// Entry number for caller context.
        entry_number: String,
        /// Current entry status.
        status: &'static str,
    },

    // ========== Infrastructure Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::InvalidLineSide { .. } => "INVALID_LINE_SIDE",
            Self::ZeroAmount { .. } => "ZERO_AMOUNT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::MissingDescription { .. } => "MISSING_DESCRIPTION",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountNotPostable { .. } => "ACCOUNT_NOT_POSTABLE",
            Self::ManualEntryNotAllowed { .. } => "MANUAL_ENTRY_NOT_ALLOWED",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::NoPeriodForDate(_) => "NO_PERIOD_FOR_DATE",
            Self::PeriodClosed { .. } => "PERIOD_CLOSED",
            Self::DraftEntriesRemain { .. } => "DRAFT_ENTRIES_REMAIN",
            Self::InvalidPeriodTransition { .. } => "INVALID_PERIOD_TRANSITION",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::AlreadyPosted { .. } => "ALREADY_POSTED",
            Self::AlreadyReversed { .. } => "ALREADY_REVERSED",
            Self::NotPosted { .. } => "NOT_POSTED",
            Self::EntryCancelled { .. } => "ENTRY_CANCELLED",
            Self::CanOnlyDeleteDraft => "CAN_ONLY_DELETE_DRAFT",
            Self::CanOnlyCancelDraft => "CAN_ONLY_CANCEL_DRAFT",
            Self::EntryImmutable { .. } => "ENTRY_IMMUTABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InsufficientLines
            | Self::UnbalancedEntry { .. }
            | Self::InvalidLineSide { .. }
            | Self::ZeroAmount { .. }
            | Self::NegativeAmount { .. }
            | Self::MissingDescription { .. }
            | Self::AccountNotPostable { .. }
            | Self::ManualEntryNotAllowed { .. }
            | Self::NoPeriodForDate(_) => 400,

            // 404 Not Found
            Self::AccountNotFound(_) | Self::PeriodNotFound(_) | Self::EntryNotFound(_) => 404,

            // 409 Conflict - concurrency and lifecycle conflicts
            Self::PeriodClosed { .. }
            | Self::DraftEntriesRemain { .. }
            | Self::AlreadyPosted { .. }
            | Self::AlreadyReversed { .. } => 409,

            // 422 Unprocessable - invalid lifecycle transitions
            Self::InvalidPeriodTransition { .. }
            | Self::NotPosted { .. }
            | Self::EntryCancelled { .. }
            | Self::CanOnlyDeleteDraft
            | Self::CanOnlyCancelDraft
            | Self::EntryImmutable { .. } => 422,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::UnbalancedEntry {
                debit: dec!(100),
                credit: dec!(90),
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(
            LedgerError::InvalidLineSide { line: 1 }.error_code(),
            "INVALID_LINE_SIDE"
        );
        assert_eq!(
            LedgerError::AlreadyPosted {
                entry_number: "JE-2026-000001".to_string(),
            }
            .error_code(),
            "ALREADY_POSTED"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::InsufficientLines.http_status_code(), 400);
        assert_eq!(
            LedgerError::EntryNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::AlreadyPosted {
                entry_number: String::new(),
            }
            .http_status_code(),
            409
        );
        assert_eq!(LedgerError::CanOnlyDeleteDraft.http_status_code(), 422);
        assert_eq!(
            LedgerError::Database("boom".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_error_display_carries_context() {
        let err = LedgerError::UnbalancedEntry {
            debit: dec!(100.00),
            credit: dec!(90.00),
        };
        assert_eq!(
            err.to_string(),
            "Journal entry is not balanced. Debit: 100.00, Credit: 90.00"
        );

        let err = LedgerError::PeriodClosed {
            fiscal_year: 2026,
            period_number: 3,
            status: "locked",
        };
        assert_eq!(
            err.to_string(),
            "Accounting period 2026-3 is locked, no posting allowed"
        );
    }
}
