//! Journal entry domain types.
//!
//! This module defines the types used for creating and validating
//! double-entry journal entries: entry and line shapes, lifecycle
//! statuses, and the typed source document reference.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_shared::types::{AccountId, AccountingPeriodId, UserId};

use super::error::LedgerError;

/// Tolerance for debit/credit equality checks, in currency units.
#[must_use]
pub fn balance_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

/// Journal entry lifecycle status.
///
/// `draft -> posted -> reversed`; `draft -> cancelled`. No other
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted and can be modified or deleted.
    Draft,
    /// Entry has been posted to account balances (immutable).
    Posted,
    /// Entry has been reversed by a reversing entry (immutable).
    Reversed,
    /// Entry was cancelled before posting (terminal).
    Cancelled,
}

impl EntryStatus {
    /// Returns true if the entry can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns the lowercase label used in errors and wire payloads.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Reversed => "reversed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Journal entry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Manually keyed entry.
    Manual,
    /// Entry created by an upstream source document controller.
    Automatic,
    /// Period adjustment entry.
    Adjustment,
    /// Period closing entry.
    Closing,
}

/// The kind of external document a journal entry originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Sales invoice.
    Invoice,
    /// Payment in or out.
    Payment,
    /// Work-progress project.
    Project,
    /// Warehouse inventory movement.
    Inventory,
    /// Manually keyed, no source document.
    Manual,
    /// Other source.
    Other,
}

impl SourceKind {
    /// Returns the upstream model name for the wire-level `sourceModel`
    /// field, if this kind references a document.
    #[must_use]
    pub fn model_name(self) -> Option<&'static str> {
        match self {
            Self::Invoice => Some("Invoice"),
            Self::Payment => Some("Payment"),
            Self::Project => Some("Project"),
            Self::Inventory => Some("Inventory"),
            Self::Manual | Self::Other => None,
        }
    }
}

/// Typed reference to the external document that produced an entry.
///
/// Replaces the untyped polymorphic reference of upstream systems with a
/// tagged union: the kind names the collaborating document model, the id
/// points into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// What kind of document this entry originates from.
    pub kind: SourceKind,
    /// Identifier of the source document, if any.
    pub document: Option<Uuid>,
}

impl SourceRef {
    /// A manual entry with no source document.
    #[must_use]
    pub const fn manual() -> Self {
        Self {
            kind: SourceKind::Manual,
            document: None,
        }
    }
}

/// The side of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSide {
    /// Debit line: increases the target account's running balance.
    Debit,
    /// Credit line: decreases the target account's running balance.
    Credit,
}

/// Input for a single journal entry line.
///
/// Exactly one of `debit_account` / `credit_account` must be set.
#[derive(Debug, Clone)]
pub struct JournalLineInput {
    /// Account debited by this line, if it is a debit line.
    pub debit_account: Option<AccountId>,
    /// Account credited by this line, if it is a credit line.
    pub credit_account: Option<AccountId>,
    /// Line amount (must be positive).
    pub amount: Decimal,
    /// Line description (required).
    pub description: String,
}

impl JournalLineInput {
    /// Resolves the line's side and target account.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLineSide` unless exactly one side is set. `line` is
    /// the 1-based line number used for error context.
    pub fn side(&self, line: usize) -> Result<(LineSide, AccountId), LedgerError> {
        match (self.debit_account, self.credit_account) {
            (Some(account), None) => Ok((LineSide::Debit, account)),
            (None, Some(account)) => Ok((LineSide::Credit, account)),
            _ => Err(LedgerError::InvalidLineSide { line }),
        }
    }
}

/// Input for creating a journal entry.
#[derive(Debug, Clone)]
pub struct CreateJournalEntryInput {
    /// Entry number; auto-generated when not supplied.
    pub entry_number: Option<String>,
    /// Business date of the transaction.
    pub transaction_date: NaiveDate,
    /// Entry classification.
    pub entry_type: EntryType,
    /// Typed reference to the originating document.
    pub source: SourceRef,
    /// The accounting period the entry belongs to.
    pub accounting_period: AccountingPeriodId,
    /// The entry lines (at least 2).
    pub lines: Vec<JournalLineInput>,
    /// The user creating the entry, when known.
    pub created_by: Option<UserId>,
}

/// Totals derived from an entry's lines.
#[derive(Debug, Clone, Copy)]
pub struct EntryTotals {
    /// Sum of debit-side line amounts.
    pub debit_total: Decimal,
    /// Sum of credit-side line amounts.
    pub credit_total: Decimal,
    /// Sum of all line amounts (both sides) - the persisted `totalAmount`.
    pub total_amount: Decimal,
    /// Whether debit and credit totals agree within tolerance.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit_total: Decimal, credit_total: Decimal) -> Self {
        Self {
            debit_total,
            credit_total,
            total_amount: debit_total + credit_total,
            is_balanced: (debit_total - credit_total).abs() <= balance_tolerance(),
        }
    }

    /// Returns the difference between debit and credit totals.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit_total - self.credit_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_entry_status_editable() {
        assert!(EntryStatus::Draft.is_editable());
        assert!(!EntryStatus::Posted.is_editable());
        assert!(!EntryStatus::Reversed.is_editable());
        assert!(!EntryStatus::Cancelled.is_editable());
    }

    #[test]
    fn test_line_side_resolution() {
        let account = AccountId::new();

        let debit = JournalLineInput {
            debit_account: Some(account),
            credit_account: None,
            amount: dec!(10),
            description: "d".to_string(),
        };
        assert_eq!(debit.side(1).unwrap(), (LineSide::Debit, account));

        let credit = JournalLineInput {
            debit_account: None,
            credit_account: Some(account),
            amount: dec!(10),
            description: "c".to_string(),
        };
        assert_eq!(credit.side(1).unwrap(), (LineSide::Credit, account));
    }

    #[test]
    fn test_line_side_rejects_both_and_neither() {
        let account = AccountId::new();

        let both = JournalLineInput {
            debit_account: Some(account),
            credit_account: Some(account),
            amount: dec!(10),
            description: "x".to_string(),
        };
        assert!(matches!(
            both.side(2),
            Err(LedgerError::InvalidLineSide { line: 2 })
        ));

        let neither = JournalLineInput {
            debit_account: None,
            credit_account: None,
            amount: dec!(10),
            description: "x".to_string(),
        };
        assert!(matches!(
            neither.side(3),
            Err(LedgerError::InvalidLineSide { line: 3 })
        ));
    }

    #[test]
    fn test_totals_balanced_within_tolerance() {
        let totals = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.total_amount, dec!(200.00));

        // One cent off is still within the 0.01 tolerance.
        let totals = EntryTotals::new(dec!(100.00), dec!(99.99));
        assert!(totals.is_balanced);

        let totals = EntryTotals::new(dec!(100.00), dec!(99.98));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(0.02));
    }

    #[test]
    fn test_source_kind_model_names() {
        assert_eq!(SourceKind::Invoice.model_name(), Some("Invoice"));
        assert_eq!(SourceKind::Payment.model_name(), Some("Payment"));
        assert_eq!(SourceKind::Project.model_name(), Some("Project"));
        assert_eq!(SourceKind::Inventory.model_name(), Some("Inventory"));
        assert_eq!(SourceKind::Manual.model_name(), None);
        assert_eq!(SourceKind::Other.model_name(), None);
    }
}
