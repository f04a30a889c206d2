//! Journal entry service: posting rules and reversal construction.
//!
//! This service contains pure business logic with no database
//! dependencies. The repository layer feeds it statuses and line data and
//! applies the decisions it returns.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryStatus, EntryTotals, JournalLineInput, LineSide};
use super::validation::validate_lines;

/// A reversing entry built from a posted original.
#[derive(Debug, Clone)]
pub struct ReversalDraft {
    /// Entry number of the reversing entry (`REV-<original>`).
    pub entry_number: String,
    /// Lines with debit/credit accounts swapped and descriptions prefixed.
    pub lines: Vec<JournalLineInput>,
    /// Totals of the reversing entry (identical to the original's).
    pub totals: EntryTotals,
}

/// Journal entry service.
pub struct JournalService;

impl JournalService {
    /// Validates an entry's lines and computes totals.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` on the first violated line rule, or
    /// `UnbalancedEntry` when totals differ beyond the 0.01 tolerance.
    pub fn validate_entry(lines: &[JournalLineInput]) -> Result<EntryTotals, LedgerError> {
        validate_lines(lines)
    }

    /// The signed balance delta a line applies to its target account.
    ///
    /// Debit increases the account's running balance, credit decreases
    /// it, uniformly for every account type. Reports are responsible for
    /// re-signing values per account type.
    #[must_use]
    pub fn balance_delta(side: LineSide, amount: Decimal) -> Decimal {
        match side {
            LineSide::Debit => amount,
            LineSide::Credit => -amount,
        }
    }

    /// Validates that an entry can transition `draft -> posted`.
    ///
    /// # Errors
    ///
    /// `AlreadyPosted` for posted or reversed entries, `EntryCancelled`
    /// for cancelled ones.
    pub fn validate_can_post(status: EntryStatus, entry_number: &str) -> Result<(), LedgerError> {
        match status {
            EntryStatus::Draft => Ok(()),
            EntryStatus::Posted | EntryStatus::Reversed => Err(LedgerError::AlreadyPosted {
                entry_number: entry_number.to_string(),
            }),
            EntryStatus::Cancelled => Err(LedgerError::EntryCancelled {
                entry_number: entry_number.to_string(),
            }),
        }
    }

    /// Validates that an entry can transition `posted -> reversed`.
    ///
    /// # Errors
    ///
    /// `NotPosted` for draft/cancelled entries, `AlreadyReversed` for
    /// reversed ones.
    pub fn validate_can_reverse(
        status: EntryStatus,
        entry_number: &str,
    ) -> Result<(), LedgerError> {
        match status {
            EntryStatus::Posted => Ok(()),
            EntryStatus::Reversed => Err(LedgerError::AlreadyReversed {
                entry_number: entry_number.to_string(),
            }),
            EntryStatus::Draft | EntryStatus::Cancelled => Err(LedgerError::NotPosted {
                entry_number: entry_number.to_string(),
            }),
        }
    }

    /// Validates that an entry can be deleted (draft only).
    ///
    /// # Errors
    ///
    /// Returns `CanOnlyDeleteDraft` for any non-draft status.
    pub fn validate_can_delete(status: EntryStatus) -> Result<(), LedgerError> {
        if status != EntryStatus::Draft {
            return Err(LedgerError::CanOnlyDeleteDraft);
        }
        Ok(())
    }

    /// Validates that an entry can be cancelled (draft only).
    ///
    /// # Errors
    ///
    /// Returns `CanOnlyCancelDraft` for any non-draft status.
    pub fn validate_can_cancel(status: EntryStatus) -> Result<(), LedgerError> {
        if status != EntryStatus::Draft {
            return Err(LedgerError::CanOnlyCancelDraft);
        }
        Ok(())
    }

    /// Validates that a draft entry can still be edited.
    ///
    /// # Errors
    ///
    /// Returns `EntryImmutable` for posted, reversed, and cancelled
    /// entries.
    pub fn validate_can_modify(status: EntryStatus, entry_number: &str) -> Result<(), LedgerError> {
        if status.is_editable() {
            return Ok(());
        }
        Err(LedgerError::EntryImmutable {
            entry_number: entry_number.to_string(),
            status: status.as_str(),
        })
    }

    /// The entry number a reversal of `original` carries.
    #[must_use]
    pub fn reversal_entry_number(original: &str) -> String {
        format!("REV-{original}")
    }

    /// Builds the reversing entry for a posted original.
    ///
    /// Each line swaps its debit/credit account, keeps its amount, and
    /// prefixes its description with `"Reversal: "`. The original's
    /// balances are not rolled back directly; posting the returned draft
    /// achieves the rollback through the ledger itself.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the original's lines do not validate
    /// (which would indicate a corrupt stored entry).
    pub fn build_reversal(
        original_entry_number: &str,
        original_lines: &[JournalLineInput],
    ) -> Result<ReversalDraft, LedgerError> {
        let lines: Vec<JournalLineInput> = original_lines
            .iter()
            .map(|line| JournalLineInput {
                debit_account: line.credit_account,
                credit_account: line.debit_account,
                amount: line.amount,
                description: format!("Reversal: {}", line.description),
            })
            .collect();

        let totals = validate_lines(&lines)?;

        Ok(ReversalDraft {
            entry_number: Self::reversal_entry_number(original_entry_number),
            lines,
            totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_shared::types::AccountId;
    use rust_decimal_macros::dec;

    fn debit(account: AccountId, amount: Decimal, description: &str) -> JournalLineInput {
        JournalLineInput {
            debit_account: Some(account),
            credit_account: None,
            amount,
            description: description.to_string(),
        }
    }

    fn credit(account: AccountId, amount: Decimal, description: &str) -> JournalLineInput {
        JournalLineInput {
            debit_account: None,
            credit_account: Some(account),
            amount,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_balance_delta_sign_convention() {
        // Uniform for every account type: debit +, credit -.
        assert_eq!(
            JournalService::balance_delta(LineSide::Debit, dec!(1000)),
            dec!(1000)
        );
        assert_eq!(
            JournalService::balance_delta(LineSide::Credit, dec!(1000)),
            dec!(-1000)
        );
    }

    #[test]
    fn test_can_post_only_from_draft() {
        assert!(JournalService::validate_can_post(EntryStatus::Draft, "JE-1").is_ok());
        assert!(matches!(
            JournalService::validate_can_post(EntryStatus::Posted, "JE-1"),
            Err(LedgerError::AlreadyPosted { .. })
        ));
        assert!(matches!(
            JournalService::validate_can_post(EntryStatus::Reversed, "JE-1"),
            Err(LedgerError::AlreadyPosted { .. })
        ));
        assert!(matches!(
            JournalService::validate_can_post(EntryStatus::Cancelled, "JE-1"),
            Err(LedgerError::EntryCancelled { .. })
        ));
    }

    #[test]
    fn test_can_reverse_only_from_posted() {
        assert!(JournalService::validate_can_reverse(EntryStatus::Posted, "JE-1").is_ok());
        assert!(matches!(
            JournalService::validate_can_reverse(EntryStatus::Reversed, "JE-1"),
            Err(LedgerError::AlreadyReversed { .. })
        ));
        assert!(matches!(
            JournalService::validate_can_reverse(EntryStatus::Draft, "JE-1"),
            Err(LedgerError::NotPosted { .. })
        ));
        assert!(matches!(
            JournalService::validate_can_reverse(EntryStatus::Cancelled, "JE-1"),
            Err(LedgerError::NotPosted { .. })
        ));
    }

    #[test]
    fn test_delete_and_cancel_draft_only() {
        assert!(JournalService::validate_can_delete(EntryStatus::Draft).is_ok());
        assert!(JournalService::validate_can_cancel(EntryStatus::Draft).is_ok());
        for status in [
            EntryStatus::Posted,
            EntryStatus::Reversed,
            EntryStatus::Cancelled,
        ] {
            assert!(matches!(
                JournalService::validate_can_delete(status),
                Err(LedgerError::CanOnlyDeleteDraft)
            ));
            assert!(matches!(
                JournalService::validate_can_cancel(status),
                Err(LedgerError::CanOnlyCancelDraft)
            ));
        }
    }

    #[test]
    fn test_build_reversal_swaps_sides() {
        let cash = AccountId::new();
        let revenue = AccountId::new();
        let original = vec![
            debit(cash, dec!(1000), "Sale"),
            credit(revenue, dec!(1000), "Sale"),
        ];

        let reversal = JournalService::build_reversal("JE-2026-000042", &original).unwrap();

        assert_eq!(reversal.entry_number, "REV-JE-2026-000042");
        assert_eq!(reversal.lines.len(), 2);

        // Line 1: debit Cash becomes credit Cash.
        assert_eq!(reversal.lines[0].credit_account, Some(cash));
        assert_eq!(reversal.lines[0].debit_account, None);
        assert_eq!(reversal.lines[0].amount, dec!(1000));
        assert_eq!(reversal.lines[0].description, "Reversal: Sale");

        // Line 2: credit Revenue becomes debit Revenue.
        assert_eq!(reversal.lines[1].debit_account, Some(revenue));
        assert_eq!(reversal.lines[1].credit_account, None);

        assert!(reversal.totals.is_balanced);
        assert_eq!(reversal.totals.total_amount, dec!(2000));
    }

    #[test]
    fn test_reversal_nets_to_zero() {
        let cash = AccountId::new();
        let revenue = AccountId::new();
        let original = vec![
            debit(cash, dec!(250), "Sale"),
            credit(revenue, dec!(250), "Sale"),
        ];
        let reversal = JournalService::build_reversal("JE-1", &original).unwrap();

        // Net effect on each account across original + reversal is zero.
        let mut net_cash = Decimal::ZERO;
        let mut net_revenue = Decimal::ZERO;
        for line in original.iter().chain(reversal.lines.iter()) {
            let (side, account) = line.side(1).unwrap();
            let delta = JournalService::balance_delta(side, line.amount);
            if account == cash {
                net_cash += delta;
            } else if account == revenue {
                net_revenue += delta;
            }
        }
        assert_eq!(net_cash, Decimal::ZERO);
        assert_eq!(net_revenue, Decimal::ZERO);
    }
}
