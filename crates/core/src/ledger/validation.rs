//! Journal entry line validation.
//!
//! Enforces the per-line rules (exactly one side set, positive amount,
//! non-empty description) and the balance invariant: debit and credit
//! totals must agree within 0.01 before any save.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryTotals, JournalLineInput, LineSide};

/// Validates entry lines and computes totals.
///
/// # Errors
///
/// Returns the first violated rule with its 1-based line number, or
/// `UnbalancedEntry` when the per-line rules pass but the totals differ
/// beyond tolerance.
pub fn validate_lines(lines: &[JournalLineInput]) -> Result<EntryTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut debit_total = Decimal::ZERO;
    let mut credit_total = Decimal::ZERO;

    for (index, line) in lines.iter().enumerate() {
        let number = index + 1;
        let (side, _account) = line.side(number)?;

        if line.amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount { line: number });
        }
        if line.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { line: number });
        }
        if line.description.trim().is_empty() {
            return Err(LedgerError::MissingDescription { line: number });
        }

        match side {
            LineSide::Debit => debit_total += line.amount,
            LineSide::Credit => credit_total += line.amount,
        }
    }

    let totals = EntryTotals::new(debit_total, credit_total);
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedEntry {
            debit: totals.debit_total,
            credit: totals.credit_total,
        });
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_shared::types::AccountId;
    use rust_decimal_macros::dec;

    fn debit(amount: Decimal) -> JournalLineInput {
        JournalLineInput {
            debit_account: Some(AccountId::new()),
            credit_account: None,
            amount,
            description: "debit line".to_string(),
        }
    }

    fn credit(amount: Decimal) -> JournalLineInput {
        JournalLineInput {
            debit_account: None,
            credit_account: Some(AccountId::new()),
            amount,
            description: "credit line".to_string(),
        }
    }

    #[test]
    fn test_balanced_entry_passes() {
        let totals = validate_lines(&[debit(dec!(1000)), credit(dec!(1000))]).unwrap();
        assert_eq!(totals.debit_total, dec!(1000));
        assert_eq!(totals.credit_total, dec!(1000));
        assert_eq!(totals.total_amount, dec!(2000));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_unbalanced_entry_fails() {
        let result = validate_lines(&[debit(dec!(100)), credit(dec!(90))]);
        assert!(matches!(
            result,
            Err(LedgerError::UnbalancedEntry {
                debit,
                credit,
            }) if debit == dec!(100) && credit == dec!(90)
        ));
    }

    #[test]
    fn test_one_cent_difference_is_tolerated() {
        let totals = validate_lines(&[debit(dec!(100.00)), credit(dec!(99.99))]).unwrap();
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_single_line_rejected() {
        assert!(matches!(
            validate_lines(&[debit(dec!(100))]),
            Err(LedgerError::InsufficientLines)
        ));
    }

    #[test]
    fn test_zero_amount_rejected_with_line_number() {
        let result = validate_lines(&[debit(dec!(100)), credit(dec!(0))]);
        assert!(matches!(
            result,
            Err(LedgerError::ZeroAmount { line: 2 })
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = validate_lines(&[debit(dec!(-100)), credit(dec!(100))]);
        assert!(matches!(
            result,
            Err(LedgerError::NegativeAmount { line: 1 })
        ));
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut line = debit(dec!(100));
        line.description = "   ".to_string();
        let result = validate_lines(&[line, credit(dec!(100))]);
        assert!(matches!(
            result,
            Err(LedgerError::MissingDescription { line: 1 })
        ));
    }

    #[test]
    fn test_multi_line_split_balances() {
        // One debit split across two credit lines.
        let totals = validate_lines(&[
            debit(dec!(150)),
            credit(dec!(100)),
            credit(dec!(50)),
        ])
        .unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.total_amount, dec!(300));
    }
}
