//! Property tests for journal entry validation and posting math.

use proptest::prelude::*;
use rust_decimal::Decimal;

use folio_shared::types::AccountId;

use super::service::JournalService;
use super::types::{JournalLineInput, LineSide};
use super::validation::validate_lines;

/// Strategy for positive line amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for a balanced entry: N debit/credit line pairs of equal
/// amounts against fresh accounts.
fn balanced_lines_strategy(max_pairs: usize) -> impl Strategy<Value = Vec<JournalLineInput>> {
    prop::collection::vec(amount_strategy(), 1..=max_pairs).prop_map(|amounts| {
        let mut lines = Vec::with_capacity(amounts.len() * 2);
        for amount in amounts {
            lines.push(JournalLineInput {
                debit_account: Some(AccountId::new()),
                credit_account: None,
                amount,
                description: "debit".to_string(),
            });
            lines.push(JournalLineInput {
                debit_account: None,
                credit_account: Some(AccountId::new()),
                amount,
                description: "credit".to_string(),
            });
        }
        lines
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any entry made of equal debit/credit pairs validates, and its
    /// totals agree exactly.
    #[test]
    fn prop_balanced_pairs_validate(lines in balanced_lines_strategy(10)) {
        let totals = validate_lines(&lines).expect("balanced lines must validate");
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debit_total, totals.credit_total);
        prop_assert_eq!(totals.total_amount, totals.debit_total + totals.credit_total);
    }

    /// The posting deltas of a balanced entry sum to zero: what debits
    /// add, credits remove.
    #[test]
    fn prop_balanced_entry_deltas_sum_to_zero(lines in balanced_lines_strategy(10)) {
        let mut net = Decimal::ZERO;
        for (index, line) in lines.iter().enumerate() {
            let (side, _) = line.side(index + 1).unwrap();
            net += JournalService::balance_delta(side, line.amount);
        }
        prop_assert_eq!(net, Decimal::ZERO);
    }

    /// A reversal's delta is the exact negation of the original's delta,
    /// line by line.
    #[test]
    fn prop_reversal_negates_every_line(lines in balanced_lines_strategy(10)) {
        let reversal = JournalService::build_reversal("JE-X", &lines).unwrap();
        prop_assert_eq!(reversal.lines.len(), lines.len());

        for (index, (original, reversed)) in lines.iter().zip(reversal.lines.iter()).enumerate() {
            let number = index + 1;
            let (orig_side, orig_account) = original.side(number).unwrap();
            let (rev_side, rev_account) = reversed.side(number).unwrap();

            prop_assert_eq!(orig_account, rev_account);
            prop_assert_ne!(orig_side, rev_side);
            prop_assert_eq!(
                JournalService::balance_delta(orig_side, original.amount)
                    + JournalService::balance_delta(rev_side, reversed.amount),
                Decimal::ZERO
            );
        }
    }

    /// Skewing one debit line beyond the tolerance breaks validation.
    #[test]
    fn prop_skewed_entry_fails(
        lines in balanced_lines_strategy(5),
        skew in 2i64..100_000i64,
    ) {
        let mut lines = lines;
        let debit_index = lines
            .iter()
            .position(|l| l.debit_account.is_some())
            .unwrap();
        lines[debit_index].amount += Decimal::new(skew, 2);

        prop_assert!(validate_lines(&lines).is_err());
    }

    /// Debit deltas are positive, credit deltas negative, regardless of
    /// amount.
    #[test]
    fn prop_delta_signs(amount in amount_strategy()) {
        prop_assert!(JournalService::balance_delta(LineSide::Debit, amount) > Decimal::ZERO);
        prop_assert!(JournalService::balance_delta(LineSide::Credit, amount) < Decimal::ZERO);
    }
}
