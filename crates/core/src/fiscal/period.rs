//! Accounting period types and lifecycle rules.
//!
//! Periods gate posting: journal entries can only be created, posted, or
//! reversed while their owning period is open. The lifecycle is strictly
//! one-directional: `open -> closed -> locked`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use folio_shared::types::AccountingPeriodId;

use crate::ledger::error::LedgerError;

/// Granularity of the periods in a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Twelve periods per fiscal year.
    Monthly,
    /// Four periods per fiscal year.
    Quarterly,
    /// One period per fiscal year.
    Annually,
}

impl PeriodType {
    /// Number of periods this type produces per fiscal year.
    #[must_use]
    pub const fn periods_per_year(self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Annually => 1,
        }
    }
}

/// Accounting period status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period accepts postings.
    Open,
    /// Period is closed; no new postings.
    Closed,
    /// Period is locked; closed and permanently sealed.
    Locked,
}

impl PeriodStatus {
    /// Returns true if entries in this period may be created, posted, or
    /// reversed.
    #[must_use]
    pub fn allows_posting(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns the lowercase label used in errors and wire payloads.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Locked => "locked",
        }
    }
}

/// Validates a period status transition.
///
/// The only legal moves are `open -> closed` and `closed -> locked`; no
/// transition may regress.
///
/// # Errors
///
/// Returns `InvalidPeriodTransition` for every other pair.
pub fn validate_transition(from: PeriodStatus, to: PeriodStatus) -> Result<(), LedgerError> {
    match (from, to) {
        (PeriodStatus::Open, PeriodStatus::Closed)
        | (PeriodStatus::Closed, PeriodStatus::Locked) => Ok(()),
        (from, to) => Err(LedgerError::InvalidPeriodTransition {
            from: from.as_str(),
            to: to.as_str(),
        }),
    }
}

/// Validates that a period permits posting activity.
///
/// # Errors
///
/// Returns `PeriodClosed` (with the period identity for caller context)
/// when the period is closed or locked.
pub fn validate_posting_allowed(period: &AccountingPeriod) -> Result<(), LedgerError> {
    if period.status.allows_posting() {
        return Ok(());
    }
    Err(LedgerError::PeriodClosed {
        fiscal_year: period.fiscal_year,
        period_number: period.period_number,
        status: period.status.as_str(),
    })
}

/// An accounting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountingPeriod {
    /// Unique identifier.
    pub id: AccountingPeriodId,
    /// Fiscal year (e.g. 2026).
    pub fiscal_year: i32,
    /// Period number within the fiscal year (1-based).
    pub period_number: i32,
    /// Period granularity.
    pub period_type: PeriodType,
    /// Inclusive start of the period.
    pub start_date: NaiveDate,
    /// Exclusive end of the period (half-open interval).
    pub end_date: NaiveDate,
    /// Lifecycle status.
    pub status: PeriodStatus,
    /// Whether this is the current period (at most one system-wide).
    pub is_current: bool,
}

impl AccountingPeriod {
    /// Returns true if the given date falls within this period's
    /// half-open `[start_date, end_date)` interval.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date < self.end_date
    }
}

/// Date span of a generated period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSpan {
    /// Period number within the fiscal year (1-based).
    pub period_number: i32,
    /// Inclusive start date.
    pub start_date: NaiveDate,
    /// Exclusive end date.
    pub end_date: NaiveDate,
}

/// Generates the non-overlapping period spans of a fiscal year.
///
/// Monthly years produce 12 calendar months, quarterly years 4 quarters,
/// annual years a single span; consecutive spans share a boundary (each
/// `end_date` is the next `start_date`).
#[must_use]
pub fn generate_periods(fiscal_year: i32, period_type: PeriodType) -> Vec<PeriodSpan> {
    let months_per_period = match period_type {
        PeriodType::Monthly => 1u32,
        PeriodType::Quarterly => 3,
        PeriodType::Annually => 12,
    };

    let count = period_type.periods_per_year();
    let mut spans = Vec::with_capacity(count as usize);

    for index in 0..count {
        let start_month = index * months_per_period + 1;
        let end_month = start_month + months_per_period;

        let start_date = first_of_month(fiscal_year, start_month);
        let end_date = if end_month > 12 {
            first_of_month(fiscal_year + 1, end_month - 12)
        } else {
            first_of_month(fiscal_year, end_month)
        };

        #[allow(clippy::cast_possible_wrap)]
        spans.push(PeriodSpan {
            period_number: (index + 1) as i32,
            start_date,
            end_date,
        });
    }

    spans
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // month is always derived from a 1..=12 computation above.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn period(status: PeriodStatus) -> AccountingPeriod {
        AccountingPeriod {
            id: AccountingPeriodId::new(),
            fiscal_year: 2026,
            period_number: 3,
            period_type: PeriodType::Monthly,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            status,
            is_current: false,
        }
    }

    #[rstest]
    #[case(PeriodStatus::Open, PeriodStatus::Closed, true)]
    #[case(PeriodStatus::Closed, PeriodStatus::Locked, true)]
    // Regressions and skips are rejected.
    #[case(PeriodStatus::Closed, PeriodStatus::Open, false)]
    #[case(PeriodStatus::Locked, PeriodStatus::Closed, false)]
    #[case(PeriodStatus::Locked, PeriodStatus::Open, false)]
    #[case(PeriodStatus::Open, PeriodStatus::Locked, false)]
    #[case(PeriodStatus::Open, PeriodStatus::Open, false)]
    fn test_transition_forward_only(
        #[case] from: PeriodStatus,
        #[case] to: PeriodStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(validate_transition(from, to).is_ok(), allowed);
    }

    #[test]
    fn test_posting_gate() {
        assert!(validate_posting_allowed(&period(PeriodStatus::Open)).is_ok());

        let err = validate_posting_allowed(&period(PeriodStatus::Closed)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::PeriodClosed {
                fiscal_year: 2026,
                period_number: 3,
                status: "closed",
            }
        ));

        let err = validate_posting_allowed(&period(PeriodStatus::Locked)).unwrap_err();
        assert!(matches!(err, LedgerError::PeriodClosed { status: "locked", .. }));
    }

    #[test]
    fn test_contains_date_half_open() {
        let p = period(PeriodStatus::Open);
        assert!(p.contains_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
        assert!(p.contains_date(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        // End date belongs to the next period.
        assert!(!p.contains_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
        assert!(!p.contains_date(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()));
    }

    #[test]
    fn test_generate_monthly_periods() {
        let spans = generate_periods(2026, PeriodType::Monthly);
        assert_eq!(spans.len(), 12);

        assert_eq!(spans[0].period_number, 1);
        assert_eq!(
            spans[0].start_date,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        assert_eq!(
            spans[0].end_date,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );

        // December ends at the next year's January 1st.
        assert_eq!(
            spans[11].end_date,
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()
        );

        // Consecutive spans share a boundary and never overlap.
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end_date, pair[1].start_date);
        }
    }

    #[test]
    fn test_generate_quarterly_periods() {
        let spans = generate_periods(2026, PeriodType::Quarterly);
        assert_eq!(spans.len(), 4);
        assert_eq!(
            spans[1].start_date,
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
        );
        assert_eq!(
            spans[3].end_date,
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_generate_annual_period() {
        let spans = generate_periods(2026, PeriodType::Annually);
        assert_eq!(spans.len(), 1);
        assert_eq!(
            spans[0].start_date,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        assert_eq!(
            spans[0].end_date,
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()
        );
    }
}
