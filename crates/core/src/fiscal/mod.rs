//! Accounting period lifecycle.

pub mod period;

pub use period::{
    AccountingPeriod, PeriodSpan, PeriodStatus, PeriodType, generate_periods,
    validate_posting_allowed, validate_transition,
};
