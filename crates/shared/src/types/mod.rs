//! Shared domain vocabulary.

pub mod id;

pub use id::{AccountId, AccountingPeriodId, JournalEntryId, JournalLineId, ReportId, UserId};
