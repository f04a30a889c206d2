//! Double-entry journal engine.
//!
//! This module implements the journal entry core:
//! - Entry and line domain types
//! - Line validation and the balance invariant
//! - Posting/reversal state machine and sign convention
//! - Error types for ledger operations

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use service::{JournalService, ReversalDraft};
pub use types::{
    CreateJournalEntryInput, EntryStatus, EntryTotals, EntryType, JournalLineInput, LineSide,
    SourceKind, SourceRef, balance_tolerance,
};
pub use validation::validate_lines;
