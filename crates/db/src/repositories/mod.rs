//! Repository abstractions for data access.
//!
//! Each repository owns the persistence side of one subsystem and defers
//! every business decision to `folio-core`. Pure helpers (status checks,
//! delta math, numbering) live as free functions so they stay testable
//! without a database.

pub mod account;
pub mod journal;
pub mod period;
pub mod report;

pub use account::AccountRepository;
pub use journal::JournalRepository;
pub use period::PeriodRepository;
pub use report::ReportRepository;
