//! `SeaORM` entity definitions for the ledger tables.

pub mod accounting_periods;
pub mod chart_of_accounts;
pub mod financial_reports;
pub mod journal_entries;
pub mod journal_lines;
pub mod report_lines;
pub mod sea_orm_active_enums;
