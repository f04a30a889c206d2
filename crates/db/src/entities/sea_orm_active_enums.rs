//! Database enum types and their conversions to core domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use folio_core::accounts::types as account_types;
use folio_core::fiscal::period as fiscal_types;
use folio_core::ledger::types as ledger_types;
use folio_core::reports::types as report_types;

/// Account type (`account_type` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue account.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense account.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<AccountType> for account_types::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<account_types::AccountType> for AccountType {
    fn from(value: account_types::AccountType) -> Self {
        match value {
            account_types::AccountType::Asset => Self::Asset,
            account_types::AccountType::Liability => Self::Liability,
            account_types::AccountType::Equity => Self::Equity,
            account_types::AccountType::Revenue => Self::Revenue,
            account_types::AccountType::Expense => Self::Expense,
        }
    }
}

/// Account subtype (`account_sub_type` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_sub_type")]
#[serde(rename_all = "snake_case")]
pub enum AccountSubType {
    /// Current asset.
    #[sea_orm(string_value = "current_asset")]
    CurrentAsset,
    /// Fixed asset.
    #[sea_orm(string_value = "fixed_asset")]
    FixedAsset,
    /// Other asset.
    #[sea_orm(string_value = "other_asset")]
    OtherAsset,
    /// Current liability.
    #[sea_orm(string_value = "current_liability")]
    CurrentLiability,
    /// Long-term liability.
    #[sea_orm(string_value = "long_term_liability")]
    LongTermLiability,
    /// Owner equity.
    #[sea_orm(string_value = "owner_equity")]
    OwnerEquity,
    /// Retained earnings.
    #[sea_orm(string_value = "retained_earnings")]
    RetainedEarnings,
    /// Operating revenue.
    #[sea_orm(string_value = "operating_revenue")]
    OperatingRevenue,
    /// Other revenue.
    #[sea_orm(string_value = "other_revenue")]
    OtherRevenue,
    /// Cost of goods sold.
    #[sea_orm(string_value = "cost_of_goods_sold")]
    CostOfGoodsSold,
    /// Operating expense.
    #[sea_orm(string_value = "operating_expense")]
    OperatingExpense,
    /// Other expense.
    #[sea_orm(string_value = "other_expense")]
    OtherExpense,
}

impl From<AccountSubType> for account_types::AccountSubType {
    fn from(value: AccountSubType) -> Self {
        match value {
            AccountSubType::CurrentAsset => Self::CurrentAsset,
            AccountSubType::FixedAsset => Self::FixedAsset,
            AccountSubType::OtherAsset => Self::OtherAsset,
            AccountSubType::CurrentLiability => Self::CurrentLiability,
            AccountSubType::LongTermLiability => Self::LongTermLiability,
            AccountSubType::OwnerEquity => Self::OwnerEquity,
            AccountSubType::RetainedEarnings => Self::RetainedEarnings,
            AccountSubType::OperatingRevenue => Self::OperatingRevenue,
            AccountSubType::OtherRevenue => Self::OtherRevenue,
            AccountSubType::CostOfGoodsSold => Self::CostOfGoodsSold,
            AccountSubType::OperatingExpense => Self::OperatingExpense,
            AccountSubType::OtherExpense => Self::OtherExpense,
        }
    }
}

impl From<account_types::AccountSubType> for AccountSubType {
    fn from(value: account_types::AccountSubType) -> Self {
        match value {
            account_types::AccountSubType::CurrentAsset => Self::CurrentAsset,
            account_types::AccountSubType::FixedAsset => Self::FixedAsset,
            account_types::AccountSubType::OtherAsset => Self::OtherAsset,
            account_types::AccountSubType::CurrentLiability => Self::CurrentLiability,
            account_types::AccountSubType::LongTermLiability => Self::LongTermLiability,
            account_types::AccountSubType::OwnerEquity => Self::OwnerEquity,
            account_types::AccountSubType::RetainedEarnings => Self::RetainedEarnings,
            account_types::AccountSubType::OperatingRevenue => Self::OperatingRevenue,
            account_types::AccountSubType::OtherRevenue => Self::OtherRevenue,
            account_types::AccountSubType::CostOfGoodsSold => Self::CostOfGoodsSold,
            account_types::AccountSubType::OperatingExpense => Self::OperatingExpense,
            account_types::AccountSubType::OtherExpense => Self::OtherExpense,
        }
    }
}

/// Normal balance side (`normal_balance` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "normal_balance")]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Credit-normal.
    #[sea_orm(string_value = "credit")]
    Credit,
}

impl From<NormalBalance> for account_types::NormalBalance {
    fn from(value: NormalBalance) -> Self {
        match value {
            NormalBalance::Debit => Self::Debit,
            NormalBalance::Credit => Self::Credit,
        }
    }
}

impl From<account_types::NormalBalance> for NormalBalance {
    fn from(value: account_types::NormalBalance) -> Self {
        match value {
            account_types::NormalBalance::Debit => Self::Debit,
            account_types::NormalBalance::Credit => Self::Credit,
        }
    }
}

/// Account status (`account_status` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_status")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Active account.
    #[sea_orm(string_value = "active")]
    Active,
    /// Inactive account.
    #[sea_orm(string_value = "inactive")]
    Inactive,
    /// Archived account.
    #[sea_orm(string_value = "archived")]
    Archived,
}

impl From<AccountStatus> for account_types::AccountStatus {
    fn from(value: AccountStatus) -> Self {
        match value {
            AccountStatus::Active => Self::Active,
            AccountStatus::Inactive => Self::Inactive,
            AccountStatus::Archived => Self::Archived,
        }
    }
}

impl From<account_types::AccountStatus> for AccountStatus {
    fn from(value: account_types::AccountStatus) -> Self {
        match value {
            account_types::AccountStatus::Active => Self::Active,
            account_types::AccountStatus::Inactive => Self::Inactive,
            account_types::AccountStatus::Archived => Self::Archived,
        }
    }
}

/// Period granularity (`period_type` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "period_type")]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Monthly periods.
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// Quarterly periods.
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
    /// Annual period.
    #[sea_orm(string_value = "annually")]
    Annually,
}

impl From<PeriodType> for fiscal_types::PeriodType {
    fn from(value: PeriodType) -> Self {
        match value {
            PeriodType::Monthly => Self::Monthly,
            PeriodType::Quarterly => Self::Quarterly,
            PeriodType::Annually => Self::Annually,
        }
    }
}

impl From<fiscal_types::PeriodType> for PeriodType {
    fn from(value: fiscal_types::PeriodType) -> Self {
        match value {
            fiscal_types::PeriodType::Monthly => Self::Monthly,
            fiscal_types::PeriodType::Quarterly => Self::Quarterly,
            fiscal_types::PeriodType::Annually => Self::Annually,
        }
    }
}

/// Accounting period status (`period_status` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "period_status")]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Open for postings.
    #[sea_orm(string_value = "open")]
    Open,
    /// Closed to new postings.
    #[sea_orm(string_value = "closed")]
    Closed,
    /// Permanently sealed.
    #[sea_orm(string_value = "locked")]
    Locked,
}

impl From<PeriodStatus> for fiscal_types::PeriodStatus {
    fn from(value: PeriodStatus) -> Self {
        match value {
            PeriodStatus::Open => Self::Open,
            PeriodStatus::Closed => Self::Closed,
            PeriodStatus::Locked => Self::Locked,
        }
    }
}

impl From<fiscal_types::PeriodStatus> for PeriodStatus {
    fn from(value: fiscal_types::PeriodStatus) -> Self {
        match value {
            fiscal_types::PeriodStatus::Open => Self::Open,
            fiscal_types::PeriodStatus::Closed => Self::Closed,
            fiscal_types::PeriodStatus::Locked => Self::Locked,
        }
    }
}

/// Journal entry status (`entry_status` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Draft entry.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Posted entry.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Reversed entry.
    #[sea_orm(string_value = "reversed")]
    Reversed,
    /// Cancelled entry.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<EntryStatus> for ledger_types::EntryStatus {
    fn from(value: EntryStatus) -> Self {
        match value {
            EntryStatus::Draft => Self::Draft,
            EntryStatus::Posted => Self::Posted,
            EntryStatus::Reversed => Self::Reversed,
            EntryStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ledger_types::EntryStatus> for EntryStatus {
    fn from(value: ledger_types::EntryStatus) -> Self {
        match value {
            ledger_types::EntryStatus::Draft => Self::Draft,
            ledger_types::EntryStatus::Posted => Self::Posted,
            ledger_types::EntryStatus::Reversed => Self::Reversed,
            ledger_types::EntryStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Journal entry classification (`entry_type` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_type")]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Manually keyed entry.
    #[sea_orm(string_value = "manual")]
    Manual,
    /// Entry created by an upstream controller.
    #[sea_orm(string_value = "automatic")]
    Automatic,
    /// Adjustment entry.
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
    /// Closing entry.
    #[sea_orm(string_value = "closing")]
    Closing,
}

impl From<EntryType> for ledger_types::EntryType {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Manual => Self::Manual,
            EntryType::Automatic => Self::Automatic,
            EntryType::Adjustment => Self::Adjustment,
            EntryType::Closing => Self::Closing,
        }
    }
}

impl From<ledger_types::EntryType> for EntryType {
    fn from(value: ledger_types::EntryType) -> Self {
        match value {
            ledger_types::EntryType::Manual => Self::Manual,
            ledger_types::EntryType::Automatic => Self::Automatic,
            ledger_types::EntryType::Adjustment => Self::Adjustment,
            ledger_types::EntryType::Closing => Self::Closing,
        }
    }
}

/// Source document kind (`source_type` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "source_type")]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Sales invoice.
    #[sea_orm(string_value = "invoice")]
    Invoice,
    /// Payment.
    #[sea_orm(string_value = "payment")]
    Payment,
    /// Work-progress project.
    #[sea_orm(string_value = "project")]
    Project,
    /// Inventory movement.
    #[sea_orm(string_value = "inventory")]
    Inventory,
    /// Manual entry.
    #[sea_orm(string_value = "manual")]
    Manual,
    /// Other source.
    #[sea_orm(string_value = "other")]
    Other,
}

impl From<SourceType> for ledger_types::SourceKind {
    fn from(value: SourceType) -> Self {
        match value {
            SourceType::Invoice => Self::Invoice,
            SourceType::Payment => Self::Payment,
            SourceType::Project => Self::Project,
            SourceType::Inventory => Self::Inventory,
            SourceType::Manual => Self::Manual,
            SourceType::Other => Self::Other,
        }
    }
}

impl From<ledger_types::SourceKind> for SourceType {
    fn from(value: ledger_types::SourceKind) -> Self {
        match value {
            ledger_types::SourceKind::Invoice => Self::Invoice,
            ledger_types::SourceKind::Payment => Self::Payment,
            ledger_types::SourceKind::Project => Self::Project,
            ledger_types::SourceKind::Inventory => Self::Inventory,
            ledger_types::SourceKind::Manual => Self::Manual,
            ledger_types::SourceKind::Other => Self::Other,
        }
    }
}

/// Financial report type (`report_type` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "report_type")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Balance sheet.
    #[sea_orm(string_value = "balance_sheet")]
    BalanceSheet,
    /// Income statement.
    #[sea_orm(string_value = "income_statement")]
    IncomeStatement,
    /// Cash flow statement.
    #[sea_orm(string_value = "cash_flow")]
    CashFlow,
    /// Trial balance.
    #[sea_orm(string_value = "trial_balance")]
    TrialBalance,
    /// General ledger detail.
    #[sea_orm(string_value = "general_ledger")]
    GeneralLedger,
}

impl From<ReportType> for report_types::ReportType {
    fn from(value: ReportType) -> Self {
        match value {
            ReportType::BalanceSheet => Self::BalanceSheet,
            ReportType::IncomeStatement => Self::IncomeStatement,
            ReportType::CashFlow => Self::CashFlow,
            ReportType::TrialBalance => Self::TrialBalance,
            ReportType::GeneralLedger => Self::GeneralLedger,
        }
    }
}

impl From<report_types::ReportType> for ReportType {
    fn from(value: report_types::ReportType) -> Self {
        match value {
            report_types::ReportType::BalanceSheet => Self::BalanceSheet,
            report_types::ReportType::IncomeStatement => Self::IncomeStatement,
            report_types::ReportType::CashFlow => Self::CashFlow,
            report_types::ReportType::TrialBalance => Self::TrialBalance,
            report_types::ReportType::GeneralLedger => Self::GeneralLedger,
        }
    }
}

/// Financial report status (`report_status` enum in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "report_status")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Draft report.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Generated snapshot.
    #[sea_orm(string_value = "generated")]
    Generated,
    /// Approved report.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Published report.
    #[sea_orm(string_value = "published")]
    Published,
}

impl From<ReportStatus> for report_types::ReportStatus {
    fn from(value: ReportStatus) -> Self {
        match value {
            ReportStatus::Draft => Self::Draft,
            ReportStatus::Generated => Self::Generated,
            ReportStatus::Approved => Self::Approved,
            ReportStatus::Published => Self::Published,
        }
    }
}

impl From<report_types::ReportStatus> for ReportStatus {
    fn from(value: report_types::ReportStatus) -> Self {
        match value {
            report_types::ReportStatus::Draft => Self::Draft,
            report_types::ReportStatus::Generated => Self::Generated,
            report_types::ReportStatus::Approved => Self::Approved,
            report_types::ReportStatus::Published => Self::Published,
        }
    }
}
