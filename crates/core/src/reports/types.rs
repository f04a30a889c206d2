//! Report data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::{AccountId, AccountingPeriodId, ReportId, UserId};

use crate::accounts::types::{AccountStatus, AccountSubType, AccountType};

/// Report type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Balance sheet (assets, liabilities, equity).
    BalanceSheet,
    /// Income statement (revenue, expenses, net income).
    IncomeStatement,
    /// Cash flow statement.
    CashFlow,
    /// Trial balance (all accounts, debit vs credit columns).
    TrialBalance,
    /// General ledger detail.
    GeneralLedger,
}

impl ReportType {
    /// Prefix used in report numbers (e.g. `BS-2026-03`).
    #[must_use]
    pub const fn number_prefix(self) -> &'static str {
        match self {
            Self::BalanceSheet => "BS",
            Self::IncomeStatement => "IS",
            Self::CashFlow => "CF",
            Self::TrialBalance => "TB",
            Self::GeneralLedger => "GL",
        }
    }
}

/// Report lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Report is being assembled.
    Draft,
    /// Snapshot generated; awaiting approval.
    Generated,
    /// Approved; awaiting publication.
    Approved,
    /// Published to consumers.
    Published,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Draft => "draft",
            Self::Generated => "generated",
            Self::Approved => "approved",
            Self::Published => "published",
        };
        write!(f, "{label}")
    }
}

/// Generation parameters recorded on a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportParameters {
    /// Include accounts with a zero balance.
    #[serde(default)]
    pub include_zero_balance: bool,
    /// Restrict to detail (leaf) accounts.
    #[serde(default)]
    pub detail_accounts_only: bool,
    /// Optional period to compare against.
    #[serde(default)]
    pub comparison_period: Option<AccountingPeriodId>,
    /// Free-form caller parameters, recorded verbatim.
    #[serde(default)]
    pub custom: serde_json::Map<String, serde_json::Value>,
}

/// A snapshot row in a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLine {
    /// Account this row snapshots, if it is an account row.
    pub account_id: Option<AccountId>,
    /// Account code at generation time.
    pub account_code: String,
    /// Account name at generation time (or section/total label).
    pub account_name: String,
    /// Opening balance at generation time.
    pub opening_balance: Decimal,
    /// Debit column amount.
    pub debit_amount: Decimal,
    /// Credit column amount.
    pub credit_amount: Decimal,
    /// Ending balance copied from the registry at generation time.
    pub ending_balance: Decimal,
    /// Row position within the report.
    pub display_order: i32,
    /// Whether this row is a section subtotal.
    pub is_sub_total: bool,
    /// Whether this row is a report total.
    pub is_total: bool,
    /// Indentation level for rendering.
    pub indent_level: i32,
}

/// Computed report totals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Sum of asset account balances.
    pub total_assets: Decimal,
    /// Sum of liability account balances.
    pub total_liabilities: Decimal,
    /// Sum of equity account balances.
    pub total_equity: Decimal,
    /// Sum of revenue magnitudes.
    pub total_revenue: Decimal,
    /// Sum of expense balances.
    pub total_expenses: Decimal,
    /// Revenue minus expenses.
    pub net_income: Decimal,
    /// Revenue minus cost of goods sold.
    pub gross_profit: Decimal,
    /// Gross profit minus operating expenses.
    pub operating_income: Decimal,
}

/// A generated financial report: an immutable point-in-time snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialReport {
    /// Unique identifier.
    pub id: ReportId,
    /// Report number (e.g. `BS-2026-03`).
    pub report_number: String,
    /// Report type.
    pub report_type: ReportType,
    /// The accounting period the report covers.
    pub accounting_period: AccountingPeriodId,
    /// Start of the covered span.
    pub start_date: NaiveDate,
    /// End of the covered span.
    pub end_date: NaiveDate,
    /// Lifecycle status.
    pub status: ReportStatus,
    /// Snapshot rows.
    pub lines: Vec<ReportLine>,
    /// Computed totals.
    pub summary: ReportSummary,
    /// Generation parameters.
    pub parameters: ReportParameters,
    /// When the snapshot was generated.
    pub generated_at: DateTime<Utc>,
    /// Who requested generation, when known.
    pub generated_by: Option<UserId>,
    /// When the report was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// Who approved the report.
    pub approved_by: Option<UserId>,
    /// When the report was published.
    pub published_at: Option<DateTime<Utc>>,
    /// Who published the report.
    pub published_by: Option<UserId>,
}

/// Registry snapshot of one account, as read at generation time.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    /// Account identifier.
    pub id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Account subtype.
    pub account_sub_type: Option<AccountSubType>,
    /// Opening balance.
    pub opening_balance: Decimal,
    /// Running balance under the uniform debit-plus/credit-minus
    /// convention.
    pub current_balance: Decimal,
    /// Whether the account is a detail (leaf) account.
    pub is_detail_account: bool,
    /// Account status.
    pub status: AccountStatus,
    /// Soft-delete flag.
    pub removed: bool,
}

impl AccountSnapshot {
    /// Returns true if this account participates in report generation.
    #[must_use]
    pub fn is_reportable(&self) -> bool {
        self.status == AccountStatus::Active && !self.removed
    }
}
