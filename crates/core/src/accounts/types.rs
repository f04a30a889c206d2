//! Account domain types for the chart of accounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::AccountId;

/// Account type classification.
///
/// Every ledger account belongs to exactly one of the five fundamental
/// categories; reports aggregate balances by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (cash, receivables, inventory, fixed assets).
    Asset,
    /// Liability account (payables, loans).
    Liability,
    /// Equity account (owner equity, retained earnings).
    Equity,
    /// Revenue account.
    Revenue,
    /// Expense account.
    Expense,
}

impl AccountType {
    /// Returns the side on which this account type conventionally increases.
    ///
    /// Informational metadata only: posting applies a uniform sign
    /// convention regardless of account type.
    #[must_use]
    pub fn default_normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }
}

/// Account subtype, refining the account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSubType {
    /// Current asset (cash, receivables).
    CurrentAsset,
    /// Fixed asset (property, equipment).
    FixedAsset,
    /// Other asset.
    OtherAsset,
    /// Current liability (payables).
    CurrentLiability,
    /// Long-term liability (loans).
    LongTermLiability,
    /// Owner equity.
    OwnerEquity,
    /// Retained earnings.
    RetainedEarnings,
    /// Operating revenue.
    OperatingRevenue,
    /// Other revenue.
    OtherRevenue,
    /// Cost of goods sold.
    CostOfGoodsSold,
    /// Operating expense.
    OperatingExpense,
    /// Other expense.
    OtherExpense,
}

/// The side on which an account conventionally carries its balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal.
    Debit,
    /// Credit-normal.
    Credit,
}

/// Account lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account accepts postings and appears in reports.
    Active,
    /// Account rejects new postings but keeps its history.
    Inactive,
    /// Account is archived.
    Archived,
}

/// A chart of accounts node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Account code, globally unique among non-removed accounts.
    pub account_code: String,
    /// Human-readable account name.
    pub account_name: String,
    /// Fundamental account category.
    pub account_type: AccountType,
    /// Optional refinement of the account type.
    pub account_sub_type: Option<AccountSubType>,
    /// Conventional balance side (informational).
    pub normal_balance: NormalBalance,
    /// Balance at account creation.
    pub opening_balance: Decimal,
    /// Running balance, mutated only by journal entry posting/reversal.
    pub current_balance: Decimal,
    /// Parent account forming the tree; root accounts have none.
    pub parent_account: Option<AccountId>,
    /// Tree depth, 1-based.
    pub level: i32,
    /// Leaf accounts allow postings; header accounts are aggregation-only.
    pub is_detail_account: bool,
    /// Whether manual journal entries may target this account.
    pub allow_manual_entry: bool,
    /// Lifecycle status.
    pub status: AccountStatus,
    /// Soft-delete flag; removed accounts are invisible to new work.
    pub removed: bool,
}

impl Account {
    /// Returns true if a journal line may target this account.
    #[must_use]
    pub fn is_postable(&self) -> bool {
        self.is_detail_account && self.status == AccountStatus::Active && !self.removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn account(status: AccountStatus, is_detail: bool, removed: bool) -> Account {
        Account {
            id: AccountId::new(),
            account_code: "1000".to_string(),
            account_name: "Cash".to_string(),
            account_type: AccountType::Asset,
            account_sub_type: Some(AccountSubType::CurrentAsset),
            normal_balance: NormalBalance::Debit,
            opening_balance: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            parent_account: None,
            level: 1,
            is_detail_account: is_detail,
            allow_manual_entry: true,
            status,
            removed,
        }
    }

    #[test]
    fn test_postable_requires_active_detail_account() {
        assert!(account(AccountStatus::Active, true, false).is_postable());
        assert!(!account(AccountStatus::Inactive, true, false).is_postable());
        assert!(!account(AccountStatus::Archived, true, false).is_postable());
        assert!(!account(AccountStatus::Active, false, false).is_postable());
        assert!(!account(AccountStatus::Active, true, true).is_postable());
    }

    #[test]
    fn test_default_normal_balance_per_type() {
        assert_eq!(
            AccountType::Asset.default_normal_balance(),
            NormalBalance::Debit
        );
        assert_eq!(
            AccountType::Expense.default_normal_balance(),
            NormalBalance::Debit
        );
        assert_eq!(
            AccountType::Liability.default_normal_balance(),
            NormalBalance::Credit
        );
        assert_eq!(
            AccountType::Equity.default_normal_balance(),
            NormalBalance::Credit
        );
        assert_eq!(
            AccountType::Revenue.default_normal_balance(),
            NormalBalance::Credit
        );
    }
}
