//! `SeaORM` Entity for the chart_of_accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AccountStatus, AccountSubType, AccountType, NormalBalance};

/// A chart of accounts row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "chart_of_accounts")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Account code, unique among non-removed accounts.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Account subtype.
    pub account_sub_type: Option<AccountSubType>,
    /// Conventional balance side (informational).
    pub normal_balance: NormalBalance,
    /// Balance at creation.
    pub opening_balance: Decimal,
    /// Running balance, mutated only by posting/reversal.
    pub current_balance: Decimal,
    /// Parent account forming the tree.
    pub parent_account: Option<Uuid>,
    /// Tree depth, 1-based.
    pub level: i32,
    /// Whether postings may target this account.
    pub is_detail_account: bool,
    /// Whether manual entries may target this account.
    pub allow_manual_entry: bool,
    /// Lifecycle status.
    pub status: AccountStatus,
    /// Soft-delete flag.
    pub removed: bool,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Parent account in the hierarchy.
    #[sea_orm(belongs_to = "Entity", from = "Column::ParentAccount", to = "Column::Id")]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}
