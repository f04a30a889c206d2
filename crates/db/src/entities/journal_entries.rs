//! `SeaORM` Entity for the journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EntryStatus, EntryType, SourceType};

/// A journal entry header row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique entry number.
    pub entry_number: String,
    /// Business date of the transaction.
    pub transaction_date: Date,
    /// Date the entry was posted to the ledger.
    pub posting_date: Option<Date>,
    /// Entry classification.
    pub entry_type: EntryType,
    /// Kind of originating source document.
    pub source_type: SourceType,
    /// Identifier of the originating source document.
    pub source_document: Option<Uuid>,
    /// Accounting period the entry belongs to.
    pub accounting_period: Uuid,
    /// Sum of all line amounts, recomputed on every save.
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// Whether the entry's deltas have been applied to balances.
    pub is_posted: bool,
    /// When the entry was posted.
    pub posted_at: Option<DateTimeWithTimeZone>,
    /// Who posted the entry.
    pub posted_by: Option<Uuid>,
    /// The entry this one reverses.
    pub reversal_of: Option<Uuid>,
    /// The entry that reverses this one.
    pub reversed_by: Option<Uuid>,
    /// Reason recorded when this entry was reversed.
    pub reversal_reason: Option<String>,
    /// Who created the entry.
    pub created_by: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning accounting period.
    #[sea_orm(
        belongs_to = "super::accounting_periods::Entity",
        from = "Column::AccountingPeriod",
        to = "super::accounting_periods::Column::Id"
    )]
    AccountingPeriods,
    /// Lines of this entry.
    #[sea_orm(has_many = "super::journal_lines::Entity")]
    JournalLines,
}

impl Related<super::accounting_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountingPeriods.def()
    }
}

impl Related<super::journal_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
