//! `SeaORM` Entity for the journal_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A journal entry line row.
///
/// Exactly one of `debit_account` / `credit_account` is set.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_lines")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning journal entry.
    pub journal_entry_id: Uuid,
    /// Position within the entry (1-based).
    pub line_number: i32,
    /// Account debited by this line.
    pub debit_account: Option<Uuid>,
    /// Account credited by this line.
    pub credit_account: Option<Uuid>,
    /// Line amount (positive).
    pub amount: Decimal,
    /// Line description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning journal entry.
    #[sea_orm(
        belongs_to = "super::journal_entries::Entity",
        from = "Column::JournalEntryId",
        to = "super::journal_entries::Column::Id"
    )]
    JournalEntries,
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
