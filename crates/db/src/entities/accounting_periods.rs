//! `SeaORM` Entity for the accounting_periods table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PeriodStatus, PeriodType};

/// An accounting period row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounting_periods")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Period number within the fiscal year (1-based).
    pub period_number: i32,
    /// Period granularity.
    pub period_type: PeriodType,
    /// Inclusive start date.
    pub start_date: Date,
    /// Exclusive end date (half-open interval).
    pub end_date: Date,
    /// Lifecycle status.
    pub status: PeriodStatus,
    /// Whether this is the current period (at most one).
    pub is_current: bool,
    /// When the period was closed.
    pub closed_at: Option<DateTimeWithTimeZone>,
    /// Who closed the period.
    pub closed_by: Option<Uuid>,
    /// When the period was locked.
    pub locked_at: Option<DateTimeWithTimeZone>,
    /// Who locked the period.
    pub locked_by: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Journal entries recorded in this period.
    #[sea_orm(has_many = "super::journal_entries::Entity")]
    JournalEntries,
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
