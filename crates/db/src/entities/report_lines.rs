//! `SeaORM` Entity for the report_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A snapshot row of a generated financial report.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "report_lines")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning report.
    pub report_id: Uuid,
    /// Account this row snapshots, if it is an account row.
    pub account_id: Option<Uuid>,
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
    /// Ending balance copied from the registry.
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

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning report.
    #[sea_orm(
        belongs_to = "super::financial_reports::Entity",
        from = "Column::ReportId",
        to = "super::financial_reports::Column::Id"
    )]
    FinancialReports,
}

impl Related<super::financial_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
