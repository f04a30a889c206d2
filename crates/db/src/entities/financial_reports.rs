//! `SeaORM` Entity for the financial_reports table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ReportStatus, ReportType};

/// A financial report header row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "financial_reports")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique report number (e.g. `BS-2026-03`).
    pub report_number: String,
    /// Report type.
    pub report_type: ReportType,
    /// Accounting period the report covers.
    pub accounting_period: Uuid,
    /// Start of the covered span.
    pub start_date: Date,
    /// End of the covered span.
    pub end_date: Date,
    /// Lifecycle status.
    pub status: ReportStatus,
    /// Generation parameters, recorded verbatim.
    pub parameters: Json,
    /// Sum of asset balances.
    pub total_assets: Decimal,
    /// Sum of liability balances.
    pub total_liabilities: Decimal,
    /// Sum of equity balances.
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
    /// When the snapshot was generated.
    pub generated_at: DateTimeWithTimeZone,
    /// Who requested generation.
    pub generated_by: Option<Uuid>,
    /// When the report was approved.
    pub approved_at: Option<DateTimeWithTimeZone>,
    /// Who approved the report.
    pub approved_by: Option<Uuid>,
    /// When the report was published.
    pub published_at: Option<DateTimeWithTimeZone>,
    /// Who published the report.
    pub published_by: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Snapshot rows of this report.
    #[sea_orm(has_many = "super::report_lines::Entity")]
    ReportLines,
}

impl Related<super::report_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReportLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
