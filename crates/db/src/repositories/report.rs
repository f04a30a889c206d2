//! Financial report repository: snapshot persistence and lifecycle.
//!
//! Generation reads the registry once, hands the snapshot to the core
//! generators, and persists the resulting document (header + lines) in
//! one transaction. Reports are never recomputed in place; regenerating
//! produces a new document.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use folio_core::reports::error::ReportError;
use folio_core::reports::service::ReportService;
use folio_core::reports::types::{
    AccountSnapshot, FinancialReport, ReportParameters, ReportStatus, ReportType,
};
use folio_shared::types::AccountId;

use crate::entities::{
    accounting_periods, chart_of_accounts, financial_reports, report_lines, sea_orm_active_enums,
};

use super::period;

/// A stored report header with its snapshot rows.
#[derive(Debug, Clone)]
pub struct ReportWithLines {
    /// Report header.
    pub report: financial_reports::Model,
    /// Snapshot rows, ordered by display order.
    pub lines: Vec<report_lines::Model>,
}

fn db_err(err: DbErr) -> ReportError {
    ReportError::Database(err.to_string())
}

/// Financial report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Generates and persists a report snapshot for a period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` for an unknown period, or the database
    /// error that rolled the persistence back.
    pub async fn generate(
        &self,
        report_type: ReportType,
        period_id: Uuid,
        parameters: ReportParameters,
        generated_by: Option<Uuid>,
    ) -> Result<FinancialReport, ReportError> {
        let period_row = accounting_periods::Entity::find_by_id(period_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(ReportError::PeriodNotFound(period_id))?;
        let domain_period = period::to_domain(period_row);

        let snapshots = self.account_snapshots().await?;
        let generated_by = generated_by.map(folio_shared::types::UserId::from_uuid);

        let report = match report_type {
            ReportType::BalanceSheet => ReportService::generate_balance_sheet(
                &domain_period,
                &snapshots,
                parameters,
                generated_by,
            ),
            ReportType::IncomeStatement => ReportService::generate_income_statement(
                &domain_period,
                &snapshots,
                parameters,
                generated_by,
            ),
            ReportType::TrialBalance => ReportService::generate_trial_balance(
                &domain_period,
                &snapshots,
                parameters,
                generated_by,
            ),
            ReportType::CashFlow | ReportType::GeneralLedger => {
                return Err(ReportError::UnsupportedType(report_type));
            }
        };

        self.persist(&report).await?;

        tracing::info!(
            report_number = %report.report_number,
            line_count = report.lines.len(),
            "Financial report generated"
        );

        Ok(report)
    }

    /// Reads the registry snapshot the generators consume.
    async fn account_snapshots(&self) -> Result<Vec<AccountSnapshot>, ReportError> {
        let accounts = chart_of_accounts::Entity::find()
            .order_by_asc(chart_of_accounts::Column::AccountCode)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(accounts
            .into_iter()
            .map(|a| AccountSnapshot {
                id: AccountId::from_uuid(a.id),
                account_code: a.account_code,
                account_name: a.account_name,
                account_type: a.account_type.into(),
                account_sub_type: a.account_sub_type.map(Into::into),
                opening_balance: a.opening_balance,
                current_balance: a.current_balance,
                is_detail_account: a.is_detail_account,
                status: a.status.into(),
                removed: a.removed,
            })
            .collect())
    }

    /// Persists a generated report document in one transaction.
    async fn persist(&self, report: &FinancialReport) -> Result<(), ReportError> {
        let now = Utc::now().into();
        let parameters = serde_json::to_value(&report.parameters)
            .map_err(|e| ReportError::Database(e.to_string()))?;

        let txn = self.db.begin().await.map_err(db_err)?;

        let header = financial_reports::ActiveModel {
            id: Set(report.id.into_inner()),
            report_number: Set(report.report_number.clone()),
            report_type: Set(report.report_type.into()),
            accounting_period: Set(report.accounting_period.into_inner()),
            start_date: Set(report.start_date),
            end_date: Set(report.end_date),
            status: Set(report.status.into()),
            parameters: Set(parameters),
            total_assets: Set(report.summary.total_assets),
            total_liabilities: Set(report.summary.total_liabilities),
            total_equity: Set(report.summary.total_equity),
            total_revenue: Set(report.summary.total_revenue),
            total_expenses: Set(report.summary.total_expenses),
            net_income: Set(report.summary.net_income),
            gross_profit: Set(report.summary.gross_profit),
            operating_income: Set(report.summary.operating_income),
            generated_at: Set(report.generated_at.into()),
            generated_by: Set(report.generated_by.map(folio_shared::types::UserId::into_inner)),
            approved_at: Set(None),
            approved_by: Set(None),
            published_at: Set(None),
            published_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        header.insert(&txn).await.map_err(db_err)?;

        for line in &report.lines {
            let row = report_lines::ActiveModel {
                id: Set(Uuid::now_v7()),
                report_id: Set(report.id.into_inner()),
                account_id: Set(line.account_id.map(AccountId::into_inner)),
                account_code: Set(line.account_code.clone()),
                account_name: Set(line.account_name.clone()),
                opening_balance: Set(line.opening_balance),
                debit_amount: Set(line.debit_amount),
                credit_amount: Set(line.credit_amount),
                ending_balance: Set(line.ending_balance),
                display_order: Set(line.display_order),
                is_sub_total: Set(line.is_sub_total),
                is_total: Set(line.is_total),
                indent_level: Set(line.indent_level),
            };
            row.insert(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    /// Gets a stored report with its rows.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the report does not exist.
    pub async fn get_report(&self, id: Uuid) -> Result<ReportWithLines, ReportError> {
        let report = financial_reports::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(ReportError::NotFound(id))?;

        let lines = report_lines::Entity::find()
            .filter(report_lines::Column::ReportId.eq(id))
            .order_by_asc(report_lines::Column::DisplayOrder)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(ReportWithLines { report, lines })
    }

    /// Lists stored reports, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_reports(&self) -> Result<Vec<financial_reports::Model>, ReportError> {
        financial_reports::Entity::find()
            .order_by_desc(financial_reports::Column::GeneratedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Approves a generated report.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the report is `generated`.
    pub async fn approve(
        &self,
        id: Uuid,
        actor: Uuid,
    ) -> Result<financial_reports::Model, ReportError> {
        self.transition(
            id,
            actor,
            ReportStatus::Generated,
            ReportStatus::Approved,
            financial_reports::Column::ApprovedAt,
            financial_reports::Column::ApprovedBy,
        )
        .await
    }

    /// Publishes an approved report.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the report is `approved`.
    pub async fn publish(
        &self,
        id: Uuid,
        actor: Uuid,
    ) -> Result<financial_reports::Model, ReportError> {
        self.transition(
            id,
            actor,
            ReportStatus::Approved,
            ReportStatus::Published,
            financial_reports::Column::PublishedAt,
            financial_reports::Column::PublishedBy,
        )
        .await
    }

    /// Conditionally moves a report from one status to the next,
    /// stamping timestamp and actor.
    async fn transition(
        &self,
        id: Uuid,
        actor: Uuid,
        from: ReportStatus,
        to: ReportStatus,
        at_column: financial_reports::Column,
        by_column: financial_reports::Column,
    ) -> Result<financial_reports::Model, ReportError> {
        let current = self.get_report(id).await?.report;
        let current_status: ReportStatus = current.status.into();
        if current_status != from {
            return Err(ReportError::InvalidTransition {
                from: current_status,
                to,
            });
        }

        let db_to: sea_orm_active_enums::ReportStatus = to.into();
        let db_from: sea_orm_active_enums::ReportStatus = from.into();
        let result = financial_reports::Entity::update_many()
            .col_expr(financial_reports::Column::Status, db_to.as_enum())
            .col_expr(at_column, Expr::value(Utc::now()))
            .col_expr(by_column, Expr::value(actor))
            .col_expr(financial_reports::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(financial_reports::Column::Id.eq(id))
            .filter(financial_reports::Column::Status.eq(db_from))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            // Lost a concurrent transition race.
            let latest: ReportStatus = self.get_report(id).await?.report.status.into();
            return Err(ReportError::InvalidTransition { from: latest, to });
        }

        Ok(self.get_report(id).await?.report)
    }
}
