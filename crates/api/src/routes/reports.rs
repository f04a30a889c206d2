//! Financial report routes.
//!
//! The report GET endpoints generate and persist a fresh snapshot on
//! every call; stored reports are read back through the list/detail
//! endpoints and move through approve/publish transitions.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, routes::error_body};
use folio_core::reports::error::ReportError;
use folio_core::reports::types::{
    FinancialReport, ReportLine, ReportParameters, ReportStatus, ReportType,
};
use folio_db::entities::report_lines;
use folio_db::repositories::period::PeriodRepository;
use folio_db::repositories::report::{ReportRepository, ReportWithLines};
use folio_shared::types::{AccountId, UserId};

/// Creates the financial report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/financial-report/profit-loss", get(generate_profit_loss))
        .route("/financial-report/balance-sheet", get(generate_balance_sheet))
        .route("/financial-report/trial-balance", get(generate_trial_balance))
        .route("/financial-report", get(list_reports))
        .route("/financial-report/{id}", get(get_report))
        .route("/financial-report/{id}/approve", patch(approve_report))
        .route("/financial-report/{id}/publish", patch(publish_report))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for report generation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuery {
    /// Start of the requested span.
    pub start_date: Option<NaiveDate>,
    /// End of the requested span; selects the owning period.
    pub end_date: Option<NaiveDate>,
    /// Explicit accounting period, overriding the dates.
    pub accounting_period: Option<Uuid>,
    /// Include accounts with zero balances.
    pub include_zero_balance: Option<bool>,
    /// Restrict to detail accounts.
    pub detail_accounts_only: Option<bool>,
    /// Recorded verbatim; balances reflect posted entries only.
    pub include_unposted: Option<bool>,
    /// Who requested generation.
    pub generated_by: Option<Uuid>,
}

/// Request body for report lifecycle transitions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    /// Acting user.
    pub actor: Uuid,
}

/// Response for a report snapshot row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLineResponse {
    /// Account ID, if an account row.
    pub account_id: Option<Uuid>,
    /// Account code.
    pub account_code: String,
    /// Account name or label.
    pub account_name: String,
    /// Opening balance.
    pub opening_balance: String,
    /// Debit column.
    pub debit_amount: String,
    /// Credit column.
    pub credit_amount: String,
    /// Ending balance.
    pub ending_balance: String,
    /// Row position.
    pub display_order: i32,
    /// Whether this row is a subtotal.
    pub is_sub_total: bool,
    /// Whether this row is a report total.
    pub is_total: bool,
    /// Indentation level.
    pub indent_level: i32,
}

/// Response for report summary totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Sum of asset balances.
    pub total_assets: String,
    /// Sum of liability balances.
    pub total_liabilities: String,
    /// Sum of equity balances.
    pub total_equity: String,
    /// Sum of revenue magnitudes.
    pub total_revenue: String,
    /// Sum of expense balances.
    pub total_expenses: String,
    /// Revenue minus expenses.
    pub net_income: String,
    /// Revenue minus cost of goods sold.
    pub gross_profit: String,
    /// Gross profit minus operating expenses.
    pub operating_income: String,
}

/// Response for a financial report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// Report ID.
    pub id: Uuid,
    /// Report number.
    pub report_number: String,
    /// Report type.
    pub report_type: String,
    /// Accounting period covered.
    pub accounting_period: Uuid,
    /// Start of the covered span.
    pub start_date: String,
    /// End of the covered span.
    pub end_date: String,
    /// Lifecycle status.
    pub status: String,
    /// Snapshot rows.
    pub report_lines: Vec<ReportLineResponse>,
    /// Computed totals.
    pub summary: SummaryResponse,
    /// Generation parameters.
    pub parameters: serde_json::Value,
    /// When the snapshot was generated.
    pub generated_at: String,
    /// Who requested generation.
    pub generated_by: Option<Uuid>,
    /// When the report was approved.
    pub approved_at: Option<String>,
    /// Who approved it.
    pub approved_by: Option<Uuid>,
    /// When the report was published.
    pub published_at: Option<String>,
    /// Who published it.
    pub published_by: Option<Uuid>,
}

impl From<FinancialReport> for ReportResponse {
    fn from(report: FinancialReport) -> Self {
        Self {
            id: report.id.into_inner(),
            report_number: report.report_number,
            report_type: report_type_to_string(report.report_type).to_string(),
            accounting_period: report.accounting_period.into_inner(),
            start_date: report.start_date.to_string(),
            end_date: report.end_date.to_string(),
            status: report_status_to_string(report.status).to_string(),
            report_lines: report.lines.iter().map(core_line_response).collect(),
            summary: SummaryResponse {
                total_assets: report.summary.total_assets.to_string(),
                total_liabilities: report.summary.total_liabilities.to_string(),
                total_equity: report.summary.total_equity.to_string(),
                total_revenue: report.summary.total_revenue.to_string(),
                total_expenses: report.summary.total_expenses.to_string(),
                net_income: report.summary.net_income.to_string(),
                gross_profit: report.summary.gross_profit.to_string(),
                operating_income: report.summary.operating_income.to_string(),
            },
            parameters: serde_json::to_value(&report.parameters)
                .unwrap_or_else(|_| json!({})),
            generated_at: report.generated_at.to_rfc3339(),
            generated_by: report.generated_by.map(UserId::into_inner),
            approved_at: report.approved_at.map(|t| t.to_rfc3339()),
            approved_by: report.approved_by.map(UserId::into_inner),
            published_at: report.published_at.map(|t| t.to_rfc3339()),
            published_by: report.published_by.map(UserId::into_inner),
        }
    }
}

impl From<ReportWithLines> for ReportResponse {
    fn from(value: ReportWithLines) -> Self {
        let ReportWithLines { report, lines } = value;
        let report_type: ReportType = report.report_type.into();
        let status: ReportStatus = report.status.into();
        Self {
            id: report.id,
            report_number: report.report_number,
            report_type: report_type_to_string(report_type).to_string(),
            accounting_period: report.accounting_period,
            start_date: report.start_date.to_string(),
            end_date: report.end_date.to_string(),
            status: report_status_to_string(status).to_string(),
            report_lines: lines.iter().map(stored_line_response).collect(),
            summary: SummaryResponse {
                total_assets: report.total_assets.to_string(),
                total_liabilities: report.total_liabilities.to_string(),
                total_equity: report.total_equity.to_string(),
                total_revenue: report.total_revenue.to_string(),
                total_expenses: report.total_expenses.to_string(),
                net_income: report.net_income.to_string(),
                gross_profit: report.gross_profit.to_string(),
                operating_income: report.operating_income.to_string(),
            },
            parameters: report.parameters,
            generated_at: report.generated_at.to_rfc3339(),
            generated_by: report.generated_by,
            approved_at: report.approved_at.map(|t| t.to_rfc3339()),
            approved_by: report.approved_by,
            published_at: report.published_at.map(|t| t.to_rfc3339()),
            published_by: report.published_by,
        }
    }
}

fn core_line_response(line: &ReportLine) -> ReportLineResponse {
    ReportLineResponse {
        account_id: line.account_id.map(AccountId::into_inner),
        account_code: line.account_code.clone(),
        account_name: line.account_name.clone(),
        opening_balance: line.opening_balance.to_string(),
        debit_amount: line.debit_amount.to_string(),
        credit_amount: line.credit_amount.to_string(),
        ending_balance: line.ending_balance.to_string(),
        display_order: line.display_order,
        is_sub_total: line.is_sub_total,
        is_total: line.is_total,
        indent_level: line.indent_level,
    }
}

fn stored_line_response(line: &report_lines::Model) -> ReportLineResponse {
    ReportLineResponse {
        account_id: line.account_id,
        account_code: line.account_code.clone(),
        account_name: line.account_name.clone(),
        opening_balance: line.opening_balance.to_string(),
        debit_amount: line.debit_amount.to_string(),
        credit_amount: line.credit_amount.to_string(),
        ending_balance: line.ending_balance.to_string(),
        display_order: line.display_order,
        is_sub_total: line.is_sub_total,
        is_total: line.is_total,
        indent_level: line.indent_level,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/financial-report/profit-loss` - Generate an income statement.
async fn generate_profit_loss(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> impl IntoResponse {
    generate(state, query, ReportType::IncomeStatement).await
}

/// GET `/financial-report/balance-sheet` - Generate a balance sheet.
async fn generate_balance_sheet(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> impl IntoResponse {
    generate(state, query, ReportType::BalanceSheet).await
}

/// GET `/financial-report/trial-balance` - Generate a trial balance.
async fn generate_trial_balance(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> impl IntoResponse {
    generate(state, query, ReportType::TrialBalance).await
}

async fn generate(
    state: AppState,
    query: GenerateQuery,
    report_type: ReportType,
) -> axum::response::Response {
    let period_id = match resolve_period(&state, &query).await {
        Ok(id) => id,
        Err(response) => return response,
    };

    let mut parameters = ReportParameters {
        include_zero_balance: query.include_zero_balance.unwrap_or(false),
        detail_accounts_only: query.detail_accounts_only.unwrap_or(false),
        comparison_period: None,
        custom: serde_json::Map::new(),
    };
    if let Some(include_unposted) = query.include_unposted {
        parameters
            .custom
            .insert("includeUnposted".to_string(), json!(include_unposted));
    }

    let repo = ReportRepository::new((*state.db).clone());
    match repo
        .generate(report_type, period_id, parameters, query.generated_by)
        .await
    {
        Ok(report) => (StatusCode::CREATED, Json(ReportResponse::from(report))).into_response(),
        Err(e) => report_error_response(&e),
    }
}

/// Resolves the period a generated report covers: an explicit period
/// parameter wins, then the period containing endDate (or startDate),
/// then the period containing today.
async fn resolve_period(
    state: &AppState,
    query: &GenerateQuery,
) -> Result<Uuid, axum::response::Response> {
    if let Some(period_id) = query.accounting_period {
        return Ok(period_id);
    }

    let date = query
        .end_date
        .or(query.start_date)
        .unwrap_or_else(|| Utc::now().date_naive());

    let periods = PeriodRepository::new((*state.db).clone());
    match periods.find_for_date(date).await {
        Ok(Some(period)) => Ok(period.id),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            error_body(
                "NO_PERIOD_FOR_DATE",
                &format!("No accounting period covers date {date}"),
            ),
        )
            .into_response()),
        Err(e) => {
            error!(error = %e, "Period lookup failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("DATABASE_ERROR", "Period lookup failed"),
            )
                .into_response())
        }
    }
}

/// GET `/financial-report` - List stored reports.
async fn list_reports(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());
    match repo.list_reports().await {
        Ok(reports) => {
            let items: Vec<serde_json::Value> = reports
                .into_iter()
                .map(|r| {
                    let report_type: ReportType = r.report_type.into();
                    let status: ReportStatus = r.status.into();
                    json!({
                        "id": r.id,
                        "reportNumber": r.report_number,
                        "reportType": report_type_to_string(report_type),
                        "accountingPeriod": r.accounting_period,
                        "status": report_status_to_string(status),
                        "generatedAt": r.generated_at.to_rfc3339(),
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "reports": items }))).into_response()
        }
        Err(e) => report_error_response(&e),
    }
}

/// GET `/financial-report/{id}` - Get a stored report with its rows.
async fn get_report(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());
    match repo.get_report(id).await {
        Ok(report) => (StatusCode::OK, Json(ReportResponse::from(report))).into_response(),
        Err(e) => report_error_response(&e),
    }
}

/// PATCH `/financial-report/{id}/approve` - Approve a generated report.
async fn approve_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());
    match repo.approve(id, request.actor).await {
        Ok(_) => match repo.get_report(id).await {
            Ok(report) => (StatusCode::OK, Json(ReportResponse::from(report))).into_response(),
            Err(e) => report_error_response(&e),
        },
        Err(e) => report_error_response(&e),
    }
}

/// PATCH `/financial-report/{id}/publish` - Publish an approved report.
async fn publish_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());
    match repo.publish(id, request.actor).await {
        Ok(_) => match repo.get_report(id).await {
            Ok(report) => (StatusCode::OK, Json(ReportResponse::from(report))).into_response(),
            Err(e) => report_error_response(&e),
        },
        Err(e) => report_error_response(&e),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn report_error_response(error: &ReportError) -> axum::response::Response {
    if matches!(error, ReportError::Database(_)) {
        error!(error = %error, "Report operation failed");
    }
    let status =
        StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, error_body(error.error_code(), &error.to_string())).into_response()
}

fn report_type_to_string(report_type: ReportType) -> &'static str {
    match report_type {
        ReportType::BalanceSheet => "balance_sheet",
        ReportType::IncomeStatement => "income_statement",
        ReportType::CashFlow => "cash_flow",
        ReportType::TrialBalance => "trial_balance",
        ReportType::GeneralLedger => "general_ledger",
    }
}

fn report_status_to_string(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Draft => "draft",
        ReportStatus::Generated => "generated",
        ReportStatus::Approved => "approved",
        ReportStatus::Published => "published",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_strings() {
        assert_eq!(
            report_type_to_string(ReportType::BalanceSheet),
            "balance_sheet"
        );
        assert_eq!(
            report_type_to_string(ReportType::IncomeStatement),
            "income_statement"
        );
        assert_eq!(
            report_type_to_string(ReportType::TrialBalance),
            "trial_balance"
        );
    }

    #[test]
    fn test_report_status_strings() {
        assert_eq!(report_status_to_string(ReportStatus::Generated), "generated");
        assert_eq!(report_status_to_string(ReportStatus::Published), "published");
    }
}
