//! Accounting period routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, routes::error_body};
use folio_core::fiscal::period::PeriodType;
use folio_db::entities::accounting_periods;
use folio_db::entities::sea_orm_active_enums;
use folio_db::repositories::period::{CreatePeriodInput, PeriodError, PeriodRepository};

/// Creates the accounting period routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounting-period", post(create_period))
        .route("/accounting-period", get(list_periods))
        .route("/accounting-period/year", post(create_year))
        .route("/accounting-period/{id}", get(get_period))
        .route("/accounting-period/{id}/close", patch(close_period))
        .route("/accounting-period/{id}/lock", patch(lock_period))
        .route("/accounting-period/{id}/set-current", patch(set_current))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a standalone period.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePeriodRequest {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Period number within the fiscal year.
    pub period_number: i32,
    /// Period type: monthly, quarterly, annually.
    pub period_type: String,
    /// Inclusive start date.
    pub start_date: NaiveDate,
    /// Exclusive end date.
    pub end_date: NaiveDate,
}

/// Request body for creating a whole fiscal year.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateYearRequest {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Period type: monthly, quarterly, annually.
    pub period_type: String,
}

/// Optional actor payload for lifecycle transitions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRequest {
    /// Acting user.
    pub actor: Option<Uuid>,
}

/// Response for an accounting period.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodResponse {
    /// Period ID.
    pub id: Uuid,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Period number.
    pub period_number: i32,
    /// Period type.
    pub period_type: String,
    /// Inclusive start date.
    pub start_date: String,
    /// Exclusive end date.
    pub end_date: String,
    /// Lifecycle status.
    pub status: String,
    /// Whether this is the current period.
    pub is_current: bool,
}

impl From<accounting_periods::Model> for PeriodResponse {
    fn from(model: accounting_periods::Model) -> Self {
        Self {
            id: model.id,
            fiscal_year: model.fiscal_year,
            period_number: model.period_number,
            period_type: period_type_to_string(&model.period_type).to_string(),
            start_date: model.start_date.to_string(),
            end_date: model.end_date.to_string(),
            status: period_status_to_string(&model.status).to_string(),
            is_current: model.is_current,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/accounting-period` - Create a standalone period.
async fn create_period(
    State(state): State<AppState>,
    Json(request): Json<CreatePeriodRequest>,
) -> impl IntoResponse {
    let Some(period_type) = parse_period_type(&request.period_type) else {
        return (
            StatusCode::BAD_REQUEST,
            error_body("VALIDATION_ERROR", "Unknown periodType"),
        )
            .into_response();
    };

    let repo = PeriodRepository::new((*state.db).clone());
    let input = CreatePeriodInput {
        fiscal_year: request.fiscal_year,
        period_number: request.period_number,
        period_type,
        start_date: request.start_date,
        end_date: request.end_date,
    };

    match repo.create_period(input).await {
        Ok(period) => (StatusCode::CREATED, Json(PeriodResponse::from(period))).into_response(),
        Err(e) => period_error_response(&e),
    }
}

/// POST `/accounting-period/year` - Create all periods of a fiscal year.
async fn create_year(
    State(state): State<AppState>,
    Json(request): Json<CreateYearRequest>,
) -> impl IntoResponse {
    let Some(period_type) = parse_period_type(&request.period_type) else {
        return (
            StatusCode::BAD_REQUEST,
            error_body("VALIDATION_ERROR", "Unknown periodType"),
        )
            .into_response();
    };

    let repo = PeriodRepository::new((*state.db).clone());
    match repo.create_year(request.fiscal_year, period_type).await {
        Ok(periods) => {
            let items: Vec<PeriodResponse> =
                periods.into_iter().map(PeriodResponse::from).collect();
            (StatusCode::CREATED, Json(json!({ "periods": items }))).into_response()
        }
        Err(e) => period_error_response(&e),
    }
}

/// GET `/accounting-period` - List periods.
async fn list_periods(State(state): State<AppState>) -> impl IntoResponse {
    let repo = PeriodRepository::new((*state.db).clone());
    match repo.list_periods().await {
        Ok(periods) => {
            let items: Vec<PeriodResponse> =
                periods.into_iter().map(PeriodResponse::from).collect();
            (StatusCode::OK, Json(json!({ "periods": items }))).into_response()
        }
        Err(e) => period_error_response(&e),
    }
}

/// GET `/accounting-period/{id}` - Get one period.
async fn get_period(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = PeriodRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(period) => (StatusCode::OK, Json(PeriodResponse::from(period))).into_response(),
        Err(e) => period_error_response(&e),
    }
}

/// PATCH `/accounting-period/{id}/close` - Close an open period.
async fn close_period(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<ActorRequest>>,
) -> impl IntoResponse {
    let actor = request.and_then(|Json(r)| r.actor);
    let repo = PeriodRepository::new((*state.db).clone());
    match repo.close(id, actor).await {
        Ok(period) => (StatusCode::OK, Json(PeriodResponse::from(period))).into_response(),
        Err(e) => period_error_response(&e),
    }
}

/// PATCH `/accounting-period/{id}/lock` - Lock a closed period.
async fn lock_period(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<ActorRequest>>,
) -> impl IntoResponse {
    let actor = request.and_then(|Json(r)| r.actor);
    let repo = PeriodRepository::new((*state.db).clone());
    match repo.lock(id, actor).await {
        Ok(period) => (StatusCode::OK, Json(PeriodResponse::from(period))).into_response(),
        Err(e) => period_error_response(&e),
    }
}

/// PATCH `/accounting-period/{id}/set-current` - Mark as current period.
async fn set_current(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = PeriodRepository::new((*state.db).clone());
    match repo.set_current(id).await {
        Ok(period) => (StatusCode::OK, Json(PeriodResponse::from(period))).into_response(),
        Err(e) => period_error_response(&e),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn period_error_response(error: &PeriodError) -> axum::response::Response {
    if matches!(error, PeriodError::Database(_)) {
        error!(error = %error, "Period operation failed");
    }
    let status =
        StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, error_body(error.error_code(), &error.to_string())).into_response()
}

fn parse_period_type(raw: &str) -> Option<PeriodType> {
    match raw {
        "monthly" => Some(PeriodType::Monthly),
        "quarterly" => Some(PeriodType::Quarterly),
        "annually" => Some(PeriodType::Annually),
        _ => None,
    }
}

fn period_type_to_string(period_type: &sea_orm_active_enums::PeriodType) -> &'static str {
    match period_type {
        sea_orm_active_enums::PeriodType::Monthly => "monthly",
        sea_orm_active_enums::PeriodType::Quarterly => "quarterly",
        sea_orm_active_enums::PeriodType::Annually => "annually",
    }
}

fn period_status_to_string(status: &sea_orm_active_enums::PeriodStatus) -> &'static str {
    match status {
        sea_orm_active_enums::PeriodStatus::Open => "open",
        sea_orm_active_enums::PeriodStatus::Closed => "closed",
        sea_orm_active_enums::PeriodStatus::Locked => "locked",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period_type() {
        assert_eq!(parse_period_type("monthly"), Some(PeriodType::Monthly));
        assert_eq!(parse_period_type("quarterly"), Some(PeriodType::Quarterly));
        assert_eq!(parse_period_type("annually"), Some(PeriodType::Annually));
        assert!(parse_period_type("weekly").is_none());
    }
}
