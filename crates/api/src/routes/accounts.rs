//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, routes::error_body};
use folio_core::accounts::types::{AccountStatus, AccountSubType, AccountType, NormalBalance};
use folio_db::entities::chart_of_accounts;
use folio_db::repositories::account::{
    AccountError, AccountFilter, AccountRepository, CreateAccountInput,
};

/// Creates the chart of accounts routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chart-of-accounts", post(create_account))
        .route("/chart-of-accounts", get(list_accounts))
        .route("/chart-of-accounts/hierarchy", get(get_hierarchy))
        .route("/chart-of-accounts/{id}", get(get_account))
        .route("/chart-of-accounts/{id}/deactivate", patch(deactivate_account))
        .route("/chart-of-accounts/{id}", delete(remove_account))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account type: asset, liability, equity, revenue, expense.
    pub account_type: String,
    /// Account subtype (e.g. current_asset, operating_revenue).
    pub account_sub_type: Option<String>,
    /// Normal balance: debit or credit; defaults from the type.
    pub normal_balance: Option<String>,
    /// Opening balance (decimal string).
    pub opening_balance: Option<String>,
    /// Parent account ID.
    pub parent_account: Option<Uuid>,
    /// Whether postings may target this account (default true).
    pub is_detail_account: Option<bool>,
    /// Whether manual entries may target this account (default true).
    pub allow_manual_entry: Option<bool>,
}

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsQuery {
    /// Filter by account type.
    pub account_type: Option<String>,
    /// Filter by status.
    pub status: Option<String>,
}

/// Response for an account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: String,
    /// Account subtype.
    pub account_sub_type: Option<String>,
    /// Normal balance side.
    pub normal_balance: String,
    /// Opening balance.
    pub opening_balance: String,
    /// Current running balance.
    pub current_balance: String,
    /// Parent account ID.
    pub parent_account: Option<Uuid>,
    /// Tree depth, 1-based.
    pub level: i32,
    /// Whether postings may target this account.
    pub is_detail_account: bool,
    /// Whether manual entries may target this account.
    pub allow_manual_entry: bool,
    /// Lifecycle status.
    pub status: String,
}

impl From<chart_of_accounts::Model> for AccountResponse {
    fn from(model: chart_of_accounts::Model) -> Self {
        let account = folio_db::repositories::account::to_domain(model);
        Self {
            id: account.id.into_inner(),
            account_code: account.account_code,
            account_name: account.account_name,
            account_type: account_type_to_string(account.account_type).to_string(),
            account_sub_type: account
                .account_sub_type
                .map(|s| sub_type_to_string(s).to_string()),
            normal_balance: match account.normal_balance {
                NormalBalance::Debit => "debit".to_string(),
                NormalBalance::Credit => "credit".to_string(),
            },
            opening_balance: account.opening_balance.to_string(),
            current_balance: account.current_balance.to_string(),
            parent_account: account.parent_account.map(folio_shared::types::AccountId::into_inner),
            level: account.level,
            is_detail_account: account.is_detail_account,
            allow_manual_entry: account.allow_manual_entry,
            status: status_to_string(account.status).to_string(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/chart-of-accounts` - Create an account.
async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let Some(account_type) = parse_account_type(&request.account_type) else {
        return (
            StatusCode::BAD_REQUEST,
            error_body("VALIDATION_ERROR", "Unknown accountType"),
        )
            .into_response();
    };

    let account_sub_type = match request.account_sub_type.as_deref() {
        None => None,
        Some(raw) => match parse_sub_type(raw) {
            Some(sub) => Some(sub),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    error_body("VALIDATION_ERROR", "Unknown accountSubType"),
                )
                    .into_response();
            }
        },
    };

    let normal_balance = match request.normal_balance.as_deref() {
        None => None,
        Some("debit") => Some(NormalBalance::Debit),
        Some("credit") => Some(NormalBalance::Credit),
        Some(_) => {
            return (
                StatusCode::BAD_REQUEST,
                error_body("VALIDATION_ERROR", "Unknown normalBalance"),
            )
                .into_response();
        }
    };

    let opening_balance = match request.opening_balance.as_deref() {
        None => Decimal::ZERO,
        Some(raw) => match Decimal::from_str(raw) {
            Ok(value) => value,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    error_body("VALIDATION_ERROR", "Invalid openingBalance"),
                )
                    .into_response();
            }
        },
    };

    let repo = AccountRepository::new((*state.db).clone());
    let input = CreateAccountInput {
        account_code: request.account_code,
        account_name: request.account_name,
        account_type,
        account_sub_type,
        normal_balance,
        opening_balance,
        parent_account: request.parent_account,
        is_detail_account: request.is_detail_account.unwrap_or(true),
        allow_manual_entry: request.allow_manual_entry.unwrap_or(true),
    };

    match repo.create_account(input).await {
        Ok(account) => {
            (StatusCode::CREATED, Json(AccountResponse::from(account))).into_response()
        }
        Err(e) => account_error_response(&e),
    }
}

/// GET `/chart-of-accounts` - List accounts.
async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> impl IntoResponse {
    let filter = AccountFilter {
        account_type: query.account_type.as_deref().and_then(parse_account_type),
        status: query.status.as_deref().and_then(parse_status),
    };

    let repo = AccountRepository::new((*state.db).clone());
    match repo.list_accounts(filter).await {
        Ok(accounts) => {
            let items: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            (StatusCode::OK, Json(json!({ "accounts": items }))).into_response()
        }
        Err(e) => account_error_response(&e),
    }
}

/// GET `/chart-of-accounts/hierarchy` - Nested account tree.
async fn get_hierarchy(State(state): State<AppState>) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    match repo.hierarchy().await {
        Ok(tree) => (StatusCode::OK, Json(json!({ "hierarchy": tree }))).into_response(),
        Err(e) => account_error_response(&e),
    }
}

/// GET `/chart-of-accounts/{id}` - Get one account.
async fn get_account(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(account) => (StatusCode::OK, Json(AccountResponse::from(account))).into_response(),
        Err(e) => account_error_response(&e),
    }
}

/// PATCH `/chart-of-accounts/{id}/deactivate` - Deactivate an account.
async fn deactivate_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    match repo.deactivate(id).await {
        Ok(account) => (StatusCode::OK, Json(AccountResponse::from(account))).into_response(),
        Err(e) => account_error_response(&e),
    }
}

/// DELETE `/chart-of-accounts/{id}` - Soft-delete an account.
async fn remove_account(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    match repo.remove(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => account_error_response(&e),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn account_error_response(error: &AccountError) -> axum::response::Response {
    if matches!(error, AccountError::Database(_)) {
        error!(error = %error, "Account operation failed");
    }
    let status =
        StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, error_body(error.error_code(), &error.to_string())).into_response()
}

fn parse_account_type(raw: &str) -> Option<AccountType> {
    match raw {
        "asset" => Some(AccountType::Asset),
        "liability" => Some(AccountType::Liability),
        "equity" => Some(AccountType::Equity),
        "revenue" => Some(AccountType::Revenue),
        "expense" => Some(AccountType::Expense),
        _ => None,
    }
}

fn account_type_to_string(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Asset => "asset",
        AccountType::Liability => "liability",
        AccountType::Equity => "equity",
        AccountType::Revenue => "revenue",
        AccountType::Expense => "expense",
    }
}

fn parse_status(raw: &str) -> Option<AccountStatus> {
    match raw {
        "active" => Some(AccountStatus::Active),
        "inactive" => Some(AccountStatus::Inactive),
        "archived" => Some(AccountStatus::Archived),
        _ => None,
    }
}

fn status_to_string(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Active => "active",
        AccountStatus::Inactive => "inactive",
        AccountStatus::Archived => "archived",
    }
}

fn parse_sub_type(raw: &str) -> Option<AccountSubType> {
    match raw {
        "current_asset" => Some(AccountSubType::CurrentAsset),
        "fixed_asset" => Some(AccountSubType::FixedAsset),
        "other_asset" => Some(AccountSubType::OtherAsset),
        "current_liability" => Some(AccountSubType::CurrentLiability),
        "long_term_liability" => Some(AccountSubType::LongTermLiability),
        "owner_equity" => Some(AccountSubType::OwnerEquity),
        "retained_earnings" => Some(AccountSubType::RetainedEarnings),
        "operating_revenue" => Some(AccountSubType::OperatingRevenue),
        "other_revenue" => Some(AccountSubType::OtherRevenue),
        "cost_of_goods_sold" => Some(AccountSubType::CostOfGoodsSold),
        "operating_expense" => Some(AccountSubType::OperatingExpense),
        "other_expense" => Some(AccountSubType::OtherExpense),
        _ => None,
    }
}

fn sub_type_to_string(sub_type: AccountSubType) -> &'static str {
    match sub_type {
        AccountSubType::CurrentAsset => "current_asset",
        AccountSubType::FixedAsset => "fixed_asset",
        AccountSubType::OtherAsset => "other_asset",
        AccountSubType::CurrentLiability => "current_liability",
        AccountSubType::LongTermLiability => "long_term_liability",
        AccountSubType::OwnerEquity => "owner_equity",
        AccountSubType::RetainedEarnings => "retained_earnings",
        AccountSubType::OperatingRevenue => "operating_revenue",
        AccountSubType::OtherRevenue => "other_revenue",
        AccountSubType::CostOfGoodsSold => "cost_of_goods_sold",
        AccountSubType::OperatingExpense => "operating_expense",
        AccountSubType::OtherExpense => "other_expense",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_round_trip() {
        for raw in ["asset", "liability", "equity", "revenue", "expense"] {
            let parsed = parse_account_type(raw).unwrap();
            assert_eq!(account_type_to_string(parsed), raw);
        }
        assert!(parse_account_type("bogus").is_none());
    }

    #[test]
    fn test_sub_type_round_trip() {
        for raw in [
            "current_asset",
            "cost_of_goods_sold",
            "operating_expense",
            "retained_earnings",
        ] {
            let parsed = parse_sub_type(raw).unwrap();
            assert_eq!(sub_type_to_string(parsed), raw);
        }
        assert!(parse_sub_type("bogus").is_none());
    }
}
