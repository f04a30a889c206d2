//! Journal entry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, routes::error_body};
use folio_core::ledger::error::LedgerError;
use folio_core::ledger::types::{
    CreateJournalEntryInput, EntryType, JournalLineInput, SourceKind, SourceRef,
};
use folio_db::entities::sea_orm_active_enums;
use folio_db::repositories::journal::{EntryFilter, EntryWithLines, JournalRepository};
use folio_shared::types::{AccountId, AccountingPeriodId, UserId};

/// Creates the journal entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journal-entry", post(create_entry))
        .route("/journal-entry", get(list_entries))
        .route("/journal-entry/{id}", get(get_entry))
        .route("/journal-entry/{id}", patch(update_entry))
        .route("/journal-entry/{id}/post", patch(post_entry))
        .route("/journal-entry/{id}/reverse", patch(reverse_entry))
        .route("/journal-entry/{id}/cancel", patch(cancel_entry))
        .route("/journal-entry/{id}", delete(delete_entry))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for a single journal line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    /// Account debited by this line.
    pub debit_account: Option<Uuid>,
    /// Account credited by this line.
    pub credit_account: Option<Uuid>,
    /// Line amount (decimal string, positive).
    pub amount: String,
    /// Line description.
    pub description: String,
}

/// Request body for creating a journal entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    /// Entry number; auto-generated when omitted.
    pub entry_number: Option<String>,
    /// Business date of the transaction.
    pub transaction_date: NaiveDate,
    /// Entry type: manual, automatic, adjustment, closing (default manual).
    pub entry_type: Option<String>,
    /// Source kind: invoice, payment, project, inventory, manual, other.
    pub source_type: Option<String>,
    /// Source document ID.
    pub source_document: Option<Uuid>,
    /// Upstream model name; derived from sourceType, accepted for
    /// compatibility.
    #[allow(dead_code)]
    pub source_model: Option<String>,
    /// Owning accounting period.
    pub accounting_period: Uuid,
    /// Entry lines.
    pub entries: Vec<LineRequest>,
    /// Creating user.
    pub created_by: Option<Uuid>,
}

/// Request body for updating a draft entry's lines.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    /// Replacement lines.
    pub entries: Vec<LineRequest>,
}

/// Request body for reversing an entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseEntryRequest {
    /// Why the entry is being reversed.
    pub reason: String,
    /// Acting user.
    pub actor: Option<Uuid>,
}

/// Request body for posting an entry.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEntryRequest {
    /// Acting user recorded as postedBy.
    pub posted_by: Option<Uuid>,
}

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesQuery {
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by entry type.
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    /// Filter by accounting period.
    pub accounting_period: Option<Uuid>,
}

/// Response for a journal line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    /// Line ID.
    pub id: Uuid,
    /// Position within the entry.
    pub line_number: i32,
    /// Account debited.
    pub debit_account: Option<Uuid>,
    /// Account credited.
    pub credit_account: Option<Uuid>,
    /// Line amount.
    pub amount: String,
    /// Line description.
    pub description: String,
}

/// Response for a journal entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Entry number.
    pub entry_number: String,
    /// Business date.
    pub transaction_date: String,
    /// Posting date.
    pub posting_date: Option<String>,
    /// Entry type.
    pub entry_type: String,
    /// Source kind.
    pub source_type: String,
    /// Source document ID.
    pub source_document: Option<Uuid>,
    /// Upstream model name derived from the source kind.
    pub source_model: Option<&'static str>,
    /// Owning accounting period.
    pub accounting_period: Uuid,
    /// Sum of all line amounts.
    pub total_amount: String,
    /// Lifecycle status.
    pub status: String,
    /// Whether deltas were applied to balances.
    pub is_posted: bool,
    /// When the entry was posted.
    pub posted_at: Option<String>,
    /// Who posted the entry.
    pub posted_by: Option<Uuid>,
    /// The entry this one reverses.
    pub reversal_of: Option<Uuid>,
    /// The entry that reverses this one.
    pub reversed_by: Option<Uuid>,
    /// Reason recorded when reversed.
    pub reversal_reason: Option<String>,
    /// Entry lines.
    pub entries: Vec<LineResponse>,
}

impl From<EntryWithLines> for EntryResponse {
    fn from(value: EntryWithLines) -> Self {
        let EntryWithLines { entry, lines } = value;
        let source_kind: SourceKind = entry.source_type.clone().into();
        Self {
            id: entry.id,
            entry_number: entry.entry_number,
            transaction_date: entry.transaction_date.to_string(),
            posting_date: entry.posting_date.map(|d| d.to_string()),
            entry_type: entry_type_to_string(&entry.entry_type).to_string(),
            source_type: source_type_to_string(&entry.source_type).to_string(),
            source_document: entry.source_document,
            source_model: source_kind.model_name(),
            accounting_period: entry.accounting_period,
            total_amount: entry.total_amount.to_string(),
            status: entry_status_to_string(&entry.status).to_string(),
            is_posted: entry.is_posted,
            posted_at: entry.posted_at.map(|t| t.to_rfc3339()),
            posted_by: entry.posted_by,
            reversal_of: entry.reversal_of,
            reversed_by: entry.reversed_by,
            reversal_reason: entry.reversal_reason,
            entries: lines
                .into_iter()
                .map(|line| LineResponse {
                    id: line.id,
                    line_number: line.line_number,
                    debit_account: line.debit_account,
                    credit_account: line.credit_account,
                    amount: line.amount.to_string(),
                    description: line.description,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/journal-entry` - Create a draft journal entry.
async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateEntryRequest>,
) -> impl IntoResponse {
    let entry_type = match request.entry_type.as_deref() {
        None => EntryType::Manual,
        Some(raw) => match parse_entry_type(raw) {
            Some(parsed) => parsed,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    error_body("VALIDATION_ERROR", "Unknown entryType"),
                )
                    .into_response();
            }
        },
    };

    let kind = match request.source_type.as_deref() {
        None => SourceKind::Manual,
        Some(raw) => match parse_source_kind(raw) {
            Some(parsed) => parsed,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    error_body("VALIDATION_ERROR", "Unknown sourceType"),
                )
                    .into_response();
            }
        },
    };

    let lines = match parse_lines(&request.entries) {
        Ok(lines) => lines,
        Err(response) => return response,
    };

    let input = CreateJournalEntryInput {
        entry_number: request.entry_number,
        transaction_date: request.transaction_date,
        entry_type,
        source: SourceRef {
            kind,
            document: request.source_document,
        },
        accounting_period: AccountingPeriodId::from_uuid(request.accounting_period),
        lines,
        created_by: request.created_by.map(UserId::from_uuid),
    };

    let repo = JournalRepository::new((*state.db).clone());
    match repo.create_entry(input).await {
        Ok(entry) => (StatusCode::CREATED, Json(EntryResponse::from(entry))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/journal-entry` - List entries with filters.
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> impl IntoResponse {
    let filter = EntryFilter {
        status: query.status.as_deref().and_then(parse_db_status),
        entry_type: query.entry_type.as_deref().and_then(parse_db_entry_type),
        accounting_period: query.accounting_period,
    };

    let repo = JournalRepository::new((*state.db).clone());
    match repo.list_entries(filter).await {
        Ok(entries) => {
            let items: Vec<serde_json::Value> = entries
                .into_iter()
                .map(|e| {
                    json!({
                        "id": e.id,
                        "entryNumber": e.entry_number,
                        "transactionDate": e.transaction_date.to_string(),
                        "entryType": entry_type_to_string(&e.entry_type),
                        "sourceType": source_type_to_string(&e.source_type),
                        "accountingPeriod": e.accounting_period,
                        "totalAmount": e.total_amount.to_string(),
                        "status": entry_status_to_string(&e.status),
                        "isPosted": e.is_posted,
                    })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "journalEntries": items }))).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/journal-entry/{id}` - Get an entry with lines.
async fn get_entry(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = JournalRepository::new((*state.db).clone());
    match repo.get_entry(id).await {
        Ok(entry) => (StatusCode::OK, Json(EntryResponse::from(entry))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// PATCH `/journal-entry/{id}` - Replace a draft entry's lines.
async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEntryRequest>,
) -> impl IntoResponse {
    let lines = match parse_lines(&request.entries) {
        Ok(lines) => lines,
        Err(response) => return response,
    };

    let repo = JournalRepository::new((*state.db).clone());
    match repo.update_entry(id, lines).await {
        Ok(entry) => (StatusCode::OK, Json(EntryResponse::from(entry))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// PATCH `/journal-entry/{id}/post` - Post a draft entry.
async fn post_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<PostEntryRequest>>,
) -> impl IntoResponse {
    let posted_by = request.and_then(|Json(r)| r.posted_by);

    let repo = JournalRepository::new((*state.db).clone());
    match repo.post_entry(id, posted_by).await {
        Ok(entry) => (StatusCode::OK, Json(EntryResponse::from(entry))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// PATCH `/journal-entry/{id}/reverse` - Reverse a posted entry.
async fn reverse_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReverseEntryRequest>,
) -> impl IntoResponse {
    let repo = JournalRepository::new((*state.db).clone());
    match repo.reverse_entry(id, request.reason, request.actor).await {
        Ok(reversal) => (StatusCode::OK, Json(EntryResponse::from(reversal))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// PATCH `/journal-entry/{id}/cancel` - Cancel a draft entry.
async fn cancel_entry(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = JournalRepository::new((*state.db).clone());
    match repo.cancel_entry(id).await {
        Ok(entry) => (StatusCode::OK, Json(EntryResponse::from(entry))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// DELETE `/journal-entry/{id}` - Delete a draft entry.
async fn delete_entry(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = JournalRepository::new((*state.db).clone());
    match repo.delete_entry(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn ledger_error_response(error: &LedgerError) -> axum::response::Response {
    if matches!(error, LedgerError::Database(_) | LedgerError::Internal(_)) {
        error!(error = %error, "Journal operation failed");
    }
    let status =
        StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, error_body(error.error_code(), &error.to_string())).into_response()
}

fn parse_lines(requests: &[LineRequest]) -> Result<Vec<JournalLineInput>, axum::response::Response> {
    let mut lines = Vec::with_capacity(requests.len());
    for (index, line) in requests.iter().enumerate() {
        let amount = Decimal::from_str(&line.amount).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                error_body(
                    "VALIDATION_ERROR",
                    &format!("Invalid amount on line {}", index + 1),
                ),
            )
                .into_response()
        })?;
        lines.push(JournalLineInput {
            debit_account: line.debit_account.map(AccountId::from_uuid),
            credit_account: line.credit_account.map(AccountId::from_uuid),
            amount,
            description: line.description.clone(),
        });
    }
    Ok(lines)
}

fn parse_entry_type(raw: &str) -> Option<EntryType> {
    match raw {
        "manual" => Some(EntryType::Manual),
        "automatic" => Some(EntryType::Automatic),
        "adjustment" => Some(EntryType::Adjustment),
        "closing" => Some(EntryType::Closing),
        _ => None,
    }
}

fn parse_source_kind(raw: &str) -> Option<SourceKind> {
    match raw {
        "invoice" => Some(SourceKind::Invoice),
        "payment" => Some(SourceKind::Payment),
        "project" => Some(SourceKind::Project),
        "inventory" => Some(SourceKind::Inventory),
        "manual" => Some(SourceKind::Manual),
        "other" => Some(SourceKind::Other),
        _ => None,
    }
}

fn parse_db_status(raw: &str) -> Option<sea_orm_active_enums::EntryStatus> {
    match raw {
        "draft" => Some(sea_orm_active_enums::EntryStatus::Draft),
        "posted" => Some(sea_orm_active_enums::EntryStatus::Posted),
        "reversed" => Some(sea_orm_active_enums::EntryStatus::Reversed),
        "cancelled" => Some(sea_orm_active_enums::EntryStatus::Cancelled),
        _ => None,
    }
}

fn parse_db_entry_type(raw: &str) -> Option<sea_orm_active_enums::EntryType> {
    match raw {
        "manual" => Some(sea_orm_active_enums::EntryType::Manual),
        "automatic" => Some(sea_orm_active_enums::EntryType::Automatic),
        "adjustment" => Some(sea_orm_active_enums::EntryType::Adjustment),
        "closing" => Some(sea_orm_active_enums::EntryType::Closing),
        _ => None,
    }
}

fn entry_status_to_string(status: &sea_orm_active_enums::EntryStatus) -> &'static str {
    match status {
        sea_orm_active_enums::EntryStatus::Draft => "draft",
        sea_orm_active_enums::EntryStatus::Posted => "posted",
        sea_orm_active_enums::EntryStatus::Reversed => "reversed",
        sea_orm_active_enums::EntryStatus::Cancelled => "cancelled",
    }
}

fn entry_type_to_string(entry_type: &sea_orm_active_enums::EntryType) -> &'static str {
    match entry_type {
        sea_orm_active_enums::EntryType::Manual => "manual",
        sea_orm_active_enums::EntryType::Automatic => "automatic",
        sea_orm_active_enums::EntryType::Adjustment => "adjustment",
        sea_orm_active_enums::EntryType::Closing => "closing",
    }
}

fn source_type_to_string(source_type: &sea_orm_active_enums::SourceType) -> &'static str {
    match source_type {
        sea_orm_active_enums::SourceType::Invoice => "invoice",
        sea_orm_active_enums::SourceType::Payment => "payment",
        sea_orm_active_enums::SourceType::Project => "project",
        sea_orm_active_enums::SourceType::Inventory => "inventory",
        sea_orm_active_enums::SourceType::Manual => "manual",
        sea_orm_active_enums::SourceType::Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_type() {
        assert_eq!(parse_entry_type("manual"), Some(EntryType::Manual));
        assert_eq!(parse_entry_type("closing"), Some(EntryType::Closing));
        assert!(parse_entry_type("bogus").is_none());
    }

    #[test]
    fn test_parse_source_kind() {
        assert_eq!(parse_source_kind("invoice"), Some(SourceKind::Invoice));
        assert_eq!(parse_source_kind("other"), Some(SourceKind::Other));
        assert!(parse_source_kind("bogus").is_none());
    }

    #[test]
    fn test_parse_lines_rejects_bad_amount() {
        let requests = vec![LineRequest {
            debit_account: Some(Uuid::now_v7()),
            credit_account: None,
            amount: "not-a-number".to_string(),
            description: "x".to_string(),
        }];
        assert!(parse_lines(&requests).is_err());
    }

    #[test]
    fn test_parse_lines_accepts_decimal_strings() {
        let requests = vec![LineRequest {
            debit_account: Some(Uuid::now_v7()),
            credit_account: None,
            amount: "1000.50".to_string(),
            description: "Sale".to_string(),
        }];
        let lines = parse_lines(&requests).unwrap();
        assert_eq!(lines[0].amount.to_string(), "1000.50");
    }
}
