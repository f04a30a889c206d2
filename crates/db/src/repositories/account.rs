//! Account repository for chart of accounts database operations.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};
use uuid::Uuid;

use folio_core::accounts::hierarchy::{AccountNode, build_tree, would_create_cycle};
use folio_core::accounts::types::{
    Account, AccountStatus, AccountSubType, AccountType, NormalBalance,
};
use folio_shared::types::AccountId;

use crate::entities::{chart_of_accounts, journal_entries, journal_lines, sea_orm_active_enums};

/// Error types for account registry operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists among non-removed accounts.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Parent account does not exist, is removed, or would create a cycle.
    #[error("Invalid parent account: {0}")]
    InvalidParent(String),

    /// Account has posted journal lines or a non-zero balance.
    #[error("Account '{code}' is in use: {reason}")]
    InUse {
        /// Account code for caller context.
        code: String,
        /// What keeps the account in use.
        reason: String,
    },

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::InvalidParent(_) => "INVALID_PARENT_ACCOUNT",
            Self::InUse { .. } => "ACCOUNT_IN_USE",
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::DuplicateCode(_) | Self::InUse { .. } => 409,
            Self::InvalidParent(_) => 400,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code (globally unique among non-removed accounts).
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Account subtype.
    pub account_sub_type: Option<AccountSubType>,
    /// Normal balance side; defaults from the account type when omitted.
    pub normal_balance: Option<NormalBalance>,
    /// Opening balance; the running balance starts here.
    pub opening_balance: Decimal,
    /// Parent account for hierarchical structure.
    pub parent_account: Option<Uuid>,
    /// Whether postings may target this account.
    pub is_detail_account: bool,
    /// Whether manual entries may target this account.
    pub allow_manual_entry: bool,
}

/// Filter options for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Filter by account type.
    pub account_type: Option<AccountType>,
    /// Filter by status.
    pub status: Option<AccountStatus>,
}

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account code collides with a non-removed account
    /// - The parent account is missing, removed, or would create a cycle
    /// - The database operation fails
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        // Unique code among non-removed accounts.
        let existing = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::AccountCode.eq(&input.account_code))
            .filter(chart_of_accounts::Column::Removed.eq(false))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.account_code));
        }

        let id = Uuid::now_v7();
        let level = match input.parent_account {
            Some(parent_id) => self.validate_parent(id, parent_id).await?,
            None => 1,
        };

        let normal_balance = input
            .normal_balance
            .unwrap_or_else(|| input.account_type.default_normal_balance());

        let now = Utc::now().into();
        let account = chart_of_accounts::ActiveModel {
            id: Set(id),
            account_code: Set(input.account_code),
            account_name: Set(input.account_name),
            account_type: Set(input.account_type.into()),
            account_sub_type: Set(input.account_sub_type.map(Into::into)),
            normal_balance: Set(normal_balance.into()),
            opening_balance: Set(input.opening_balance),
            current_balance: Set(input.opening_balance),
            parent_account: Set(input.parent_account),
            level: Set(level),
            is_detail_account: Set(input.is_detail_account),
            allow_manual_entry: Set(input.allow_manual_entry),
            status: Set(sea_orm_active_enums::AccountStatus::Active),
            removed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Validates the parent reference and returns the child's level.
    async fn validate_parent(&self, account_id: Uuid, parent_id: Uuid) -> Result<i32, AccountError> {
        let parent = chart_of_accounts::Entity::find_by_id(parent_id)
            .filter(chart_of_accounts::Column::Removed.eq(false))
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountError::InvalidParent(format!("{parent_id} does not exist")))?;

        let pairs = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::Removed.eq(false))
            .all(&self.db)
            .await?;
        let parents: HashMap<AccountId, Option<AccountId>> = pairs
            .iter()
            .map(|a| {
                (
                    AccountId::from_uuid(a.id),
                    a.parent_account.map(AccountId::from_uuid),
                )
            })
            .collect();

        if would_create_cycle(
            &parents,
            AccountId::from_uuid(account_id),
            AccountId::from_uuid(parent_id),
        ) {
            return Err(AccountError::InvalidParent(format!(
                "{parent_id} would create a cycle"
            )));
        }

        Ok(parent.level + 1)
    }

    /// Atomically increments an account's running balance.
    ///
    /// The increment is a single SQL expression, never a read-modify-write
    /// at the application layer, so concurrent posters cannot lose
    /// updates. Callable inside an open transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn apply_balance_delta<C: ConnectionTrait>(
        conn: &C,
        account_id: Uuid,
        delta: Decimal,
    ) -> Result<(), AccountError> {
        let result = chart_of_accounts::Entity::update_many()
            .col_expr(
                chart_of_accounts::Column::CurrentBalance,
                Expr::col(chart_of_accounts::Column::CurrentBalance).add(delta),
            )
            .col_expr(
                chart_of_accounts::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(chart_of_accounts::Column::Id.eq(account_id))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AccountError::NotFound(account_id));
        }
        Ok(())
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist or is removed.
    pub async fn find_by_id(&self, id: Uuid) -> Result<chart_of_accounts::Model, AccountError> {
        chart_of_accounts::Entity::find_by_id(id)
            .filter(chart_of_accounts::Column::Removed.eq(false))
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Lists non-removed accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<chart_of_accounts::Model>, AccountError> {
        let mut query = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::Removed.eq(false))
            .order_by_asc(chart_of_accounts::Column::AccountCode);

        if let Some(account_type) = filter.account_type {
            let db_type: sea_orm_active_enums::AccountType = account_type.into();
            query = query.filter(chart_of_accounts::Column::AccountType.eq(db_type));
        }
        if let Some(status) = filter.status {
            let db_status: sea_orm_active_enums::AccountStatus = status.into();
            query = query.filter(chart_of_accounts::Column::Status.eq(db_status));
        }

        Ok(query.all(&self.db).await?)
    }

    /// Produces the nested account hierarchy for read/report purposes.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn hierarchy(&self) -> Result<Vec<AccountNode>, AccountError> {
        let accounts = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::Removed.eq(false))
            .order_by_asc(chart_of_accounts::Column::AccountCode)
            .all(&self.db)
            .await?;

        Ok(build_tree(accounts.into_iter().map(to_domain).collect()))
    }

    /// Deactivates an account.
    ///
    /// # Errors
    ///
    /// Returns `InUse` if the account has posted journal lines or a
    /// non-zero balance.
    pub async fn deactivate(&self, id: Uuid) -> Result<chart_of_accounts::Model, AccountError> {
        let account = self.find_by_id(id).await?;
        self.ensure_not_in_use(&account).await?;

        let result = chart_of_accounts::Entity::update_many()
            .col_expr(
                chart_of_accounts::Column::Status,
                ActiveEnum::as_enum(&sea_orm_active_enums::AccountStatus::Inactive),
            )
            .col_expr(
                chart_of_accounts::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(chart_of_accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AccountError::NotFound(id));
        }
        self.find_by_id(id).await
    }

    /// Soft-deletes an account.
    ///
    /// Accounts referenced by journal entries are never hard-deleted; the
    /// same in-use guard as `deactivate` applies.
    ///
    /// # Errors
    ///
    /// Returns `InUse` if the account has posted journal lines or a
    /// non-zero balance.
    pub async fn remove(&self, id: Uuid) -> Result<(), AccountError> {
        let account = self.find_by_id(id).await?;
        self.ensure_not_in_use(&account).await?;

        chart_of_accounts::Entity::update_many()
            .col_expr(chart_of_accounts::Column::Removed, Expr::value(true))
            .col_expr(
                chart_of_accounts::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(chart_of_accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Rejects the operation if the account has posted lines or a
    /// non-zero balance.
    async fn ensure_not_in_use(
        &self,
        account: &chart_of_accounts::Model,
    ) -> Result<(), AccountError> {
        if account.current_balance != Decimal::ZERO {
            return Err(AccountError::InUse {
                code: account.account_code.clone(),
                reason: format!("balance is {}", account.current_balance),
            });
        }

        let posted_lines = journal_lines::Entity::find()
            .filter(
                Condition::any()
                    .add(journal_lines::Column::DebitAccount.eq(account.id))
                    .add(journal_lines::Column::CreditAccount.eq(account.id)),
            )
            .join(
                JoinType::InnerJoin,
                journal_lines::Relation::JournalEntries.def(),
            )
            .filter(journal_entries::Column::IsPosted.eq(true))
            .count(&self.db)
            .await?;

        if posted_lines > 0 {
            return Err(AccountError::InUse {
                code: account.account_code.clone(),
                reason: format!("{posted_lines} posted journal lines reference it"),
            });
        }

        Ok(())
    }
}

/// Converts an entity row into the core domain account.
#[must_use]
pub fn to_domain(model: chart_of_accounts::Model) -> Account {
    Account {
        id: AccountId::from_uuid(model.id),
        account_code: model.account_code,
        account_name: model.account_name,
        account_type: model.account_type.into(),
        account_sub_type: model.account_sub_type.map(Into::into),
        normal_balance: model.normal_balance.into(),
        opening_balance: model.opening_balance,
        current_balance: model.current_balance,
        parent_account: model.parent_account.map(AccountId::from_uuid),
        level: model.level,
        is_detail_account: model.is_detail_account,
        allow_manual_entry: model.allow_manual_entry,
        status: model.status.into(),
        removed: model.removed,
    }
}
