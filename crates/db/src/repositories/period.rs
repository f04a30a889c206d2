//! Accounting period repository for period lifecycle operations.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use folio_core::fiscal::period::{
    AccountingPeriod, PeriodStatus, PeriodType, generate_periods, validate_transition,
};
use folio_core::ledger::error::LedgerError;
use folio_shared::types::AccountingPeriodId;

use crate::entities::{accounting_periods, journal_entries, sea_orm_active_enums};

/// Error types for accounting period operations.
#[derive(Debug, thiserror::Error)]
pub enum PeriodError {
    /// Start date must be before end date.
    #[error("Start date must be before end date")]
    InvalidDateRange,

    /// Period overlaps an existing period in the same fiscal year.
    #[error("Period overlaps existing period {fiscal_year}-{period_number}")]
    Overlapping {
        /// Fiscal year of the overlapped period.
        fiscal_year: i32,
        /// Number of the overlapped period.
        period_number: i32,
    },

    /// Periods already exist for the fiscal year.
    #[error("Fiscal year {0} already has periods")]
    YearExists(i32),

    /// Period not found.
    #[error("Accounting period not found: {0}")]
    NotFound(Uuid),

    /// Lifecycle rule violation from the core.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl PeriodError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::Overlapping { .. } => "PERIOD_OVERLAP",
            Self::YearExists(_) => "YEAR_EXISTS",
            Self::NotFound(_) => "PERIOD_NOT_FOUND",
            Self::Ledger(inner) => inner.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidDateRange => 400,
            Self::Overlapping { .. } | Self::YearExists(_) => 409,
            Self::NotFound(_) => 404,
            Self::Ledger(inner) => inner.http_status_code(),
            Self::Database(_) => 500,
        }
    }
}

/// Input for creating a standalone period.
#[derive(Debug, Clone)]
pub struct CreatePeriodInput {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Period number within the fiscal year.
    pub period_number: i32,
    /// Period granularity.
    pub period_type: PeriodType,
    /// Inclusive start date.
    pub start_date: NaiveDate,
    /// Exclusive end date.
    pub end_date: NaiveDate,
}

/// Returns true if two half-open date ranges overlap.
#[must_use]
pub fn date_ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Accounting period repository.
#[derive(Debug, Clone)]
pub struct PeriodRepository {
    db: DatabaseConnection,
}

impl PeriodRepository {
    /// Creates a new period repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a standalone accounting period.
    ///
    /// # Errors
    ///
    /// Returns an error if the date range is invalid or overlaps an
    /// existing period of the same fiscal year.
    pub async fn create_period(
        &self,
        input: CreatePeriodInput,
    ) -> Result<accounting_periods::Model, PeriodError> {
        if input.start_date >= input.end_date {
            return Err(PeriodError::InvalidDateRange);
        }

        let siblings = accounting_periods::Entity::find()
            .filter(accounting_periods::Column::FiscalYear.eq(input.fiscal_year))
            .all(&self.db)
            .await?;

        for sibling in &siblings {
            if date_ranges_overlap(
                input.start_date,
                input.end_date,
                sibling.start_date,
                sibling.end_date,
            ) {
                return Err(PeriodError::Overlapping {
                    fiscal_year: sibling.fiscal_year,
                    period_number: sibling.period_number,
                });
            }
        }

        let now = Utc::now().into();
        let period = accounting_periods::ActiveModel {
            id: Set(Uuid::now_v7()),
            fiscal_year: Set(input.fiscal_year),
            period_number: Set(input.period_number),
            period_type: Set(input.period_type.into()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            status: Set(sea_orm_active_enums::PeriodStatus::Open),
            is_current: Set(false),
            closed_at: Set(None),
            closed_by: Set(None),
            locked_at: Set(None),
            locked_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(period.insert(&self.db).await?)
    }

    /// Creates all periods of a fiscal year in one batch.
    ///
    /// # Errors
    ///
    /// Returns `YearExists` if the fiscal year already has periods.
    pub async fn create_year(
        &self,
        fiscal_year: i32,
        period_type: PeriodType,
    ) -> Result<Vec<accounting_periods::Model>, PeriodError> {
        let existing = accounting_periods::Entity::find()
            .filter(accounting_periods::Column::FiscalYear.eq(fiscal_year))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(PeriodError::YearExists(fiscal_year));
        }

        let txn = self.db.begin().await?;
        let now = Utc::now().into();

        let mut inserted = Vec::new();
        for span in generate_periods(fiscal_year, period_type) {
            let period = accounting_periods::ActiveModel {
                id: Set(Uuid::now_v7()),
                fiscal_year: Set(fiscal_year),
                period_number: Set(span.period_number),
                period_type: Set(period_type.into()),
                start_date: Set(span.start_date),
                end_date: Set(span.end_date),
                status: Set(sea_orm_active_enums::PeriodStatus::Open),
                is_current: Set(false),
                closed_at: Set(None),
                closed_by: Set(None),
                locked_at: Set(None),
                locked_by: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };
            inserted.push(period.insert(&txn).await?);
        }

        txn.commit().await?;
        Ok(inserted)
    }

    /// Finds a period by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the period does not exist.
    pub async fn find_by_id(&self, id: Uuid) -> Result<accounting_periods::Model, PeriodError> {
        accounting_periods::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PeriodError::NotFound(id))
    }

    /// Finds the period containing a date (half-open interval).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<accounting_periods::Model>, PeriodError> {
        let period = accounting_periods::Entity::find()
            .filter(accounting_periods::Column::StartDate.lte(date))
            .filter(accounting_periods::Column::EndDate.gt(date))
            .one(&self.db)
            .await?;
        Ok(period)
    }

    /// Lists all periods ordered by fiscal year and period number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_periods(&self) -> Result<Vec<accounting_periods::Model>, PeriodError> {
        Ok(accounting_periods::Entity::find()
            .order_by_asc(accounting_periods::Column::FiscalYear)
            .order_by_asc(accounting_periods::Column::PeriodNumber)
            .all(&self.db)
            .await?)
    }

    /// Closes an open period.
    ///
    /// The transition requires that no draft entries remain in the
    /// period. The status flip is a conditional update, so two
    /// concurrent closers resolve to exactly one winner.
    ///
    /// # Errors
    ///
    /// Returns `DraftEntriesRemain` while draft entries exist, or
    /// `InvalidPeriodTransition` when the period is not open.
    pub async fn close(
        &self,
        id: Uuid,
        actor: Option<Uuid>,
    ) -> Result<accounting_periods::Model, PeriodError> {
        let period = self.find_by_id(id).await?;
        let status: PeriodStatus = period.status.clone().into();
        validate_transition(status, PeriodStatus::Closed).map_err(PeriodError::Ledger)?;

        let drafts = journal_entries::Entity::find()
            .filter(journal_entries::Column::AccountingPeriod.eq(id))
            .filter(journal_entries::Column::Status.eq(sea_orm_active_enums::EntryStatus::Draft))
            .count(&self.db)
            .await?;
        if drafts > 0 {
            return Err(PeriodError::Ledger(LedgerError::DraftEntriesRemain {
                count: drafts,
            }));
        }

        let result = accounting_periods::Entity::update_many()
            .col_expr(
                accounting_periods::Column::Status,
                sea_orm_active_enums::PeriodStatus::Closed.as_enum(),
            )
            .col_expr(
                accounting_periods::Column::ClosedAt,
                Expr::value(Utc::now()),
            )
            .col_expr(accounting_periods::Column::ClosedBy, Expr::value(actor))
            .col_expr(
                accounting_periods::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(accounting_periods::Column::Id.eq(id))
            .filter(accounting_periods::Column::Status.eq(sea_orm_active_enums::PeriodStatus::Open))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            // Lost the race: someone else moved the period first.
            let current: PeriodStatus = self.find_by_id(id).await?.status.into();
            return Err(PeriodError::Ledger(LedgerError::InvalidPeriodTransition {
                from: current.as_str(),
                to: PeriodStatus::Closed.as_str(),
            }));
        }

        tracing::info!(period_id = %id, "Accounting period closed");
        self.find_by_id(id).await
    }

    /// Locks a closed period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriodTransition` unless the period is closed.
    pub async fn lock(
        &self,
        id: Uuid,
        actor: Option<Uuid>,
    ) -> Result<accounting_periods::Model, PeriodError> {
        let period = self.find_by_id(id).await?;
        let status: PeriodStatus = period.status.clone().into();
        validate_transition(status, PeriodStatus::Locked).map_err(PeriodError::Ledger)?;

        let result = accounting_periods::Entity::update_many()
            .col_expr(
                accounting_periods::Column::Status,
                sea_orm_active_enums::PeriodStatus::Locked.as_enum(),
            )
            .col_expr(
                accounting_periods::Column::LockedAt,
                Expr::value(Utc::now()),
            )
            .col_expr(accounting_periods::Column::LockedBy, Expr::value(actor))
            .col_expr(
                accounting_periods::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(accounting_periods::Column::Id.eq(id))
            .filter(
                accounting_periods::Column::Status
                    .eq(sea_orm_active_enums::PeriodStatus::Closed),
            )
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            let current: PeriodStatus = self.find_by_id(id).await?.status.into();
            return Err(PeriodError::Ledger(LedgerError::InvalidPeriodTransition {
                from: current.as_str(),
                to: PeriodStatus::Locked.as_str(),
            }));
        }

        tracing::info!(period_id = %id, "Accounting period locked");
        self.find_by_id(id).await
    }

    /// Marks a period as current, clearing every other period's flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the period does not exist.
    pub async fn set_current(&self, id: Uuid) -> Result<accounting_periods::Model, PeriodError> {
        self.find_by_id(id).await?;

        let txn = self.db.begin().await?;

        accounting_periods::Entity::update_many()
            .col_expr(accounting_periods::Column::IsCurrent, Expr::value(false))
            .filter(accounting_periods::Column::IsCurrent.eq(true))
            .exec(&txn)
            .await?;

        accounting_periods::Entity::update_many()
            .col_expr(accounting_periods::Column::IsCurrent, Expr::value(true))
            .filter(accounting_periods::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        self.find_by_id(id).await
    }
}

/// Converts an entity row into the core domain period.
#[must_use]
pub fn to_domain(model: accounting_periods::Model) -> AccountingPeriod {
    AccountingPeriod {
        id: AccountingPeriodId::from_uuid(model.id),
        fiscal_year: model.fiscal_year,
        period_number: model.period_number,
        period_type: model.period_type.into(),
        start_date: model.start_date,
        end_date: model.end_date,
        status: model.status.into(),
        is_current: model.is_current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_half_open_ranges_do_not_overlap_at_boundary() {
        // [Jan, Feb) and [Feb, Mar) share a boundary but do not overlap.
        assert!(!date_ranges_overlap(
            date(2026, 1, 1),
            date(2026, 2, 1),
            date(2026, 2, 1),
            date(2026, 3, 1),
        ));
    }

    #[test]
    fn test_overlapping_ranges_detected() {
        assert!(date_ranges_overlap(
            date(2026, 1, 1),
            date(2026, 2, 15),
            date(2026, 2, 1),
            date(2026, 3, 1),
        ));
        // Containment overlaps too.
        assert!(date_ranges_overlap(
            date(2026, 1, 1),
            date(2026, 12, 31),
            date(2026, 3, 1),
            date(2026, 4, 1),
        ));
    }
}
