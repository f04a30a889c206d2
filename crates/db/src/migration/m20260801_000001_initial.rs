//! Initial database migration.
//!
//! Creates the ledger enums, tables, and indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(CHART_OF_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: ACCOUNTING PERIODS
        // ============================================================
        db.execute_unprepared(ACCOUNTING_PERIODS_SQL).await?;

        // ============================================================
        // PART 4: JOURNAL ENTRIES & LINES
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_LINES_SQL).await?;

        // ============================================================
        // PART 5: FINANCIAL REPORTS
        // ============================================================
        db.execute_unprepared(FINANCIAL_REPORTS_SQL).await?;
        db.execute_unprepared(REPORT_LINES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account types
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'revenue',
    'expense'
);

-- Account subtypes
CREATE TYPE account_sub_type AS ENUM (
    'current_asset',
    'fixed_asset',
    'other_asset',
    'current_liability',
    'long_term_liability',
    'owner_equity',
    'retained_earnings',
    'operating_revenue',
    'other_revenue',
    'cost_of_goods_sold',
    'operating_expense',
    'other_expense'
);

-- Normal balance side
CREATE TYPE normal_balance AS ENUM ('debit', 'credit');

-- Account status
CREATE TYPE account_status AS ENUM ('active', 'inactive', 'archived');

-- Accounting period granularity
CREATE TYPE period_type AS ENUM ('monthly', 'quarterly', 'annually');

-- Accounting period status
CREATE TYPE period_status AS ENUM ('open', 'closed', 'locked');

-- Journal entry status
CREATE TYPE entry_status AS ENUM ('draft', 'posted', 'reversed', 'cancelled');

-- Journal entry classification
CREATE TYPE entry_type AS ENUM ('manual', 'automatic', 'adjustment', 'closing');

-- Journal entry source document kind
CREATE TYPE source_type AS ENUM (
    'invoice',
    'payment',
    'project',
    'inventory',
    'manual',
    'other'
);

-- Financial report type
CREATE TYPE report_type AS ENUM (
    'balance_sheet',
    'income_statement',
    'cash_flow',
    'trial_balance',
    'general_ledger'
);

-- Financial report status
CREATE TYPE report_status AS ENUM ('draft', 'generated', 'approved', 'published');
";

const CHART_OF_ACCOUNTS_SQL: &str = r"
CREATE TABLE chart_of_accounts (
    id UUID PRIMARY KEY,
    account_code VARCHAR(32) NOT NULL,
    account_name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    account_sub_type account_sub_type,
    normal_balance normal_balance NOT NULL,
    opening_balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    current_balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    parent_account UUID REFERENCES chart_of_accounts(id),
    level INTEGER NOT NULL DEFAULT 1,
    is_detail_account BOOLEAN NOT NULL DEFAULT TRUE,
    allow_manual_entry BOOLEAN NOT NULL DEFAULT TRUE,
    status account_status NOT NULL DEFAULT 'active',
    removed BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Account codes are unique among non-removed accounts only.
CREATE UNIQUE INDEX idx_chart_of_accounts_code
    ON chart_of_accounts(account_code)
    WHERE removed = FALSE;

CREATE INDEX idx_chart_of_accounts_parent ON chart_of_accounts(parent_account);
CREATE INDEX idx_chart_of_accounts_type ON chart_of_accounts(account_type);
";

const ACCOUNTING_PERIODS_SQL: &str = r"
CREATE TABLE accounting_periods (
    id UUID PRIMARY KEY,
    fiscal_year INTEGER NOT NULL,
    period_number INTEGER NOT NULL,
    period_type period_type NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    status period_status NOT NULL DEFAULT 'open',
    is_current BOOLEAN NOT NULL DEFAULT FALSE,
    closed_at TIMESTAMPTZ,
    closed_by UUID,
    locked_at TIMESTAMPTZ,
    locked_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT chk_period_dates CHECK (start_date < end_date),
    CONSTRAINT uq_period_number UNIQUE (fiscal_year, period_number)
);

-- At most one current period system-wide.
CREATE UNIQUE INDEX idx_accounting_periods_current
    ON accounting_periods(is_current)
    WHERE is_current = TRUE;

CREATE INDEX idx_accounting_periods_dates ON accounting_periods(start_date, end_date);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    entry_number VARCHAR(64) NOT NULL UNIQUE,
    transaction_date DATE NOT NULL,
    posting_date DATE,
    entry_type entry_type NOT NULL,
    source_type source_type NOT NULL,
    source_document UUID,
    accounting_period UUID NOT NULL REFERENCES accounting_periods(id),
    total_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    status entry_status NOT NULL DEFAULT 'draft',
    is_posted BOOLEAN NOT NULL DEFAULT FALSE,
    posted_at TIMESTAMPTZ,
    posted_by UUID,
    reversal_of UUID REFERENCES journal_entries(id),
    reversed_by UUID REFERENCES journal_entries(id),
    reversal_reason TEXT,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_journal_entries_period ON journal_entries(accounting_period);
CREATE INDEX idx_journal_entries_status ON journal_entries(status);
CREATE INDEX idx_journal_entries_date ON journal_entries(transaction_date);
";

const JOURNAL_LINES_SQL: &str = r"
CREATE TABLE journal_lines (
    id UUID PRIMARY KEY,
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    line_number INTEGER NOT NULL,
    debit_account UUID REFERENCES chart_of_accounts(id),
    credit_account UUID REFERENCES chart_of_accounts(id),
    amount NUMERIC(19, 4) NOT NULL,
    description TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT chk_line_amount CHECK (amount > 0),
    -- Exactly one side per line.
    CONSTRAINT chk_line_side CHECK (
        (debit_account IS NOT NULL) <> (credit_account IS NOT NULL)
    )
);

CREATE INDEX idx_journal_lines_entry ON journal_lines(journal_entry_id);
CREATE INDEX idx_journal_lines_debit ON journal_lines(debit_account);
CREATE INDEX idx_journal_lines_credit ON journal_lines(credit_account);
";

const FINANCIAL_REPORTS_SQL: &str = r"
CREATE TABLE financial_reports (
    id UUID PRIMARY KEY,
    report_number VARCHAR(64) NOT NULL,
    report_type report_type NOT NULL,
    accounting_period UUID NOT NULL REFERENCES accounting_periods(id),
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    status report_status NOT NULL DEFAULT 'generated',
    parameters JSONB NOT NULL DEFAULT '{}',
    total_assets NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total_liabilities NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total_equity NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total_revenue NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total_expenses NUMERIC(19, 4) NOT NULL DEFAULT 0,
    net_income NUMERIC(19, 4) NOT NULL DEFAULT 0,
    gross_profit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    operating_income NUMERIC(19, 4) NOT NULL DEFAULT 0,
    generated_at TIMESTAMPTZ NOT NULL,
    generated_by UUID,
    approved_at TIMESTAMPTZ,
    approved_by UUID,
    published_at TIMESTAMPTZ,
    published_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_financial_reports_period ON financial_reports(accounting_period);
CREATE INDEX idx_financial_reports_number ON financial_reports(report_number);
";

const REPORT_LINES_SQL: &str = r"
CREATE TABLE report_lines (
    id UUID PRIMARY KEY,
    report_id UUID NOT NULL REFERENCES financial_reports(id) ON DELETE CASCADE,
    account_id UUID,
    account_code VARCHAR(32) NOT NULL DEFAULT '',
    account_name VARCHAR(255) NOT NULL,
    opening_balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    debit_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    credit_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    ending_balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    display_order INTEGER NOT NULL,
    is_sub_total BOOLEAN NOT NULL DEFAULT FALSE,
    is_total BOOLEAN NOT NULL DEFAULT FALSE,
    indent_level INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX idx_report_lines_report ON report_lines(report_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS report_lines;
DROP TABLE IF EXISTS financial_reports;
DROP TABLE IF EXISTS journal_lines;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS accounting_periods;
DROP TABLE IF EXISTS chart_of_accounts;
DROP TYPE IF EXISTS report_status;
DROP TYPE IF EXISTS report_type;
DROP TYPE IF EXISTS source_type;
DROP TYPE IF EXISTS entry_type;
DROP TYPE IF EXISTS entry_status;
DROP TYPE IF EXISTS period_status;
DROP TYPE IF EXISTS period_type;
DROP TYPE IF EXISTS account_status;
DROP TYPE IF EXISTS normal_balance;
DROP TYPE IF EXISTS account_sub_type;
DROP TYPE IF EXISTS account_type;
";
