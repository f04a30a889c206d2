//! Report generation tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use folio_shared::types::{AccountId, AccountingPeriodId, UserId};

use crate::accounts::types::{AccountStatus, AccountSubType, AccountType};
use crate::fiscal::period::{AccountingPeriod, PeriodStatus, PeriodType};

use super::error::ReportError;
use super::service::ReportService;
use super::types::{AccountSnapshot, ReportParameters, ReportStatus, ReportType};

fn period() -> AccountingPeriod {
    AccountingPeriod {
        id: AccountingPeriodId::new(),
        fiscal_year: 2026,
        period_number: 3,
        period_type: PeriodType::Monthly,
        start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
        status: PeriodStatus::Open,
        is_current: true,
    }
}

fn snapshot(
    code: &str,
    name: &str,
    account_type: AccountType,
    balance: Decimal,
) -> AccountSnapshot {
    AccountSnapshot {
        id: AccountId::new(),
        account_code: code.to_string(),
        account_name: name.to_string(),
        account_type,
        account_sub_type: None,
        opening_balance: Decimal::ZERO,
        current_balance: balance,
        is_detail_account: true,
        status: AccountStatus::Active,
        removed: false,
    }
}

#[test]
fn test_balance_sheet_aggregation() {
    // Balances carry the ledger's uniform sign convention: the loan was
    // credited, so its stored balance is negative.
    let accounts = vec![
        snapshot("1000", "Cash", AccountType::Asset, dec!(500)),
        snapshot("2000", "Loan", AccountType::Liability, dec!(-1500)),
        snapshot("3000", "Equity", AccountType::Equity, dec!(1000)),
    ];

    let report = ReportService::generate_balance_sheet(
        &period(),
        &accounts,
        ReportParameters::default(),
        None,
    );

    assert_eq!(report.report_number, "BS-2026-03");
    assert_eq!(report.report_type, ReportType::BalanceSheet);
    assert_eq!(report.status, ReportStatus::Generated);
    assert_eq!(report.summary.total_assets, dec!(500));
    assert_eq!(report.summary.total_liabilities, dec!(-1500));
    assert_eq!(report.summary.total_equity, dec!(1000));

    // Account rows copy the balance verbatim into the ending balance.
    let cash = report
        .lines
        .iter()
        .find(|l| l.account_code == "1000")
        .unwrap();
    assert_eq!(cash.ending_balance, dec!(500));

    let loan = report
        .lines
        .iter()
        .find(|l| l.account_code == "2000")
        .unwrap();
    assert_eq!(loan.ending_balance, dec!(-1500));
}

#[test]
fn test_balance_sheet_skips_zero_balances_by_default() {
    let accounts = vec![
        snapshot("1000", "Cash", AccountType::Asset, dec!(500)),
        snapshot("1100", "Petty Cash", AccountType::Asset, Decimal::ZERO),
    ];

    let report = ReportService::generate_balance_sheet(
        &period(),
        &accounts,
        ReportParameters::default(),
        None,
    );
    assert!(!report.lines.iter().any(|l| l.account_code == "1100"));

    let report = ReportService::generate_balance_sheet(
        &period(),
        &accounts,
        ReportParameters {
            include_zero_balance: true,
            ..ReportParameters::default()
        },
        None,
    );
    assert!(report.lines.iter().any(|l| l.account_code == "1100"));
}

#[test]
fn test_balance_sheet_excludes_inactive_and_removed() {
    let mut inactive = snapshot("1200", "Old Cash", AccountType::Asset, dec!(100));
    inactive.status = AccountStatus::Inactive;
    let mut removed = snapshot("1300", "Gone", AccountType::Asset, dec!(100));
    removed.removed = true;

    let report = ReportService::generate_balance_sheet(
        &period(),
        &[inactive, removed],
        ReportParameters::default(),
        None,
    );

    assert!(report.lines.iter().all(|l| l.account_id.is_none()));
    assert_eq!(report.summary.total_assets, Decimal::ZERO);
}

#[test]
fn test_income_statement_resigns_revenue() {
    // Revenue is credited under the posting convention, so its stored
    // balance is negative; the report compensates with abs().
    let accounts = vec![
        snapshot("4000", "Sales", AccountType::Revenue, dec!(-1000)),
        snapshot("5000", "Rent", AccountType::Expense, dec!(400)),
    ];

    let report = ReportService::generate_income_statement(
        &period(),
        &accounts,
        ReportParameters::default(),
        None,
    );

    assert_eq!(report.report_number, "IS-2026-03");
    assert_eq!(report.summary.total_revenue, dec!(1000));
    assert_eq!(report.summary.total_expenses, dec!(400));
    assert_eq!(report.summary.net_income, dec!(600));

    // Line rows stay verbatim; only the summary re-signs.
    let sales = report
        .lines
        .iter()
        .find(|l| l.account_code == "4000")
        .unwrap();
    assert_eq!(sales.ending_balance, dec!(-1000));
}

#[test]
fn test_income_statement_gross_and_operating_income() {
    let mut cogs = snapshot("5100", "COGS", AccountType::Expense, dec!(300));
    cogs.account_sub_type = Some(AccountSubType::CostOfGoodsSold);
    let mut opex = snapshot("5200", "Salaries", AccountType::Expense, dec!(200));
    opex.account_sub_type = Some(AccountSubType::OperatingExpense);
    let other = snapshot("5300", "Interest", AccountType::Expense, dec!(50));

    let accounts = vec![
        snapshot("4000", "Sales", AccountType::Revenue, dec!(-1000)),
        cogs,
        opex,
        other,
    ];

    let report = ReportService::generate_income_statement(
        &period(),
        &accounts,
        ReportParameters::default(),
        None,
    );

    assert_eq!(report.summary.total_revenue, dec!(1000));
    assert_eq!(report.summary.gross_profit, dec!(700));
    assert_eq!(report.summary.operating_income, dec!(500));
    assert_eq!(report.summary.total_expenses, dec!(550));
    assert_eq!(report.summary.net_income, dec!(450));
}

#[test]
fn test_trial_balance_columns_and_totals() {
    let accounts = vec![
        snapshot("1000", "Cash", AccountType::Asset, dec!(1000)),
        snapshot("4000", "Sales", AccountType::Revenue, dec!(-1000)),
    ];

    let report = ReportService::generate_trial_balance(
        &period(),
        &accounts,
        ReportParameters::default(),
        None,
    );

    assert_eq!(report.report_number, "TB-2026-03");

    let cash = report
        .lines
        .iter()
        .find(|l| l.account_code == "1000")
        .unwrap();
    assert_eq!(cash.debit_amount, dec!(1000));
    assert_eq!(cash.credit_amount, Decimal::ZERO);

    let sales = report
        .lines
        .iter()
        .find(|l| l.account_code == "4000")
        .unwrap();
    assert_eq!(sales.debit_amount, Decimal::ZERO);
    assert_eq!(sales.credit_amount, dec!(1000));

    let totals = report.lines.iter().find(|l| l.is_total).unwrap();
    assert_eq!(totals.debit_amount, dec!(1000));
    assert_eq!(totals.credit_amount, dec!(1000));
    assert_eq!(totals.ending_balance, Decimal::ZERO);
}

#[test]
fn test_detail_accounts_only_filter() {
    let mut header = snapshot("1000", "Assets", AccountType::Asset, dec!(100));
    header.is_detail_account = false;
    let detail = snapshot("1010", "Cash", AccountType::Asset, dec!(100));

    let report = ReportService::generate_trial_balance(
        &period(),
        &[header, detail],
        ReportParameters {
            detail_accounts_only: true,
            ..ReportParameters::default()
        },
        None,
    );

    assert!(report.lines.iter().any(|l| l.account_code == "1010"));
    assert!(!report.lines.iter().any(|l| l.account_code == "1000"));
}

#[test]
fn test_report_lifecycle_transitions() {
    let mut report = ReportService::generate_balance_sheet(
        &period(),
        &[snapshot("1000", "Cash", AccountType::Asset, dec!(1))],
        ReportParameters::default(),
        None,
    );
    let actor = UserId::new();

    // Publishing before approval is rejected.
    assert!(matches!(
        ReportService::publish(&mut report, actor),
        Err(ReportError::InvalidTransition {
            from: ReportStatus::Generated,
            ..
        })
    ));

    ReportService::approve(&mut report, actor).unwrap();
    assert_eq!(report.status, ReportStatus::Approved);
    assert_eq!(report.approved_by, Some(actor));
    assert!(report.approved_at.is_some());

    // Approving twice is rejected.
    assert!(matches!(
        ReportService::approve(&mut report, actor),
        Err(ReportError::InvalidTransition {
            from: ReportStatus::Approved,
            ..
        })
    ));

    ReportService::publish(&mut report, actor).unwrap();
    assert_eq!(report.status, ReportStatus::Published);
    assert!(report.published_at.is_some());
}

#[test]
fn test_report_number_padding() {
    let mut p = period();
    p.period_number = 11;
    assert_eq!(
        ReportService::report_number(ReportType::IncomeStatement, &p),
        "IS-2026-11"
    );
    p.period_number = 4;
    assert_eq!(
        ReportService::report_number(ReportType::TrialBalance, &p),
        "TB-2026-04"
    );
}
