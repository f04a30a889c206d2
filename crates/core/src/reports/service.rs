//! Report generation service.
//!
//! Each generator reads a registry snapshot and produces an immutable
//! report document. Balances arrive under the ledger's uniform posting
//! convention (debit increases, credit decreases, for every account
//! type), so revenue balances are negative; the income statement re-signs
//! them with `abs()` while the balance sheet copies balances verbatim.

use chrono::Utc;
use rust_decimal::Decimal;

use folio_shared::types::{ReportId, UserId};

use crate::accounts::types::{AccountSubType, AccountType};
use crate::fiscal::period::AccountingPeriod;

use super::error::ReportError;
use super::types::{
    AccountSnapshot, FinancialReport, ReportLine, ReportParameters, ReportStatus, ReportSummary,
    ReportType,
};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Formats a report number: `<prefix>-<fiscalYear>-<periodNumber %02>`.
    #[must_use]
    pub fn report_number(report_type: ReportType, period: &AccountingPeriod) -> String {
        format!(
            "{}-{}-{:02}",
            report_type.number_prefix(),
            period.fiscal_year,
            period.period_number
        )
    }

    /// Generates a balance sheet snapshot.
    ///
    /// Selects active, non-removed asset/liability/equity accounts and
    /// copies each `current_balance` verbatim into the line's ending
    /// balance; per-type sums land in the summary.
    #[must_use]
    pub fn generate_balance_sheet(
        period: &AccountingPeriod,
        accounts: &[AccountSnapshot],
        parameters: ReportParameters,
        generated_by: Option<UserId>,
    ) -> FinancialReport {
        let mut lines = Vec::new();
        let mut order = 1;
        let mut summary = ReportSummary::default();

        for (account_type, label) in [
            (AccountType::Asset, "Total Assets"),
            (AccountType::Liability, "Total Liabilities"),
            (AccountType::Equity, "Total Equity"),
        ] {
            let section = select_accounts(accounts, &parameters, |a| a.account_type == account_type);
            let section_total: Decimal = section.iter().map(|a| a.current_balance).sum();

            for account in &section {
                lines.push(account_line(account, &mut order));
            }
            lines.push(label_line(label, section_total, true, false, &mut order));

            match account_type {
                AccountType::Asset => summary.total_assets = section_total,
                AccountType::Liability => summary.total_liabilities = section_total,
                AccountType::Equity => summary.total_equity = section_total,
                AccountType::Revenue | AccountType::Expense => {}
            }
        }

        lines.push(label_line(
            "Total Liabilities and Equity",
            summary.total_liabilities + summary.total_equity,
            false,
            true,
            &mut order,
        ));

        assemble(
            ReportType::BalanceSheet,
            period,
            lines,
            summary,
            parameters,
            generated_by,
        )
    }

    /// Generates an income statement snapshot.
    ///
    /// Revenue contributes `abs(current_balance)` to total revenue
    /// (revenue balances are negative under the posting convention);
    /// expense contributes its balance directly. Gross profit and
    /// operating income derive from the expense subtypes.
    #[must_use]
    pub fn generate_income_statement(
        period: &AccountingPeriod,
        accounts: &[AccountSnapshot],
        parameters: ReportParameters,
        generated_by: Option<UserId>,
    ) -> FinancialReport {
        let mut lines = Vec::new();
        let mut order = 1;

        let revenue = select_accounts(accounts, &parameters, |a| {
            a.account_type == AccountType::Revenue
        });
        let expenses = select_accounts(accounts, &parameters, |a| {
            a.account_type == AccountType::Expense
        });

        let total_revenue: Decimal = revenue.iter().map(|a| a.current_balance.abs()).sum();
        let total_expenses: Decimal = expenses.iter().map(|a| a.current_balance).sum();
        let cost_of_goods_sold: Decimal = expenses
            .iter()
            .filter(|a| a.account_sub_type == Some(AccountSubType::CostOfGoodsSold))
            .map(|a| a.current_balance)
            .sum();
        let operating_expenses: Decimal = expenses
            .iter()
            .filter(|a| a.account_sub_type == Some(AccountSubType::OperatingExpense))
            .map(|a| a.current_balance)
            .sum();

        let gross_profit = total_revenue - cost_of_goods_sold;
        let operating_income = gross_profit - operating_expenses;
        let net_income = total_revenue - total_expenses;

        for account in &revenue {
            lines.push(account_line(account, &mut order));
        }
        lines.push(label_line("Total Revenue", total_revenue, true, false, &mut order));

        for account in &expenses {
            lines.push(account_line(account, &mut order));
        }
        lines.push(label_line(
            "Total Expenses",
            total_expenses,
            true,
            false,
            &mut order,
        ));
        lines.push(label_line("Net Income", net_income, false, true, &mut order));

        let summary = ReportSummary {
            total_revenue,
            total_expenses,
            net_income,
            gross_profit,
            operating_income,
            ..ReportSummary::default()
        };

        assemble(
            ReportType::IncomeStatement,
            period,
            lines,
            summary,
            parameters,
            generated_by,
        )
    }

    /// Generates a trial balance snapshot.
    ///
    /// Positive balances are net debits, negative balances net credits;
    /// the report is balanced when the two columns agree.
    #[must_use]
    pub fn generate_trial_balance(
        period: &AccountingPeriod,
        accounts: &[AccountSnapshot],
        parameters: ReportParameters,
        generated_by: Option<UserId>,
    ) -> FinancialReport {
        let selected = select_accounts(accounts, &parameters, |_| true);

        let mut lines = Vec::new();
        let mut order = 1;
        let mut debit_total = Decimal::ZERO;
        let mut credit_total = Decimal::ZERO;
        let mut summary = ReportSummary::default();

        for account in &selected {
            let balance = account.current_balance;
            let (debit, credit) = if balance >= Decimal::ZERO {
                (balance, Decimal::ZERO)
            } else {
                (Decimal::ZERO, -balance)
            };
            debit_total += debit;
            credit_total += credit;

            match account.account_type {
                AccountType::Asset => summary.total_assets += balance,
                AccountType::Liability => summary.total_liabilities += balance,
                AccountType::Equity => summary.total_equity += balance,
                AccountType::Revenue => summary.total_revenue += balance.abs(),
                AccountType::Expense => summary.total_expenses += balance,
            }

            let mut line = account_line(account, &mut order);
            line.debit_amount = debit;
            line.credit_amount = credit;
            lines.push(line);
        }

        summary.net_income = summary.total_revenue - summary.total_expenses;

        let mut total = label_line("Totals", Decimal::ZERO, false, true, &mut order);
        total.debit_amount = debit_total;
        total.credit_amount = credit_total;
        total.ending_balance = debit_total - credit_total;
        lines.push(total);

        assemble(
            ReportType::TrialBalance,
            period,
            lines,
            summary,
            parameters,
            generated_by,
        )
    }

    /// Approves a generated report.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the report status is
    /// `generated`.
    pub fn approve(report: &mut FinancialReport, actor: UserId) -> Result<(), ReportError> {
        if report.status != ReportStatus::Generated {
            return Err(ReportError::InvalidTransition {
                from: report.status,
                to: ReportStatus::Approved,
            });
        }
        report.status = ReportStatus::Approved;
        report.approved_at = Some(Utc::now());
        report.approved_by = Some(actor);
        Ok(())
    }

    /// Publishes an approved report.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the report status is
    /// `approved`.
    pub fn publish(report: &mut FinancialReport, actor: UserId) -> Result<(), ReportError> {
        if report.status != ReportStatus::Approved {
            return Err(ReportError::InvalidTransition {
                from: report.status,
                to: ReportStatus::Published,
            });
        }
        report.status = ReportStatus::Published;
        report.published_at = Some(Utc::now());
        report.published_by = Some(actor);
        Ok(())
    }
}

/// Selects and orders the accounts a report section includes.
fn select_accounts<'a, F>(
    accounts: &'a [AccountSnapshot],
    parameters: &ReportParameters,
    predicate: F,
) -> Vec<&'a AccountSnapshot>
where
    F: Fn(&AccountSnapshot) -> bool,
{
    let mut selected: Vec<&AccountSnapshot> = accounts
        .iter()
        .filter(|a| a.is_reportable())
        .filter(|a| !parameters.detail_accounts_only || a.is_detail_account)
        .filter(|a| parameters.include_zero_balance || a.current_balance != Decimal::ZERO)
        .filter(|a| predicate(a))
        .collect();
    selected.sort_by(|a, b| a.account_code.cmp(&b.account_code));
    selected
}

fn account_line(account: &AccountSnapshot, order: &mut i32) -> ReportLine {
    let line = ReportLine {
        account_id: Some(account.id),
        account_code: account.account_code.clone(),
        account_name: account.account_name.clone(),
        opening_balance: account.opening_balance,
        debit_amount: Decimal::ZERO,
        credit_amount: Decimal::ZERO,
        ending_balance: account.current_balance,
        display_order: *order,
        is_sub_total: false,
        is_total: false,
        indent_level: 1,
    };
    *order += 1;
    line
}

fn label_line(
    name: &str,
    amount: Decimal,
    is_sub_total: bool,
    is_total: bool,
    order: &mut i32,
) -> ReportLine {
    let line = ReportLine {
        account_id: None,
        account_code: String::new(),
        account_name: name.to_string(),
        opening_balance: Decimal::ZERO,
        debit_amount: Decimal::ZERO,
        credit_amount: Decimal::ZERO,
        ending_balance: amount,
        display_order: *order,
        is_sub_total,
        is_total,
        indent_level: 0,
    };
    *order += 1;
    line
}

fn assemble(
    report_type: ReportType,
    period: &AccountingPeriod,
    lines: Vec<ReportLine>,
    summary: ReportSummary,
    parameters: ReportParameters,
    generated_by: Option<UserId>,
) -> FinancialReport {
    FinancialReport {
        id: ReportId::new(),
        report_number: ReportService::report_number(report_type, period),
        report_type,
        accounting_period: period.id,
        start_date: period.start_date,
        end_date: period.end_date,
        status: ReportStatus::Generated,
        lines,
        summary,
        parameters,
        generated_at: Utc::now(),
        generated_by,
        approved_at: None,
        approved_by: None,
        published_at: None,
        published_by: None,
    }
}
