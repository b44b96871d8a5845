//! Analyze command - upload statements and print the dashboard

use std::path::PathBuf;

use anyhow::{bail, Result};
use colored::Colorize;
use comfy_table::Cell;
use serde::Serialize;
use spendlens_core::services::{Dashboard, UploadReceipt};
use spendlens_core::{StoredTransaction, TransactionFilter};

use super::{declared_type, get_context};
use crate::output;

/// Expenses listed under "Recent Expenses"
const RECENT_EXPENSES: usize = 15;

#[derive(Serialize)]
struct AnalyzeReport {
    uploads: Vec<UploadOutcome>,
    dashboard: Dashboard,
    recent_expenses: Vec<StoredTransaction>,
}

#[derive(Serialize)]
struct UploadOutcome {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<UploadReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(files: &[PathBuf], account: &str, statement: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let mut uploads = Vec::with_capacity(files.len());
    for file in files {
        let declared = declared_type(file, None);
        let result = ctx.upload_service.upload(account, file, &declared, None);
        let (receipt, error) = match result {
            Ok(receipt) => (Some(receipt), None),
            Err(e) => (None, Some(e.to_string())),
        };
        uploads.push(UploadOutcome {
            file: file.display().to_string(),
            receipt,
            error,
        });
    }

    let mut filter = TransactionFilter::account(account);
    if let Some(name) = statement {
        let statements = ctx.store.statements(Some(account))?;
        let Some(found) = statements.iter().find(|s| s.name == name) else {
            bail!("No uploaded statement named '{}'", name);
        };
        filter = filter.with_statement(found.id);
    }

    let report = AnalyzeReport {
        dashboard: ctx.analytics_service.dashboard(&filter)?,
        recent_expenses: ctx.analytics_service.recent_expenses(&filter, RECENT_EXPENSES)?,
        uploads,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_uploads(&report.uploads, &ctx.config.currency);
    print_dashboard(&report.dashboard, &ctx.config.currency);
    print_recent(&report.recent_expenses, &ctx.config.currency);

    Ok(())
}

fn print_uploads(uploads: &[UploadOutcome], currency: &str) {
    for upload in uploads {
        match (&upload.receipt, &upload.error) {
            (Some(receipt), _) => output::success(&format!(
                "{}: {} transactions, {} spent, {} received",
                upload.file,
                receipt.transaction_count,
                output::format_money(currency, receipt.total_amount),
                output::format_money(currency, receipt.total_income),
            )),
            (None, Some(error)) => output::error(&format!("{}: {}", upload.file, error)),
            (None, None) => {}
        }
    }
}

fn print_dashboard(dashboard: &Dashboard, currency: &str) {
    let summary = &dashboard.summary;
    output::heading("Summary");
    let mut table = output::create_table();
    table.add_row(vec![
        Cell::new("Total spending"),
        output::money_cell(currency, summary.total_spending),
    ]);
    table.add_row(vec![
        Cell::new("Total income"),
        output::money_cell(currency, summary.total_income),
    ]);
    table.add_row(vec![Cell::new("Transactions"), Cell::new(summary.total_transactions)]);
    table.add_row(vec![Cell::new("Categories"), Cell::new(summary.total_categories)]);
    println!("{}", table);

    if summary.total_categories == 0 {
        output::warning("No expenses to analyze");
        return;
    }

    for (title, rows) in [
        ("Top Expenses", &dashboard.top_expenses),
        ("Lowest Expenses", &dashboard.lowest_expenses),
    ] {
        output::heading(title);
        let mut table = output::create_table();
        table.set_header(vec!["Category", "Total", "Count"]);
        for row in rows {
            table.add_row(vec![
                Cell::new(&row.category),
                output::money_cell(currency, row.total),
                Cell::new(row.count),
            ]);
        }
        println!("{}", table);
    }

    output::heading("Spending by Day");
    let mut table = output::create_table();
    table.set_header(dashboard.spending_by_day.iter().map(|(day, _)| day).collect::<Vec<_>>());
    table.add_row(
        dashboard
            .spending_by_day
            .iter()
            .map(|(_, total)| output::money_cell(currency, total))
            .collect::<Vec<_>>(),
    );
    println!("{}", table);

    output::heading("Monthly Trend");
    let mut table = output::create_table();
    table.set_header(vec!["Month", "Total"]);
    for month in &dashboard.monthly_trend {
        table.add_row(vec![Cell::new(&month.month), output::money_cell(currency, month.total)]);
    }
    println!("{}", table);

    output::heading("Category Distribution");
    let mut table = output::create_table();
    table.set_header(vec!["Category", "Amount", "Share"]);
    for share in &dashboard.category_distribution {
        table.add_row(vec![
            Cell::new(&share.category),
            output::money_cell(currency, share.amount),
            Cell::new(format!("{}%", share.percentage)),
        ]);
    }
    println!("{}", table);

    if !dashboard.recommendations.is_empty() {
        output::heading("Recommendations");
        for rec in &dashboard.recommendations {
            match &rec.amount {
                Some(amount) => println!("  {} ({}): {}", rec.kind.bold(), amount.green(), rec.message),
                None => println!("  {}: {}", rec.kind.bold(), rec.message),
            }
        }
    }
}

fn print_recent(expenses: &[StoredTransaction], currency: &str) {
    if expenses.is_empty() {
        return;
    }
    output::heading("Recent Expenses");
    let mut table = output::create_table();
    table.set_header(vec!["Date", "Description", "Category", "Amount"]);
    for tx in expenses {
        table.add_row(vec![
            Cell::new(tx.date),
            Cell::new(&tx.description),
            Cell::new(&tx.category),
            output::money_cell(currency, tx.amount),
        ]);
    }
    println!("{}", table);
}
