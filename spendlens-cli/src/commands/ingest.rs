//! Ingest command - parse a single statement without storing it

use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;

use super::{declared_type, get_context};
use crate::output;

/// Rows shown in table output
const PREVIEW_ROWS: usize = 20;

pub fn run(file: &Path, file_type: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let declared = declared_type(file, file_type);
    let batch = ctx.ingest_service.ingest(file, &declared)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    if batch.is_empty() {
        output::warning("No transactions found");
        return Ok(());
    }

    let currency = &ctx.config.currency;
    let mut table = output::create_table();
    table.set_header(vec!["Date", "Description", "Category", "Amount", "Type"]);
    for tx in batch.transactions().iter().take(PREVIEW_ROWS) {
        table.add_row(vec![
            Cell::new(tx.date),
            Cell::new(&tx.description),
            Cell::new(&tx.category),
            output::money_cell(currency, tx.amount),
            Cell::new(if tx.is_income { "income" } else { "expense" }),
        ]);
    }
    println!("{}", table);

    if batch.len() > PREVIEW_ROWS {
        output::info(&format!("... and {} more", batch.len() - PREVIEW_ROWS));
    }

    println!();
    output::success(&format!("{} transactions", batch.len()));
    println!("Expenses: {}", output::format_money(currency, batch.expense_total()));
    println!("Income:   {}", output::format_money(currency, batch.income_total()));

    Ok(())
}
