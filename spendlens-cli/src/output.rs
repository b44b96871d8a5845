//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Print a bold section heading after a blank line
pub fn heading(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Right-aligned money cell
pub fn money_cell(currency: &str, amount: Decimal) -> Cell {
    Cell::new(format_money(currency, amount)).set_alignment(CellAlignment::Right)
}

/// Format an amount with two decimals and the currency prefix
pub fn format_money(currency: &str, amount: Decimal) -> String {
    format!("{}{:.2}", currency, amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("$", Decimal::new(1234, 1)), "$123.40");
        assert_eq!(format_money("QAR ", Decimal::ZERO), "QAR 0.00");
    }
}
