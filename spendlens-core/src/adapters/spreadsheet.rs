//! Spreadsheet statement adapter (xls / xlsx)
//!
//! Bank workbooks usually carry account details above the table, so the
//! header row is searched for instead of assumed.

use std::path::Path;
use std::sync::Arc;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, TimeDelta};
use tracing::debug;

use super::tabular::TabularRows;
use crate::domain::result::{Error, Result};
use crate::domain::schema::{locate_header, resolve_columns};
use crate::domain::{CategoryRuleSet, TransactionCandidate};
use crate::ports::StatementParser;

pub struct SpreadsheetStatementParser {
    rules: Arc<CategoryRuleSet>,
}

impl SpreadsheetStatementParser {
    pub fn new(rules: Arc<CategoryRuleSet>) -> Self {
        Self { rules }
    }

    /// Parse the rows of the first worksheet, rendered as text
    pub fn parse_rows(&self, rows: &[Vec<String>]) -> Result<Vec<TransactionCandidate>> {
        let header_idx = locate_header(rows)
            .ok_or_else(|| Error::schema("could not find table header row in spreadsheet"))?;
        debug!(header_row = header_idx, "located spreadsheet header");

        let layout = resolve_columns(&rows[header_idx])?;
        let outcome = TabularRows::new(layout, &self.rules).collect(&rows[header_idx + 1..]);
        debug!(
            candidates = outcome.transactions.len(),
            skipped = outcome.skipped,
            "parsed spreadsheet rows"
        );

        Ok(outcome.transactions)
    }
}

impl StatementParser for SpreadsheetStatementParser {
    fn parse(&self, path: &Path) -> Result<Vec<TransactionCandidate>> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| Error::UnreadableSource(format!("cannot open workbook: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::UnreadableSource("workbook has no worksheets".to_string()))?
            .map_err(|e| Error::UnreadableSource(format!("cannot read first worksheet: {}", e)))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        self.parse_rows(&rows)
    }
}

/// Render a cell the way the normalizers expect to read it
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) => s.split('T').next().unwrap_or_default().to_string(),
        other => other.to_string(),
    }
}

/// Largest serial Excel can display (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Excel serial date, 1899-12-30 based
fn excel_serial_to_date(v: f64) -> Option<NaiveDate> {
    if !v.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&v) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(TimeDelta::try_days(v.floor() as i64)?)
}
