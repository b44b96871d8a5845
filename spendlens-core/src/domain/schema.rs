//! Schema resolution for tabular statements
//!
//! Bank exports disagree on column names, casing and how many banner rows
//! sit above the table. The resolver finds the header row and maps the
//! semantic roles a statement needs (date, description, money columns) to
//! concrete column indices.

use std::collections::HashMap;

use super::result::{Error, Result};

const DATE_NAMES: [&str; 4] = ["date", "txn date", "transaction date", "value date"];
const DESCRIPTION_NAMES: [&str; 4] = ["description", "details", "transaction details", "merchant"];
const DEBIT_NAMES: [&str; 1] = ["debit"];
const CREDIT_NAMES: [&str; 1] = ["credit"];
const AMOUNT_NAMES: [&str; 4] = ["amount", "transaction amount", "debit amount", "credit amount"];

/// Cells a row must contain (exactly, after lowercasing) to be the header
const HEADER_MARKERS: [&str; 3] = ["date", "debit", "credit"];

/// How money is laid out in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountLayout {
    /// Separate debit and credit columns; a missing one reads as zero
    Split {
        debit: Option<usize>,
        credit: Option<usize>,
    },
    /// One column whose sign tells income from expense
    Signed { amount: usize },
}

/// Resolved column indices for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: usize,
    pub description: usize,
    pub amounts: AmountLayout,
}

/// Case-insensitive header lookup
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    columns: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new<S: AsRef<str>>(header: &[S]) -> Self {
        let mut columns = HashMap::new();
        for (idx, cell) in header.iter().enumerate() {
            let key = cell.as_ref().trim().to_lowercase();
            if !key.is_empty() {
                // First occurrence of a duplicated name wins
                columns.entry(key).or_insert(idx);
            }
        }
        Self { columns }
    }

    /// Return the left-most column whose name is one of `names`
    pub fn find(&self, names: &[&str]) -> Option<usize> {
        names
            .iter()
            .filter_map(|name| self.columns.get(*name).copied())
            .min()
    }
}

/// Find the header row of a table with leading non-table rows
///
/// Returns the row index of the first row containing the `date`, `debit`
/// and `credit` markers.
pub fn locate_header<S: AsRef<str>>(rows: &[Vec<S>]) -> Option<usize> {
    rows.iter().position(|row| {
        let cells: Vec<String> = row.iter().map(|c| c.as_ref().trim().to_lowercase()).collect();
        HEADER_MARKERS
            .iter()
            .all(|marker| cells.iter().any(|c| c == marker))
    })
}

/// Resolve the semantic columns of a header row
///
/// Debit/credit columns take precedence: if either is present the table is
/// read in split mode. Otherwise a single signed amount column is required.
pub fn resolve_columns<S: AsRef<str>>(header: &[S]) -> Result<ColumnLayout> {
    let index = HeaderIndex::new(header);

    let date = index.find(&DATE_NAMES);
    let description = index.find(&DESCRIPTION_NAMES);
    let debit = index.find(&DEBIT_NAMES);
    let credit = index.find(&CREDIT_NAMES);

    let (Some(date), Some(description)) = (date, description) else {
        return Err(Error::schema(
            "format not recognized, need at least date and description columns",
        ));
    };

    let amounts = if debit.is_some() || credit.is_some() {
        AmountLayout::Split { debit, credit }
    } else {
        let amount = index.find(&AMOUNT_NAMES).ok_or_else(|| {
            Error::schema("format not recognized, required columns: date, description, amount")
        })?;
        AmountLayout::Signed { amount }
    };

    Ok(ColumnLayout {
        date,
        description,
        amounts,
    })
}
