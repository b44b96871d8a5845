//! PDF table extraction from the text layer
//!
//! Text is pulled with `pdf-extract`; pages are separated by form feeds.
//! A table is a run of consecutive lines that split into at least two
//! columns, where columns are separated by two or more spaces or a tab.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::result::{Error, Result};
use crate::ports::{DocumentPage, TableExtractor, TableRow};

/// Fewest columns for a line to count as part of a table
const MIN_COLUMNS: usize = 2;

fn column_gap_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\t+|\s{2,}").expect("valid column gap regex"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TableExtractor for PdfTextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<DocumentPage>> {
        let text = pdf_extract::extract_text(path)
            .map_err(|e| Error::UnreadableSource(format!("cannot read PDF text: {}", e)))?;
        Ok(pages_from_text(&text))
    }
}

/// Split extracted text into pages and pages into tables
pub fn pages_from_text(text: &str) -> Vec<DocumentPage> {
    text.split('\u{000C}')
        .filter(|page| !page.trim().is_empty())
        .map(|page| DocumentPage {
            tables: tables_from_page(page),
        })
        .collect()
}

fn tables_from_page(page: &str) -> Vec<Vec<TableRow>> {
    let mut tables = Vec::new();
    let mut current: Vec<TableRow> = Vec::new();

    for line in page.lines() {
        let cells = split_columns(line);
        if cells.len() >= MIN_COLUMNS {
            current.push(cells);
        } else if !current.is_empty() {
            tables.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tables.push(current);
    }

    tables
}

fn split_columns(line: &str) -> TableRow {
    column_gap_re()
        .split(line.trim())
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(|cell| Some(cell.to_string()))
        .collect()
}
