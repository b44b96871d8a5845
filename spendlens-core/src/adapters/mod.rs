//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - `csv` for delimited-text statements (`delimited`)
//! - `calamine` for xls/xlsx workbooks
//! - `pdf-extract` text layer for PDF tables
//! - An in-memory store for the storage port

pub mod delimited;
pub mod document;
pub mod memory;
pub mod pdf_text;
pub mod spreadsheet;
mod tabular;

pub use delimited::CsvStatementParser;
pub use document::DocumentStatementParser;
pub use memory::MemoryStore;
pub use pdf_text::PdfTextExtractor;
pub use spreadsheet::SpreadsheetStatementParser;
pub use tabular::{RowsOutcome, TabularRows};
