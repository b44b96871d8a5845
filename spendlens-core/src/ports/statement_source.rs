//! Statement source ports

use std::path::Path;

use crate::domain::result::Result;
use crate::domain::TransactionCandidate;

/// A format adapter: turns one statement file into transaction candidates
///
/// Rows that fail to normalize are dropped by the adapter. An `Err` means
/// the file as a whole could not be understood.
pub trait StatementParser {
    fn parse(&self, path: &Path) -> Result<Vec<TransactionCandidate>>;
}

/// One extracted table row; `None` marks a cell the extractor saw as empty
pub type TableRow = Vec<Option<String>>;

/// Tables found on a single document page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPage {
    pub tables: Vec<Vec<TableRow>>,
}

/// Extracts tabular regions from a document, page by page
pub trait TableExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<DocumentPage>>;
}

impl<T: TableExtractor + ?Sized> TableExtractor for std::sync::Arc<T> {
    fn extract_pages(&self, path: &Path) -> Result<Vec<DocumentPage>> {
        (**self).extract_pages(path)
    }
}
