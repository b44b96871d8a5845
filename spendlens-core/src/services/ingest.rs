//! Ingest service - dispatch a statement file to its format adapter

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::adapters::{
    CsvStatementParser, DocumentStatementParser, PdfTextExtractor, SpreadsheetStatementParser,
};
use crate::domain::result::{Error, Result};
use crate::domain::{CategoryRuleSet, FileKind, StatementBatch, TransactionCandidate};
use crate::ports::{StatementParser, TableExtractor};

/// Turns one uploaded file into a categorized, totalled batch
pub struct IngestService {
    rules: Arc<CategoryRuleSet>,
    table_extractor: Arc<dyn TableExtractor + Send + Sync>,
}

impl IngestService {
    pub fn new(rules: Arc<CategoryRuleSet>) -> Self {
        Self {
            rules,
            table_extractor: Arc::new(PdfTextExtractor),
        }
    }

    /// Replace the PDF table extractor
    pub fn with_table_extractor(mut self, extractor: Arc<dyn TableExtractor + Send + Sync>) -> Self {
        self.table_extractor = extractor;
        self
    }

    pub fn rules(&self) -> &CategoryRuleSet {
        &self.rules
    }

    /// Parse a statement file declared as `declared_type`
    ///
    /// The declared type is matched case-insensitively: `csv`, `xls`/`xlsx`,
    /// and anything else is read as a document.
    pub fn ingest(&self, path: &Path, declared_type: &str) -> Result<StatementBatch> {
        let kind = FileKind::from_declared(declared_type);
        if kind == FileKind::Document && !FileKind::is_known_tag(declared_type) {
            warn!(declared_type, "unrecognized file type, reading it as a document");
        }
        debug!(format = %kind, "ingesting statement");

        let candidates = self
            .parser_for(kind)
            .parse(path)
            .map_err(|e| Error::ingestion(kind.label(), e))?;

        let parsed = candidates.len();
        let accepted: Vec<TransactionCandidate> =
            candidates.into_iter().filter_map(coerce_amount).collect();
        let batch = StatementBatch::new(accepted);

        info!(
            format = %kind,
            transactions = batch.len(),
            rejected = parsed - batch.len(),
            "statement ingested"
        );
        Ok(batch)
    }

    fn parser_for(&self, kind: FileKind) -> Box<dyn StatementParser + '_> {
        let rules = Arc::clone(&self.rules);
        match kind {
            FileKind::Delimited => Box::new(CsvStatementParser::new(rules)),
            FileKind::Spreadsheet => Box::new(SpreadsheetStatementParser::new(rules)),
            FileKind::Document => Box::new(DocumentStatementParser::with_extractor(
                Arc::clone(&self.table_extractor),
                rules,
            )),
        }
    }
}

/// Bring a candidate's amount into canonical form, or reject it
///
/// Negative amounts would carry sign outside `is_income` and are dropped.
fn coerce_amount(mut candidate: TransactionCandidate) -> Option<TransactionCandidate> {
    if candidate.amount < Decimal::ZERO {
        return None;
    }
    candidate.amount = candidate.amount.normalize();
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{DocumentPage, TableRow};
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    struct NoTables;

    impl TableExtractor for NoTables {
        fn extract_pages(&self, _path: &Path) -> Result<Vec<DocumentPage>> {
            Ok(vec![DocumentPage::default()])
        }
    }

    struct OneTable;

    impl TableExtractor for OneTable {
        fn extract_pages(&self, _path: &Path) -> Result<Vec<DocumentPage>> {
            let row = |cells: &[&str]| -> TableRow {
                cells.iter().map(|c| Some(c.to_string())).collect()
            };
            Ok(vec![DocumentPage {
                tables: vec![vec![
                    row(&["Date", "Description", "Amount"]),
                    row(&["2024-06-01", "AMAZON", "-20"]),
                ]],
            }])
        }
    }

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn service() -> IngestService {
        IngestService::new(CategoryRuleSet::builtin())
    }

    #[test]
    fn test_csv_totals() {
        let file = write_temp(
            "Date,Description,Debit,Credit\n\
             2024-06-01,UBER,50,\n\
             2024-06-02,SALARY,,100\n\
             2024-06-03,CAFE,25.5,\n",
        );
        let batch = service().ingest(file.path(), "CSV").unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.expense_total(), Decimal::new(755, 1));
        assert_eq!(batch.income_total(), Decimal::from(100));
    }

    #[test]
    fn test_empty_csv_is_empty_success() {
        let file = write_temp("Date,Description,Amount\nnot-a-date,X,-1\n");
        let batch = service().ingest(file.path(), "csv").unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.expense_total(), Decimal::ZERO);
    }

    #[test]
    fn test_schema_failure_is_wrapped() {
        let file = write_temp("Foo,Bar\n1,2\n");
        let err = service().ingest(file.path(), "csv").unwrap_err();
        assert!(err.to_string().starts_with("Error parsing CSV:"));
        assert!(matches!(err.root(), Error::Schema(_)));
    }

    #[test]
    fn test_unknown_type_goes_to_document_adapter() {
        let file = write_temp("irrelevant");
        let svc = service().with_table_extractor(Arc::new(OneTable));
        let batch = svc.ingest(file.path(), "ofx").unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.transactions()[0].category, "Shopping");
    }

    #[test]
    fn test_empty_document_is_fatal() {
        let file = write_temp("irrelevant");
        let svc = service().with_table_extractor(Arc::new(NoTables));
        let err = svc.ingest(file.path(), "PDF").unwrap_err();
        assert!(matches!(err.root(), Error::NoTransactionsFound(_)));
    }

    #[test]
    fn test_negative_candidates_are_rejected() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut bad = TransactionCandidate::expense(date, "X", Decimal::ONE, "Other");
        bad.amount = Decimal::NEGATIVE_ONE;
        assert!(coerce_amount(bad).is_none());

        let good = TransactionCandidate::expense(date, "X", Decimal::new(1000, 2), "Other");
        assert_eq!(coerce_amount(good).unwrap().amount, Decimal::from(10));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = service()
            .ingest(Path::new("/definitely/not/here.csv"), "csv")
            .unwrap_err();
        assert!(matches!(err.root(), Error::Io(_)));
    }
}
