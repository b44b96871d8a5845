//! Document (PDF) statement adapter
//!
//! Works on tables already pulled out of the document by a
//! [`TableExtractor`]. Every table's first row is treated as its header.
//! Data rows are read positionally: date, description, ..., signed amount.

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::pdf_text::PdfTextExtractor;
use crate::domain::normalize::{parse_amount, parse_date};
use crate::domain::result::{Error, Result};
use crate::domain::{CategoryRuleSet, TransactionCandidate};
use crate::ports::{DocumentPage, StatementParser, TableExtractor};

/// Minimum cells for a row to be considered a transaction
const MIN_CELLS: usize = 3;

pub struct DocumentStatementParser<E = PdfTextExtractor> {
    extractor: E,
    rules: Arc<CategoryRuleSet>,
}

impl DocumentStatementParser<PdfTextExtractor> {
    pub fn new(rules: Arc<CategoryRuleSet>) -> Self {
        Self::with_extractor(PdfTextExtractor, rules)
    }
}

impl<E: TableExtractor> DocumentStatementParser<E> {
    pub fn with_extractor(extractor: E, rules: Arc<CategoryRuleSet>) -> Self {
        Self { extractor, rules }
    }

    /// Build candidates from extracted pages
    ///
    /// Fails with [`Error::NoTransactionsFound`] when no page yields a
    /// single transaction.
    pub fn parse_pages(&self, pages: &[DocumentPage]) -> Result<Vec<TransactionCandidate>> {
        let mut transactions = Vec::new();
        let mut skipped = 0usize;

        for table in pages.iter().flat_map(|page| page.tables.iter()) {
            for row in table.iter().skip(1) {
                match self.candidate(row) {
                    Some(tx) => transactions.push(tx),
                    None => skipped += 1,
                }
            }
        }

        debug!(
            pages = pages.len(),
            candidates = transactions.len(),
            skipped,
            "parsed document tables"
        );

        if transactions.is_empty() {
            return Err(Error::NoTransactionsFound("PDF".to_string()));
        }
        Ok(transactions)
    }

    fn candidate(&self, row: &[Option<String>]) -> Option<TransactionCandidate> {
        if row.len() < MIN_CELLS {
            return None;
        }

        let date = parse_date(row[0].as_deref())?;
        let description = row[1].as_deref().unwrap_or_default().trim().to_string();
        let amount = parse_amount(row.last()?.as_deref());

        if amount.is_zero() {
            None
        } else if amount > Decimal::ZERO {
            Some(TransactionCandidate::income(date, description, amount))
        } else {
            let category = self.rules.categorize(&description);
            Some(TransactionCandidate::expense(date, description, amount, category))
        }
    }
}

impl<E: TableExtractor> StatementParser for DocumentStatementParser<E> {
    fn parse(&self, path: &Path) -> Result<Vec<TransactionCandidate>> {
        let pages = self.extractor.extract_pages(path)?;
        self.parse_pages(&pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn row(cells: &[Option<&str>]) -> Vec<Option<String>> {
        cells.iter().map(|c| c.map(str::to_string)).collect()
    }

    fn parser() -> DocumentStatementParser {
        DocumentStatementParser::new(CategoryRuleSet::builtin())
    }

    struct FixedTables(Vec<DocumentPage>);

    impl TableExtractor for FixedTables {
        fn extract_pages(&self, _path: &Path) -> Result<Vec<DocumentPage>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_rows_across_pages() {
        let pages = vec![
            DocumentPage {
                tables: vec![vec![
                    row(&[Some("Date"), Some("Description"), Some("Ref"), Some("Amount")]),
                    row(&[Some("2024-04-01"), Some(" TALABAT FOOD "), Some("R1"), Some("-45.00")]),
                    row(&[Some("2024-04-02"), Some("SALARY"), Some("R2"), Some("9,000.00")]),
                ]],
            },
            DocumentPage {
                tables: vec![vec![
                    row(&[Some("Date"), Some("Description"), Some("Amount")]),
                    row(&[Some("03/04/2024"), None, Some("-10")]),
                ]],
            },
        ];
        let txns = parser().parse_pages(&pages).unwrap();
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].description, "TALABAT FOOD");
        assert_eq!(txns[0].category, "Food & Dining");
        assert_eq!(txns[0].amount, Decimal::from(45));
        assert!(txns[1].is_income);
        assert_eq!(txns[1].amount, Decimal::from(9000));
        assert_eq!(txns[2].description, "");
        assert_eq!(txns[2].category, "Other");
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let pages = vec![DocumentPage {
            tables: vec![vec![
                // First row is always the header, even if it looks like data
                row(&[Some("2024-04-01"), Some("HEADER LOOKALIKE"), Some("-1")]),
                row(&[Some("2024-04-01"), Some("TOO SHORT")]),
                row(&[Some("Opening"), Some("BALANCE"), Some("-100")]),
                row(&[Some("2024-04-01"), Some("NO AMOUNT"), None]),
                row(&[Some("2024-04-01"), Some("ZERO"), Some("0.00")]),
                row(&[Some("2024-04-05"), Some("NETFLIX"), Some("-15.99")]),
            ]],
        }];
        let txns = parser().parse_pages(&pages).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].category, "Entertainment");
    }

    #[test]
    fn test_nothing_found_is_an_error() {
        let pages = vec![
            DocumentPage::default(),
            DocumentPage {
                tables: vec![vec![row(&[Some("Date"), Some("Description"), Some("Amount")])]],
            },
        ];
        let err = parser().parse_pages(&pages).unwrap_err();
        assert!(matches!(err, Error::NoTransactionsFound(_)));
        assert_eq!(err.to_string(), "No transactions found in PDF");
    }

    #[test]
    fn test_parse_through_extractor() {
        let extractor = FixedTables(vec![DocumentPage {
            tables: vec![vec![
                row(&[Some("Date"), Some("Description"), Some("Amount")]),
                row(&[Some("2024-04-01"), Some("UBER"), Some("-12.00")]),
            ]],
        }]);
        let parser = DocumentStatementParser::with_extractor(extractor, CategoryRuleSet::builtin());
        let txns = parser.parse(&PathBuf::from("statement.pdf")).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].category, "Transportation");
    }
}
