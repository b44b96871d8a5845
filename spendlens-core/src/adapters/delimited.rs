//! Delimited-text statement adapter
//!
//! The first record is taken as the header; there is no banner-row scan.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::tabular::TabularRows;
use crate::domain::result::{Error, Result};
use crate::domain::schema::resolve_columns;
use crate::domain::{CategoryRuleSet, TransactionCandidate};
use crate::ports::StatementParser;

pub struct CsvStatementParser {
    rules: Arc<CategoryRuleSet>,
}

impl CsvStatementParser {
    pub fn new(rules: Arc<CategoryRuleSet>) -> Self {
        Self { rules }
    }

    /// Parse CSV content from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<TransactionCandidate>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        // Byte records: a Latin-1 export must not lose rows to UTF-8 errors
        let mut records = reader.byte_records();

        let header: Vec<String> = match records.next() {
            Some(record) => decode_fields(&record?)
                .into_iter()
                .map(|h| h.trim_start_matches('\u{feff}').to_string())
                .collect(),
            None => return Err(Error::schema("file is empty, no header row")),
        };
        let layout = resolve_columns(&header)?;
        debug!(?layout, "resolved CSV columns");

        let mut unreadable = 0usize;
        let rows = records.filter_map(|record| match record {
            Ok(record) => Some(decode_fields(&record)),
            Err(_) => {
                unreadable += 1;
                None
            }
        });

        let outcome = TabularRows::new(layout, &self.rules).collect(rows);
        debug!(
            candidates = outcome.transactions.len(),
            skipped = outcome.skipped + unreadable,
            "parsed CSV rows"
        );

        Ok(outcome.transactions)
    }
}

/// Fields as text, with invalid UTF-8 replaced by U+FFFD
fn decode_fields(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

impl StatementParser for CsvStatementParser {
    fn parse(&self, path: &Path) -> Result<Vec<TransactionCandidate>> {
        let file = std::fs::File::open(path)?;
        self.parse_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn parser() -> CsvStatementParser {
        CsvStatementParser::new(CategoryRuleSet::builtin())
    }

    #[test]
    fn test_debit_credit_statement() {
        let csv = "\
Txn Date,Value Date,Description,Ref No./Cheque No.,Debit,Credit,Balance
01/02/2024,01/02/2024,UBER TRIP DOHA,,\"1,050.00\",,9000.00
02/02/2024,02/02/2024,SALARY FEB,,,\"12,000.00\",21000.00
03/02/2024,03/02/2024,ADJUSTMENT,,5.00,7.50,20997.50
Closing balance,,,,,,20997.50
";
        let txns = parser().parse_reader(csv.as_bytes()).unwrap();
        assert_eq!(txns.len(), 4);
        assert_eq!(txns[0].amount, Decimal::new(105000, 2));
        assert_eq!(txns[0].category, "Transportation");
        assert!(txns[1].is_income);
        assert_eq!(txns[1].amount, Decimal::from(12000));
        assert!(!txns[2].is_income);
        assert!(txns[3].is_income);
    }

    #[test]
    fn test_signed_amount_statement() {
        let csv = "\
Transaction Date,Merchant,Amount
2024-03-01,SPOTIFY,-9.99
2024-03-02,REFUND,+20
2024-03-03,AUTH HOLD,0
";
        let txns = parser().parse_reader(csv.as_bytes()).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].category, "Entertainment");
        assert!(txns[1].is_income);
    }

    #[test]
    fn test_header_whitespace_and_bom() {
        let csv = "\u{feff} Date , Details , Amount \n2024-03-01, CAFE NERO ,-4.5\n";
        let txns = parser().parse_reader(csv.as_bytes()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "CAFE NERO");
    }

    #[test]
    fn test_unrecognized_layout() {
        let csv = "Posted,Memo,Value\n2024-03-01,X,1\n";
        let err = parser().parse_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_headers_only_is_empty_success() {
        let csv = "Date,Description,Debit,Credit\n";
        let txns = parser().parse_reader(csv.as_bytes()).unwrap();
        assert!(txns.is_empty());
    }

    #[test]
    fn test_latin1_rows_are_kept() {
        // "É" and "£" encoded as Latin-1
        let mut csv = b"Date,Description,Amount\n2024-03-01,PIZZA CAF".to_vec();
        csv.extend_from_slice(&[0xC9]);
        csv.extend_from_slice(b",-4.50\n2024-03-02,SHOP ");
        csv.extend_from_slice(&[0xA3]);
        csv.extend_from_slice(b"10,-10\n");

        let txns = parser().parse_reader(csv.as_slice()).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].description, "PIZZA CAF\u{FFFD}");
        assert_eq!(txns[0].category, "Food & Dining");
        assert_eq!(txns[0].amount, Decimal::new(450, 2));
        assert_eq!(txns[1].category, "Shopping");
    }

    #[test]
    fn test_empty_file_fails() {
        let err = parser().parse_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }
}
