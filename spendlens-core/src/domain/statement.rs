//! Statement domain model

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::TransactionCandidate;

/// Source format of an uploaded statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Comma-separated text with a header row
    Delimited,
    /// Excel workbook (xls / xlsx)
    Spreadsheet,
    /// PDF or any other document
    Document,
}

impl FileKind {
    /// Map a declared type tag to a format, case-insensitively.
    ///
    /// Unknown tags fall back to [`FileKind::Document`].
    pub fn from_declared(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "csv" => Self::Delimited,
            "xls" | "xlsx" => Self::Spreadsheet,
            _ => Self::Document,
        }
    }

    /// True for the declared type tags the pipeline recognizes
    pub fn is_known_tag(tag: &str) -> bool {
        matches!(tag.trim().to_lowercase().as_str(), "csv" | "xls" | "xlsx" | "pdf")
    }

    /// Short name used in messages ("CSV", "Excel", "PDF")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delimited => "CSV",
            Self::Spreadsheet => "Excel",
            Self::Document => "PDF",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The normalized output of one uploaded file
///
/// Totals are derived from the candidates on construction and cannot be set
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementBatch {
    transactions: Vec<TransactionCandidate>,
    expense_total: Decimal,
    income_total: Decimal,
}

impl StatementBatch {
    pub fn new(transactions: Vec<TransactionCandidate>) -> Self {
        let mut expense_total = Decimal::ZERO;
        let mut income_total = Decimal::ZERO;
        for tx in &transactions {
            if tx.is_income {
                income_total += tx.amount;
            } else {
                expense_total += tx.amount;
            }
        }
        Self {
            transactions,
            expense_total,
            income_total,
        }
    }

    pub fn transactions(&self) -> &[TransactionCandidate] {
        &self.transactions
    }

    pub fn expense_total(&self) -> Decimal {
        self.expense_total
    }

    pub fn income_total(&self) -> Decimal {
        self.income_total
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Fields needed to open a statement shell before parsing
#[derive(Debug, Clone)]
pub struct NewStatement {
    pub account_id: String,
    pub name: String,
    pub file_type: String,
}

/// An uploaded statement as held by the storage collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub id: Uuid,
    pub account_id: String,
    /// User-facing label, defaults to the file name
    pub name: String,
    pub file_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub processed: bool,
    /// Expense total only; income is never part of the headline figure
    pub total_amount: Decimal,
}

impl Statement {
    pub fn open(new: NewStatement) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id: new.account_id,
            name: new.name,
            file_type: new.file_type,
            uploaded_at: Utc::now(),
            processed: false,
            total_amount: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_declared_types() {
        assert_eq!(FileKind::from_declared("CSV"), FileKind::Delimited);
        assert_eq!(FileKind::from_declared("xls"), FileKind::Spreadsheet);
        assert_eq!(FileKind::from_declared("XLSX"), FileKind::Spreadsheet);
        assert_eq!(FileKind::from_declared("pdf"), FileKind::Document);
        // Unknown tags are treated as documents
        assert_eq!(FileKind::from_declared("ofx"), FileKind::Document);
        assert!(!FileKind::is_known_tag("ofx"));
        assert!(FileKind::is_known_tag(" Pdf "));
    }

    #[test]
    fn test_batch_totals_are_derived() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let batch = StatementBatch::new(vec![
            TransactionCandidate::expense(date, "A", Decimal::new(5000, 2), "Other"),
            TransactionCandidate::expense(date, "B", Decimal::new(1250, 2), "Other"),
            TransactionCandidate::income(date, "C", Decimal::new(10000, 2)),
        ]);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.expense_total(), Decimal::new(6250, 2));
        assert_eq!(batch.income_total(), Decimal::new(10000, 2));
    }

    #[test]
    fn test_empty_batch() {
        let batch = StatementBatch::new(Vec::new());
        assert!(batch.is_empty());
        assert_eq!(batch.expense_total(), Decimal::ZERO);
        assert_eq!(batch.income_total(), Decimal::ZERO);
    }
}
