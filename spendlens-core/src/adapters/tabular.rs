//! Row normalization shared by the delimited-text and spreadsheet adapters

use rust_decimal::Decimal;

use crate::domain::normalize::{parse_amount, parse_date};
use crate::domain::schema::{AmountLayout, ColumnLayout};
use crate::domain::{CategoryRuleSet, TransactionCandidate};

/// Turns data rows of a resolved table into candidates
pub struct TabularRows<'a> {
    layout: ColumnLayout,
    rules: &'a CategoryRuleSet,
}

impl<'a> TabularRows<'a> {
    pub fn new(layout: ColumnLayout, rules: &'a CategoryRuleSet) -> Self {
        Self { layout, rules }
    }

    /// Normalize every row, dropping the ones that yield nothing
    pub fn collect<I, R, S>(&self, rows: I) -> RowsOutcome
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut outcome = RowsOutcome::default();
        for row in rows {
            let produced = self.candidates(row.as_ref());
            if produced.is_empty() {
                outcome.skipped += 1;
            }
            outcome.transactions.extend(produced);
        }
        outcome
    }

    /// Candidates for a single row: none, one, or (split mode) two
    pub fn candidates<S: AsRef<str>>(&self, row: &[S]) -> Vec<TransactionCandidate> {
        let Some(date) = parse_date(cell(row, Some(self.layout.date))) else {
            return Vec::new();
        };
        let description = cell(row, Some(self.layout.description))
            .unwrap_or_default()
            .trim()
            .to_string();

        match self.layout.amounts {
            AmountLayout::Split { debit, credit } => {
                let debit = parse_amount(cell(row, debit));
                let credit = parse_amount(cell(row, credit));

                let mut out = Vec::with_capacity(2);
                if debit > Decimal::ZERO {
                    let category = self.rules.categorize(&description);
                    out.push(TransactionCandidate::expense(date, description.clone(), debit, category));
                }
                if credit > Decimal::ZERO {
                    out.push(TransactionCandidate::income(date, description, credit));
                }
                out
            }
            AmountLayout::Signed { amount } => {
                let amount = parse_amount(cell(row, Some(amount)));
                if amount.is_zero() {
                    return Vec::new();
                }
                if amount > Decimal::ZERO {
                    vec![TransactionCandidate::income(date, description, amount)]
                } else {
                    let category = self.rules.categorize(&description);
                    vec![TransactionCandidate::expense(date, description, amount, category)]
                }
            }
        }
    }
}

/// Candidates from a table plus how many rows produced none
#[derive(Debug, Default)]
pub struct RowsOutcome {
    pub transactions: Vec<TransactionCandidate>,
    pub skipped: usize,
}

/// A cell by index; out-of-range and unmapped columns read as missing
fn cell<S: AsRef<str>>(row: &[S], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i)).map(|s| s.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::resolve_columns;
    use chrono::NaiveDate;

    fn split_layout() -> ColumnLayout {
        resolve_columns(&["Date", "Description", "Debit", "Credit"]).unwrap()
    }

    fn signed_layout() -> ColumnLayout {
        resolve_columns(&["Date", "Description", "Amount"]).unwrap()
    }

    #[test]
    fn test_split_debit_only() {
        let rules = CategoryRuleSet::default();
        let rows = TabularRows::new(split_layout(), &rules);
        let out = rows.candidates(&["2024-01-10", "UBER TRIP", "50", "0"]);
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_income);
        assert_eq!(out[0].amount, Decimal::from(50));
        assert_eq!(out[0].category, "Transportation");
        assert_eq!(out[0].date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn test_split_credit_only() {
        let rules = CategoryRuleSet::default();
        let rows = TabularRows::new(split_layout(), &rules);
        let out = rows.candidates(&["2024-01-10", "SALARY", "", "100"]);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_income);
        assert_eq!(out[0].amount, Decimal::from(100));
        assert_eq!(out[0].category, "Income");
    }

    #[test]
    fn test_split_both_sides_yield_two() {
        let rules = CategoryRuleSet::default();
        let rows = TabularRows::new(split_layout(), &rules);
        let out = rows.candidates(&["2024-01-10", "REFUND CAFE", "50", "100"]);
        assert_eq!(out.len(), 2);
        assert!(!out[0].is_income);
        assert_eq!(out[0].amount, Decimal::from(50));
        assert_eq!(out[0].category, "Food & Dining");
        assert!(out[1].is_income);
        assert_eq!(out[1].amount, Decimal::from(100));
    }

    #[test]
    fn test_split_missing_credit_column_reads_zero() {
        let rules = CategoryRuleSet::default();
        let layout = resolve_columns(&["Date", "Details", "Debit"]).unwrap();
        let rows = TabularRows::new(layout, &rules);
        let out = rows.candidates(&["2024-01-10", "NETFLIX", "15.99"]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, "Entertainment");
    }

    #[test]
    fn test_signed_negative_is_expense() {
        let rules = CategoryRuleSet::default();
        let rows = TabularRows::new(signed_layout(), &rules);
        let out = rows.candidates(&["2024-02-01", "WOQOD FUEL", "-25.50"]);
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_income);
        assert_eq!(out[0].amount, Decimal::new(2550, 2));
        assert_eq!(out[0].category, "Transportation");
    }

    #[test]
    fn test_signed_positive_is_income() {
        let rules = CategoryRuleSet::default();
        let rows = TabularRows::new(signed_layout(), &rules);
        let out = rows.candidates(&["2024-02-01", "UBER REFUND", "+25.50"]);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_income);
        assert_eq!(out[0].amount, Decimal::new(2550, 2));
        assert_eq!(out[0].category, "Income");
    }

    #[test]
    fn test_signed_zero_is_skipped() {
        let rules = CategoryRuleSet::default();
        let rows = TabularRows::new(signed_layout(), &rules);
        assert!(rows.candidates(&["2024-02-01", "PENDING", "0.00"]).is_empty());
        assert!(rows.candidates(&["2024-02-01", "PENDING", "NaN"]).is_empty());
    }

    #[test]
    fn test_bad_rows_are_isolated() {
        let rules = CategoryRuleSet::default();
        let rows = TabularRows::new(signed_layout(), &rules);
        let data: Vec<Vec<&str>> = vec![
            vec!["not a date", "X", "-1"],
            vec!["2024-02-01", "Short row"],
            vec![],
            vec!["2024-02-02", "PIZZA HUT", "-12"],
        ];
        let outcome = rows.collect(data);
        assert_eq!(outcome.transactions.len(), 1);
        assert_eq!(outcome.skipped, 3);
        assert_eq!(outcome.transactions[0].category, "Food & Dining");
    }
}
