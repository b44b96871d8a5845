//! Transaction domain model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category label reserved for income rows
pub const INCOME_CATEGORY: &str = "Income";

/// Category label used when no rule matches
pub const FALLBACK_CATEGORY: &str = "Other";

/// A normalized row extracted from a statement, prior to storage
///
/// `amount` is never negative: whether money came in or went out is
/// carried by `is_income` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCandidate {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub is_income: bool,
}

impl TransactionCandidate {
    /// Money going out, labelled with the categorizer's output
    pub fn expense(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount: amount.abs(),
            category: category.into(),
            is_income: false,
        }
    }

    /// Money coming in, always labelled "Income"
    pub fn income(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            description: description.into(),
            amount: amount.abs(),
            category: INCOME_CATEGORY.to_string(),
            is_income: true,
        }
    }
}

/// A transaction accepted into storage, tied to its statement and account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTransaction {
    pub id: Uuid,
    pub statement_id: Uuid,
    pub account_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub is_income: bool,
    pub created_at: DateTime<Utc>,
}

impl StoredTransaction {
    /// Materialize a candidate under the given statement
    pub fn from_candidate(
        candidate: &TransactionCandidate,
        statement_id: Uuid,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            statement_id,
            account_id: account_id.into(),
            date: candidate.date,
            description: candidate.description.clone(),
            amount: candidate.amount,
            category: candidate.category.clone(),
            is_income: candidate.is_income,
            created_at: Utc::now(),
        }
    }
}
