//! Storage port - the boundary to the statement/transaction store

use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::{NewStatement, Statement, StatementBatch, StoredTransaction};

/// Optional pre-filters applied before analytics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub account_id: Option<String>,
    pub statement_id: Option<Uuid>,
}

impl TransactionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            statement_id: None,
        }
    }

    pub fn with_statement(mut self, statement_id: Uuid) -> Self {
        self.statement_id = Some(statement_id);
        self
    }

    pub fn matches(&self, tx: &StoredTransaction) -> bool {
        self.account_id.as_ref().map_or(true, |a| &tx.account_id == a)
            && self.statement_id.map_or(true, |s| tx.statement_id == s)
    }
}

/// Statement and transaction storage
///
/// `record_batch` must be all-or-nothing: either every transaction of the
/// batch is stored together with the statement totals, or nothing is.
pub trait StatementStore: Send + Sync {
    /// Open an unprocessed statement shell
    fn create_statement(&self, statement: NewStatement) -> Result<Statement>;

    /// Store a parsed batch under its statement and mark it processed
    ///
    /// The statement's `total_amount` becomes the batch expense total.
    fn record_batch(&self, statement_id: Uuid, batch: &StatementBatch) -> Result<Statement>;

    /// Remove a statement shell and anything stored under it
    fn discard_statement(&self, statement_id: Uuid) -> Result<()>;

    /// Statements, optionally limited to one account
    fn statements(&self, account_id: Option<&str>) -> Result<Vec<Statement>>;

    /// Stored transactions matching the filter
    fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<StoredTransaction>>;
}
