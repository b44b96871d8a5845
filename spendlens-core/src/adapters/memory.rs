//! In-memory statement store
//!
//! Stands in for the persistence layer: one process, no durability. A single
//! mutex guards statements and transactions together, so a batch is either
//! fully visible or not at all.

use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{NewStatement, Statement, StatementBatch, StoredTransaction};
use crate::ports::{StatementStore, TransactionFilter};

#[derive(Debug, Default)]
struct State {
    statements: Vec<Statement>,
    transactions: Vec<StoredTransaction>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))
    }
}

impl StatementStore for MemoryStore {
    fn create_statement(&self, statement: NewStatement) -> Result<Statement> {
        let statement = Statement::open(statement);
        self.lock()?.statements.push(statement.clone());
        Ok(statement)
    }

    fn record_batch(&self, statement_id: Uuid, batch: &StatementBatch) -> Result<Statement> {
        let mut state = self.lock()?;

        let statement = state
            .statements
            .iter_mut()
            .find(|s| s.id == statement_id)
            .ok_or_else(|| Error::not_found(format!("statement {}", statement_id)))?;
        if statement.processed {
            return Err(Error::storage(format!(
                "statement {} already has transactions",
                statement_id
            )));
        }

        statement.total_amount = batch.expense_total();
        statement.processed = true;
        let updated = statement.clone();

        let stored = batch
            .transactions()
            .iter()
            .map(|tx| StoredTransaction::from_candidate(tx, statement_id, updated.account_id.clone()));
        state.transactions.extend(stored);

        Ok(updated)
    }

    fn discard_statement(&self, statement_id: Uuid) -> Result<()> {
        let mut state = self.lock()?;
        let before = state.statements.len();
        state.statements.retain(|s| s.id != statement_id);
        if state.statements.len() == before {
            return Err(Error::not_found(format!("statement {}", statement_id)));
        }
        state.transactions.retain(|t| t.statement_id != statement_id);
        Ok(())
    }

    fn statements(&self, account_id: Option<&str>) -> Result<Vec<Statement>> {
        let state = self.lock()?;
        let mut statements: Vec<Statement> = state
            .statements
            .iter()
            .filter(|s| account_id.map_or(true, |a| s.account_id == a))
            .cloned()
            .collect();
        // Newest first
        statements.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(statements)
    }

    fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<StoredTransaction>> {
        let state = self.lock()?;
        let mut transactions: Vec<StoredTransaction> = state
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        // Newest first
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }
}
