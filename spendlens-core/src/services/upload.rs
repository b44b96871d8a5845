//! Upload service - statement shell, ingestion and storage as one flow

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::ingest::IngestService;
use crate::domain::result::Result;
use crate::domain::NewStatement;
use crate::ports::StatementStore;

/// What the caller learns about a processed statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadReceipt {
    pub statement_id: Uuid,
    pub message: String,
    pub transaction_count: usize,
    /// Expense total; income is reported separately
    pub total_amount: Decimal,
    pub total_income: Decimal,
}

pub struct UploadService {
    store: Arc<dyn StatementStore>,
    ingest: Arc<IngestService>,
}

impl UploadService {
    pub fn new(store: Arc<dyn StatementStore>, ingest: Arc<IngestService>) -> Self {
        Self { store, ingest }
    }

    /// Register a statement for `account_id` and fill it from `path`
    ///
    /// `name` defaults to the file name. If ingestion or storage fails the
    /// statement is discarded, so no half-processed statement survives.
    pub fn upload(
        &self,
        account_id: &str,
        path: &Path,
        file_type: &str,
        name: Option<&str>,
    ) -> Result<UploadReceipt> {
        let name = match name {
            Some(n) => n.to_string(),
            None => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        };

        let statement = self.store.create_statement(NewStatement {
            account_id: account_id.to_string(),
            name,
            file_type: file_type.to_lowercase(),
        })?;

        let recorded = self
            .ingest
            .ingest(path, file_type)
            .and_then(|batch| {
                self.store
                    .record_batch(statement.id, &batch)
                    .map(|_| batch)
            });

        match recorded {
            Ok(batch) => {
                info!(
                    statement_id = %statement.id,
                    transactions = batch.len(),
                    "statement processed"
                );
                Ok(UploadReceipt {
                    statement_id: statement.id,
                    message: "Statement processed successfully".to_string(),
                    transaction_count: batch.len(),
                    total_amount: batch.expense_total(),
                    total_income: batch.income_total(),
                })
            }
            Err(e) => {
                warn!(statement_id = %statement.id, error = %e, "upload failed, discarding statement");
                if let Err(discard_err) = self.store.discard_statement(statement.id) {
                    warn!(statement_id = %statement.id, error = %discard_err, "could not discard statement");
                }
                Err(e)
            }
        }
    }
}
