//! Spendlens Core - bank statement ingestion and spending analytics
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Transactions, statements, value normalizers, column schema
//!   resolution and the keyword categorizer
//! - **ports**: Trait definitions for statement sources and storage
//! - **services**: Ingestion, upload and dashboard orchestration
//! - **adapters**: Concrete implementations (CSV, Excel, PDF, in-memory store)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::MemoryStore;
use config::Config;
use ports::StatementStore;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{
    CategoryRule, CategoryRuleSet, FileKind, Statement, StatementBatch, StoredTransaction,
    TransactionCandidate,
};
pub use ports::TransactionFilter;
pub use services::{Dashboard, UploadReceipt};

/// Main context for Spendlens operations
///
/// Holds the configuration, the active rule table, the statement store and
/// every service wired against them.
pub struct SpendlensContext {
    pub config: Config,
    pub rules: Arc<CategoryRuleSet>,
    pub store: Arc<dyn StatementStore>,
    pub ingest_service: Arc<IngestService>,
    pub upload_service: UploadService,
    pub analytics_service: AnalyticsService,
}

impl SpendlensContext {
    /// Create a context backed by a fresh in-memory store
    pub fn new(spendlens_dir: &Path) -> Result<Self> {
        let config = Config::load(spendlens_dir)?;
        Ok(Self::with_store(config, Arc::new(MemoryStore::new())))
    }

    /// Create a context over an existing store
    pub fn with_store(config: Config, store: Arc<dyn StatementStore>) -> Self {
        let rules = config.rule_set();

        let ingest_service = Arc::new(IngestService::new(Arc::clone(&rules)));
        let upload_service = UploadService::new(Arc::clone(&store), Arc::clone(&ingest_service));
        let analytics_service = AnalyticsService::new(
            Arc::clone(&store),
            AnalyticsEngine::new(config.currency.clone()),
        );

        Self {
            config,
            rules,
            store,
            ingest_service,
            upload_service,
            analytics_service,
        }
    }
}
