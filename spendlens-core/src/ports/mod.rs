//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces the pipeline depends on. Format adapters and
//! the storage collaborator implement them.

mod repository;
mod statement_source;

pub use repository::{StatementStore, TransactionFilter};
pub use statement_source::{DocumentPage, StatementParser, TableExtractor, TableRow};
