//! Core domain entities
//!
//! Pure data structures and the total functions that build them. No I/O
//! happens in this module.

pub mod category;
pub mod normalize;
pub mod result;
pub mod schema;
mod statement;
mod transaction;

pub use category::{CategoryRule, CategoryRuleSet};
pub use statement::{FileKind, NewStatement, Statement, StatementBatch};
pub use transaction::{StoredTransaction, TransactionCandidate, FALLBACK_CATEGORY, INCOME_CATEGORY};
