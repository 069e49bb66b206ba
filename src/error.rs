//! Errors for the expense store and its front end.
//!
//! Persistence failures inside [`ExpenseStore`](crate::ExpenseStore) never
//! reach the caller; these variants surface from the backends, the CSV
//! import/export path and record validation.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("record {0} already exists")]
    DuplicateRecord(uuid::Uuid),
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
}
