//! Error type for `budget-store-sqlite`.

use budget_core::store::StoreError;
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown budget type: {0:?}")]
  UnknownBudgetType(String),

  #[error("stored count is negative: {0}")]
  NegativeCount(i64),
}

impl StoreError for Error {
  fn is_constraint_violation(&self) -> bool {
    matches!(
      self,
      Error::Database(tokio_rusqlite::Error::Rusqlite(
        rusqlite::Error::SqliteFailure(e, _),
      )) if e.code == ErrorCode::ConstraintViolation
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
