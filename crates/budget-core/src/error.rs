//! Error types for `budget-core`.

use thiserror::Error;

use crate::entry::{MAX_AMOUNT, MAX_MONTH, MIN_AMOUNT, MIN_MONTH, MIN_YEAR};

#[derive(Debug, Error)]
pub enum Error {
  #[error("year must be at least {min}, got {0}", min = MIN_YEAR)]
  InvalidYear(i32),

  #[error(
    "month must be between {min} and {max}, got {0}",
    min = MIN_MONTH,
    max = MAX_MONTH
  )]
  InvalidMonth(u32),

  #[error(
    "amount must be between {min} and {max}, got {0}",
    min = MIN_AMOUNT,
    max = MAX_AMOUNT
  )]
  InvalidAmount(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
