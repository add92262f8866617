//! Budget entries: immutable financial line items for a given month.
//!
//! Entries are append-only: the ledger never updates or deletes a row once it
//! has been recorded.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Bounds ──────────────────────────────────────────────────────────────────

pub const MIN_YEAR: i32 = 1900;
pub const MIN_MONTH: u32 = 1;
pub const MAX_MONTH: u32 = 12;
pub const MIN_AMOUNT: i32 = 1;
pub const MAX_AMOUNT: i32 = i32::MAX;

// ─── BudgetType ──────────────────────────────────────────────────────────────

/// The category of a budget entry.
///
/// The variant name doubles as the wire tag and the value stored in the
/// `type` column, so renaming a variant is a breaking change.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum BudgetType {
  Income,
  Expense,
  Commission,
}

impl BudgetType {
  /// The tag used on the wire and in the `type` column.
  pub fn tag(self) -> &'static str { self.into() }
}

/// Narrow an amount received as a wide integer, rejecting anything outside
/// `MIN_AMOUNT..=MAX_AMOUNT`.
pub fn checked_amount(amount: i64) -> Result<i32> {
  i32::try_from(amount)
    .ok()
    .filter(|a| (MIN_AMOUNT..=MAX_AMOUNT).contains(a))
    .ok_or(Error::InvalidAmount(amount))
}

// ─── BudgetEntry ─────────────────────────────────────────────────────────────

/// A stored budget entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetEntry {
  pub entry_id:    Uuid,
  pub year:        i32,
  pub month:       u32,
  pub amount:      i32,
  pub budget_type: BudgetType,
  /// The linked author, if any. The store's foreign key guarantees it exists.
  pub author_id:   Option<Uuid>,
}

// ─── NewBudgetEntry ──────────────────────────────────────────────────────────

/// Input to [`crate::store::BudgetStore::add_budget_entry`].
/// `entry_id` is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudgetEntry {
  pub year:        i32,
  pub month:       u32,
  pub amount:      i32,
  pub budget_type: BudgetType,
  pub author_id:   Option<Uuid>,
}

impl NewBudgetEntry {
  /// Check the field ranges accepted at the boundary.
  ///
  /// The author reference is not checked here; a dangling id is rejected by
  /// the store on insert.
  pub fn validate(&self) -> Result<()> {
    if self.year < MIN_YEAR {
      return Err(Error::InvalidYear(self.year));
    }
    if !(MIN_MONTH..=MAX_MONTH).contains(&self.month) {
      return Err(Error::InvalidMonth(self.month));
    }
    checked_amount(i64::from(self.amount))?;
    Ok(())
  }

  /// Attach the store-assigned id, producing the persisted form.
  pub fn into_entry(self, entry_id: Uuid) -> BudgetEntry {
    BudgetEntry {
      entry_id,
      year: self.year,
      month: self.month,
      amount: self.amount,
      budget_type: self.budget_type,
      author_id: self.author_id,
    }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  fn entry(year: i32, month: u32, amount: i32) -> NewBudgetEntry {
    NewBudgetEntry {
      year,
      month,
      amount,
      budget_type: BudgetType::Income,
      author_id: None,
    }
  }

  #[test]
  fn accepts_boundary_values() {
    assert!(entry(1900, 1, 1).validate().is_ok());
    assert!(entry(2024, 12, i32::MAX).validate().is_ok());
  }

  #[test]
  fn rejects_year_before_1900() {
    assert!(matches!(
      entry(1899, 6, 10).validate(),
      Err(Error::InvalidYear(1899))
    ));
  }

  #[test]
  fn rejects_month_out_of_range() {
    assert!(matches!(
      entry(2020, 0, 10).validate(),
      Err(Error::InvalidMonth(0))
    ));
    assert!(matches!(
      entry(2020, 13, 10).validate(),
      Err(Error::InvalidMonth(13))
    ));
  }

  #[test]
  fn rejects_non_positive_amount() {
    assert!(matches!(
      entry(2020, 5, 0).validate(),
      Err(Error::InvalidAmount(0))
    ));
    assert!(matches!(
      entry(2020, 5, -3).validate(),
      Err(Error::InvalidAmount(-3))
    ));
  }

  #[test]
  fn checked_amount_keeps_to_32_bits() {
    assert_eq!(checked_amount(1).unwrap(), 1);
    assert_eq!(checked_amount(i64::from(i32::MAX)).unwrap(), i32::MAX);
    assert!(matches!(
      checked_amount(i64::from(i32::MAX) + 1),
      Err(Error::InvalidAmount(2_147_483_648))
    ));
    assert!(matches!(
      checked_amount(i64::MAX),
      Err(Error::InvalidAmount(i64::MAX))
    ));
    assert!(matches!(checked_amount(0), Err(Error::InvalidAmount(0))));
  }

  #[test]
  fn budget_type_tags_round_trip_through_strings() {
    for t in BudgetType::iter() {
      assert_eq!(t.tag().parse::<BudgetType>().unwrap(), t);
      assert_eq!(t.to_string(), t.tag());
      assert_eq!(serde_json::to_value(t).unwrap(), t.tag());
    }
    assert!("Refund".parse::<BudgetType>().is_err());
  }
}
