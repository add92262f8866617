//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Budget types are stored as their tag.

use budget_core::{
  entry::BudgetType,
  report::{ItemAuthor, StatsItem},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── BudgetType
// ───────────────────────────────────────────────────────────────

pub fn encode_budget_type(t: BudgetType) -> &'static str { t.tag() }

pub fn decode_budget_type(s: &str) -> Result<BudgetType> {
  s.parse()
    .map_err(|_| Error::UnknownBudgetType(s.to_owned()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawStatsItem::from_row`], for a `budget_entries e`
/// row left-joined with `authors a`.
pub const STATS_ITEM_COLUMNS: &str =
  "e.year, e.month, e.amount, e.type, a.full_name, a.created_at";

/// Raw values read directly from a `budget_entries` row joined with its
/// author.
pub struct RawStatsItem {
  pub year:              i32,
  pub month:             u32,
  pub amount:            i32,
  pub budget_type:       String,
  // authors join
  pub author_full_name:  Option<String>,
  pub author_created_at: Option<String>,
}

impl RawStatsItem {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      year:              row.get(0)?,
      month:             row.get(1)?,
      amount:            row.get(2)?,
      budget_type:       row.get(3)?,
      author_full_name:  row.get(4)?,
      author_created_at: row.get(5)?,
    })
  }

  pub fn into_item(self) -> Result<StatsItem> {
    let author = if let (Some(full_name), Some(at_str)) =
      (self.author_full_name, self.author_created_at)
    {
      Some(ItemAuthor {
        full_name,
        created_at: decode_dt(&at_str)?,
      })
    } else {
      None
    };

    Ok(StatsItem {
      year: self.year,
      month: self.month,
      amount: self.amount,
      budget_type: decode_budget_type(&self.budget_type)?,
      author,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn datetime_survives_storage_encoding() {
    let dt = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
    assert_eq!(decode_dt(&encode_dt(dt)).unwrap(), dt);
  }

  #[test]
  fn unknown_budget_type_is_an_error() {
    assert!(matches!(
      decode_budget_type("Приход"),
      Err(Error::UnknownBudgetType(_))
    ));
  }

  #[test]
  fn row_without_author_has_no_author() {
    let raw = RawStatsItem {
      year:              2020,
      month:             1,
      amount:            100,
      budget_type:       "Income".to_owned(),
      author_full_name:  None,
      author_created_at: None,
    };
    let item = raw.into_item().unwrap();
    assert!(item.author.is_none());
    assert_eq!(item.budget_type, BudgetType::Income);
  }
}
