//! Handlers for `/budget` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/budget/add` | Body: [`BudgetEntryBody`]; echoes the stored entry |
//! | `GET`  | `/budget/year/{year}/stats` | `?limit` and `?offset` required; optional `name` |

use std::{collections::BTreeMap, sync::Arc};

use axum::{
  Json,
  extract::{Path, Query, State},
};
use budget_core::{
  entry::{BudgetEntry, BudgetType, NewBudgetEntry, checked_amount},
  report::{StatsItem, YearStats, YearStatsQuery},
  store::BudgetStore,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// Rendering of an author's creation time in report items.
pub const AUTHOR_CREATED_AT_FORMAT: &str = "%H:%M:%S %d.%m.%Y";

pub fn format_author_created_at(at: DateTime<Utc>) -> String {
  at.format(AUTHOR_CREATED_AT_FORMAT).to_string()
}

// ─── Add ──────────────────────────────────────────────────────────────────────

/// JSON body accepted and returned by `POST /budget/add`.
///
/// `amount` is read wide so that values past 32 bits reach validation
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntryBody {
  pub year:        i32,
  pub month:       u32,
  pub amount:      i64,
  #[serde(rename = "type")]
  pub budget_type: BudgetType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub author_id:   Option<Uuid>,
}

impl TryFrom<BudgetEntryBody> for NewBudgetEntry {
  type Error = budget_core::Error;

  fn try_from(b: BudgetEntryBody) -> Result<Self, Self::Error> {
    let entry = NewBudgetEntry {
      year:        b.year,
      month:       b.month,
      amount:      checked_amount(b.amount)?,
      budget_type: b.budget_type,
      author_id:   b.author_id,
    };
    entry.validate()?;
    Ok(entry)
  }
}

impl From<BudgetEntry> for BudgetEntryBody {
  fn from(e: BudgetEntry) -> Self {
    BudgetEntryBody {
      year:        e.year,
      month:       e.month,
      amount:      i64::from(e.amount),
      budget_type: e.budget_type,
      author_id:   e.author_id,
    }
  }
}

/// `POST /budget/add`
pub async fn add<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<BudgetEntryBody>,
) -> Result<Json<BudgetEntryBody>, ApiError>
where
  S: BudgetStore,
{
  let input = NewBudgetEntry::try_from(body)?;

  let entry = store
    .add_budget_entry(input)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(entry_id = %entry.entry_id, year = entry.year, "budget entry added");
  Ok(Json(BudgetEntryBody::from(entry)))
}

// ─── Year stats ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatsParams {
  pub limit:  usize,
  pub offset: usize,
  /// Case-insensitive author-name filter; blank means no filter.
  pub name:   Option<String>,
}

/// One listed entry. Author fields are omitted for entries without an author.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsItemBody {
  pub year:              i32,
  pub month:             u32,
  pub amount:            i32,
  #[serde(rename = "type")]
  pub budget_type:       BudgetType,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub author_full_name:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub author_created_at: Option<String>,
}

impl From<StatsItem> for StatsItemBody {
  fn from(i: StatsItem) -> Self {
    let (author_full_name, author_created_at) = match i.author {
      Some(a) => (Some(a.full_name), Some(format_author_created_at(a.created_at))),
      None => (None, None),
    };
    StatsItemBody {
      year: i.year,
      month: i.month,
      amount: i.amount,
      budget_type: i.budget_type,
      author_full_name,
      author_created_at,
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStatsBody {
  pub total:         u64,
  pub total_by_type: BTreeMap<BudgetType, i64>,
  pub items:         Vec<StatsItemBody>,
}

impl From<YearStats> for YearStatsBody {
  fn from(s: YearStats) -> Self {
    YearStatsBody {
      total:         s.total,
      total_by_type: s.total_by_type,
      items:         s.items.into_iter().map(StatsItemBody::from).collect(),
    }
  }
}

/// `GET /budget/year/{year}/stats?limit=<n>&offset=<n>[&name=<text>]`
pub async fn year_stats<S>(
  State(store): State<Arc<S>>,
  Path(year): Path<i32>,
  Query(params): Query<StatsParams>,
) -> Result<Json<YearStatsBody>, ApiError>
where
  S: BudgetStore,
{
  let query = YearStatsQuery {
    year,
    limit: params.limit,
    offset: params.offset,
    name: params.name,
  };

  let stats = store
    .year_stats(&query)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(
    year,
    total = stats.total,
    items = stats.items.len(),
    "year stats computed"
  );
  Ok(Json(YearStatsBody::from(stats)))
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn created_at_uses_time_then_day_first_date() {
    let at = Utc.with_ymd_and_hms(2020, 3, 7, 9, 5, 1).unwrap();
    assert_eq!(format_author_created_at(at), "09:05:01 07.03.2020");
  }

  #[test]
  fn entry_body_omits_absent_author() {
    let body = BudgetEntryBody {
      year:        2020,
      month:       1,
      amount:      5,
      budget_type: BudgetType::Income,
      author_id:   None,
    };
    let v = serde_json::to_value(&body).unwrap();
    assert_eq!(v, serde_json::json!({
      "year": 2020, "month": 1, "amount": 5, "type": "Income"
    }));
  }

  #[test]
  fn entry_body_amount_must_fit_in_32_bits() {
    let body = |amount| BudgetEntryBody {
      year: 2020,
      month: 1,
      amount,
      budget_type: BudgetType::Income,
      author_id: None,
    };
    let max = NewBudgetEntry::try_from(body(i64::from(i32::MAX))).unwrap();
    assert_eq!(max.amount, i32::MAX);
    assert!(matches!(
      NewBudgetEntry::try_from(body(2_147_483_648)),
      Err(budget_core::Error::InvalidAmount(2_147_483_648))
    ));
  }
}
