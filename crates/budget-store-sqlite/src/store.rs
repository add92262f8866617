//! [`SqliteStore`], the SQLite implementation of [`BudgetStore`].

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use budget_core::{
  author::Author,
  entry::{BudgetEntry, NewBudgetEntry},
  report::{apply_name_filter, sum_by_type, NameFilter, YearStats, YearStatsQuery},
  store::BudgetStore,
};

use crate::{
  encode::{encode_budget_type, encode_dt, encode_uuid, RawStatsItem, STATS_ITEM_COLUMNS},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A budget ledger backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Everything one report transaction reads, before decoding.
struct RawYearStats {
  total: i64,
  year:  Vec<RawStatsItem>,
  page:  Vec<RawStatsItem>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests and demos.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Run `sql` and decode every row as a [`RawStatsItem`].
fn select_items(
  conn: &rusqlite::Connection,
  sql: &str,
  params: impl rusqlite::Params,
) -> rusqlite::Result<Vec<RawStatsItem>> {
  let mut stmt = conn.prepare(sql)?;
  let rows = stmt
    .query_map(params, RawStatsItem::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

// ─── BudgetStore impl ────────────────────────────────────────────────────────

impl BudgetStore for SqliteStore {
  type Error = Error;

  // ── Authors ───────────────────────────────────────────────────────────────

  async fn add_author(&self, full_name: String) -> Result<Author> {
    let author = Author {
      author_id: Uuid::new_v4(),
      full_name,
      created_at: Utc::now(),
    };

    let id_str   = encode_uuid(author.author_id);
    let name     = author.full_name.clone();
    let at_str   = encode_dt(author.created_at);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO authors (id, full_name, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name, at_str],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(author)
  }

  // ── Entries ───────────────────────────────────────────────────────────────

  async fn add_budget_entry(&self, input: NewBudgetEntry) -> Result<BudgetEntry> {
    let entry = input.into_entry(Uuid::new_v4());

    let id_str        = encode_uuid(entry.entry_id);
    let author_id_str = entry.author_id.map(encode_uuid);
    let type_str      = encode_budget_type(entry.budget_type);
    let (year, month, amount) = (entry.year, entry.month, entry.amount);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO budget_entries (id, year, month, amount, type, author_id)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, year, month, amount, type_str, author_id_str],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(entry)
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  async fn year_stats(&self, query: &YearStatsQuery) -> Result<YearStats> {
    let year       = query.year;
    let limit_val  = i64::try_from(query.limit).unwrap_or(i64::MAX);
    let offset_val = i64::try_from(query.offset).unwrap_or(i64::MAX);

    // The count, the whole year and the page are three independent reads of
    // the same base selection. Only the page is ordered and limited.
    let raw: RawYearStats = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let total: i64 = tx.query_row(
          "SELECT COUNT(*) FROM budget_entries WHERE year = ?1",
          rusqlite::params![year],
          |r| r.get(0),
        )?;

        let year_rows = select_items(
          &tx,
          &format!(
            "SELECT {STATS_ITEM_COLUMNS}
             FROM budget_entries e
             LEFT JOIN authors a ON a.id = e.author_id
             WHERE e.year = ?1"
          ),
          rusqlite::params![year],
        )?;

        let page_rows = select_items(
          &tx,
          &format!(
            "SELECT {STATS_ITEM_COLUMNS}
             FROM budget_entries e
             LEFT JOIN authors a ON a.id = e.author_id
             WHERE e.year = ?1
             ORDER BY e.month ASC, e.amount DESC
             LIMIT ?2 OFFSET ?3"
          ),
          rusqlite::params![year, limit_val, offset_val],
        )?;

        tx.commit()?;
        Ok(RawYearStats { total, year: year_rows, page: page_rows })
      })
      .await?;

    let filter = NameFilter::new(query.name.as_deref());

    let year_items = raw
      .year
      .into_iter()
      .map(RawStatsItem::into_item)
      .collect::<Result<Vec<_>>>()?;
    let filtered = apply_name_filter(year_items, filter.as_ref());

    let page_items = raw
      .page
      .into_iter()
      .map(RawStatsItem::into_item)
      .collect::<Result<Vec<_>>>()?;
    let items = apply_name_filter(page_items, filter.as_ref());

    Ok(YearStats {
      total: u64::try_from(raw.total).map_err(|_| Error::NegativeCount(raw.total))?,
      total_by_type: sum_by_type(&filtered),
      items,
    })
  }
}
