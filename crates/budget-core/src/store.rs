//! The `BudgetStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `budget-store-sqlite`).
//! The HTTP layer (`budget-api`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  author::Author,
  entry::{BudgetEntry, NewBudgetEntry},
  report::{YearStats, YearStatsQuery},
};

/// Errors surfaced by a [`BudgetStore`] backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// Whether the backend rejected a write because it broke a schema
  /// constraint, e.g. an entry referencing an author that does not exist.
  fn is_constraint_violation(&self) -> bool;
}

/// Abstraction over a budget ledger backend.
///
/// Every method is one unit of work: a backend runs all of its statements in
/// a single transaction and either returns a complete result or fails
/// without partial effects.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait BudgetStore: Send + Sync {
  type Error: StoreError;

  // ── Authors ───────────────────────────────────────────────────────────

  /// Persist a new author. `created_at` is stamped by the store.
  fn add_author(
    &self,
    full_name: String,
  ) -> impl Future<Output = Result<Author, Self::Error>> + Send + '_;

  // ── Entries ───────────────────────────────────────────────────────────

  /// Persist a budget entry exactly as given and return it with its new id.
  ///
  /// The author reference is not pre-checked; a dangling `author_id` fails
  /// with an error for which [`StoreError::is_constraint_violation`] holds.
  fn add_budget_entry(
    &self,
    input: NewBudgetEntry,
  ) -> impl Future<Output = Result<BudgetEntry, Self::Error>> + Send + '_;

  // ── Reports ───────────────────────────────────────────────────────────

  /// Build the yearly report for `query.year`.
  ///
  /// - `total` counts all entries of the year, ignoring `query.name`.
  /// - `total_by_type` sums the name-filtered entries of the whole year.
  /// - `items` pages the unfiltered year (month asc, amount desc) with
  ///   `limit`/`offset` and only then applies the name filter, so a page can
  ///   come back short or empty.
  fn year_stats<'a>(
    &'a self,
    query: &'a YearStatsQuery,
  ) -> impl Future<Output = Result<YearStats, Self::Error>> + Send + 'a;
}
