//! JSON REST API for the budget ledger.
//!
//! Exposes an axum [`Router`] backed by any [`budget_core::store::BudgetStore`].
//! Range checks on incoming entries happen here, before the store is touched.
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(budget_api::api_router(store.clone()))
//! ```

pub mod authors;
pub mod budget;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use budget_core::store::BudgetStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: BudgetStore + 'static,
{
  Router::new()
    // Authors
    .route("/author/add", post(authors::add::<S>))
    // Budget
    .route("/budget/add", post(budget::add::<S>))
    .route("/budget/year/{year}/stats", get(budget::year_stats::<S>))
    .with_state(store)
}
