//! Handlers for `/author` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/author/add` | Body: `{"fullName":"..."}`; returns `{"id","fullName"}` |

use std::sync::Arc;

use axum::{Json, extract::State};
use budget_core::{author::Author, store::BudgetStore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAuthorBody {
  pub full_name: String,
}

/// The author as echoed back to clients; the creation time stays internal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorBody {
  pub id:        Uuid,
  pub full_name: String,
}

impl From<Author> for AuthorBody {
  fn from(a: Author) -> Self {
    AuthorBody {
      id:        a.author_id,
      full_name: a.full_name,
    }
  }
}

/// `POST /author/add`
pub async fn add<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<AddAuthorBody>,
) -> Result<Json<AuthorBody>, ApiError>
where
  S: BudgetStore,
{
  let author = store
    .add_author(body.full_name)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(author_id = %author.author_id, "author added");
  Ok(Json(AuthorBody::from(author)))
}
