//! Authors that budget entries may be attributed to.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered author. Created once; never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
  pub author_id:  Uuid,
  pub full_name:  String,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}
