use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::utils::present;

/// A row from the `genres` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i64,
    pub name: Option<String>,
}

/// Genre fields accepted on create and replace; `id` is ignored.
///
/// `name` is `None` when the key is missing and `Some(None)` for `null`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GenreInput {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
}
