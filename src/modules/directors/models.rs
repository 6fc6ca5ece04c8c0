use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::utils::present;

/// A row from the `directors` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Director {
    pub id: i64,
    pub name: Option<String>,
}

/// Director fields accepted on create and replace; `id` is ignored.
///
/// `name` is `None` when the key is missing and `Some(None)` for `null`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DirectorInput {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
}
