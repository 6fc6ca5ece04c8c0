use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::utils::present;

/// A row from the `movies` table.
///
/// `genre_id` and `director_id` are plain references; they are not checked
/// against the `genres` or `directors` tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movie {
    /// Assigned by storage on creation
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Trailer URL
    pub trailer: Option<String>,
    pub year: Option<i64>,
    pub rating: Option<f64>,
    pub genre_id: Option<i64>,
    pub director_id: Option<i64>,
}

/// Movie fields accepted on create and replace.
///
/// A key missing from the body is `None`; an explicit `null` is `Some(None)`.
/// Create stores both as NULL. Replace leaves missing keys unchanged and
/// writes NULL for `null`. An `id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MovieInput {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub trailer: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>)]
    pub year: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>)]
    pub genre_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>)]
    pub director_id: Option<Option<i64>>,
}

/// Query string filters for the movie listing. Supplied filters are ANDed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieFilter {
    pub director_id: Option<i64>,
    pub genre_id: Option<i64>,
}
