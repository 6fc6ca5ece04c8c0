//! Queries against the `movies` table.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use super::models::{Movie, MovieFilter, MovieInput};
use crate::utils::page_offset;

/// Column list for `movies` queries.
const MOVIE_COLUMNS: &str =
    "id, title, description, trailer, year, rating, genre_id, director_id";

/// Fixed page size of the movie listing.
pub const PAGE_SIZE: i64 = 5;

pub const CREATE_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS movies (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        title TEXT, \
        description TEXT, \
        trailer TEXT, \
        year INTEGER, \
        rating REAL, \
        genre_id INTEGER, \
        director_id INTEGER\
    )";

pub struct MovieRepo;

impl MovieRepo {
    /// One page of movies matching every supplied filter, ordered by id.
    ///
    /// A page past the end is empty, not an error.
    pub async fn list_page(
        pool: &SqlitePool,
        filter: &MovieFilter,
        page: i64,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE 1 = 1"
        ));

        if let Some(director_id) = filter.director_id {
            qb.push(" AND director_id = ").push_bind(director_id);
        }
        if let Some(genre_id) = filter.genre_id {
            qb.push(" AND genre_id = ").push_bind(genre_id);
        }

        qb.push(" ORDER BY id LIMIT ")
            .push_bind(PAGE_SIZE)
            .push(" OFFSET ")
            .push_bind(page_offset(page, PAGE_SIZE));

        qb.build_query_as::<Movie>().fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await
    }

    /// Insert a movie and return its generated id.
    pub async fn insert(conn: &mut SqliteConnection, input: &MovieInput) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO movies (title, description, trailer, year, rating, genre_id, director_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(input.title.clone().flatten())
        .bind(input.description.clone().flatten())
        .bind(input.trailer.clone().flatten())
        .bind(input.year.flatten())
        .bind(input.rating.flatten())
        .bind(input.genre_id.flatten())
        .bind(input.director_id.flatten())
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite the fields present in `input`, writing NULL for an explicit
    /// `null`; returns the number of rows matched.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        input: &MovieInput,
    ) -> Result<u64, sqlx::Error> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE movies SET ");

        {
            let mut assignments = qb.separated(", ");
            let mut touched = false;

            macro_rules! assign {
                ($($field:ident),+) => {$(
                    if let Some(value) = &input.$field {
                        assignments
                            .push(concat!(stringify!($field), " = "))
                            .push_bind_unseparated(value.clone());
                        touched = true;
                    }
                )+};
            }

            assign!(title, description, trailer, year, rating, genre_id, director_id);

            // Nothing to change still has to match the row.
            if !touched {
                assignments.push("id = id");
            }
        }

        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    /// Delete by id; returns the number of rows removed.
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
