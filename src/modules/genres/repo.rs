use sqlx::{SqliteConnection, SqlitePool};

use super::models::{Genre, GenreInput};

pub const CREATE_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS genres (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        name TEXT\
    )";

pub struct GenreRepo;

impl GenreRepo {
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(pool)
            .await
    }

    pub async fn insert(
        conn: &mut SqliteConnection,
        input: &GenreInput,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO genres (name) VALUES (?)")
            .bind(input.name.clone().flatten())
            .execute(&mut *conn)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Returns the number of rows matched; a missing `name` leaves it unchanged
    /// and an explicit `null` clears it.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        input: &GenreInput,
    ) -> Result<u64, sqlx::Error> {
        let result = match &input.name {
            Some(name) => {
                sqlx::query("UPDATE genres SET name = ? WHERE id = ?")
                    .bind(name.as_deref())
                    .bind(id)
                    .execute(&mut *conn)
                    .await?
            }
            // Nothing to change still has to match the row.
            None => {
                sqlx::query("UPDATE genres SET id = id WHERE id = ?")
                    .bind(id)
                    .execute(&mut *conn)
                    .await?
            }
        };
        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genres WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
