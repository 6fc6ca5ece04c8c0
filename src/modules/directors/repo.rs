use sqlx::{SqliteConnection, SqlitePool};

use super::models::{Director, DirectorInput};

pub const CREATE_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS directors (\
        id INTEGER PRIMARY KEY AUTOINCREMENT, \
        name TEXT\
    )";

pub struct DirectorRepo;

impl DirectorRepo {
    /// Every director, in storage order.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Director>, sqlx::Error> {
        sqlx::query_as::<_, Director>("SELECT id, name FROM directors ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Director>, sqlx::Error> {
        sqlx::query_as::<_, Director>("SELECT id, name FROM directors WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM directors")
            .fetch_one(pool)
            .await
    }

    pub async fn insert(
        conn: &mut SqliteConnection,
        input: &DirectorInput,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO directors (name) VALUES (?)")
            .bind(input.name.clone().flatten())
            .execute(&mut *conn)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite the fields present in `input`, `null` included; returns the
    /// number of rows matched.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        input: &DirectorInput,
    ) -> Result<u64, sqlx::Error> {
        let result = match &input.name {
            Some(name) => {
                sqlx::query("UPDATE directors SET name = ? WHERE id = ?")
                    .bind(name.as_deref())
                    .bind(id)
                    .execute(&mut *conn)
                    .await?
            }
            // Nothing to change still has to match the row.
            None => {
                sqlx::query("UPDATE directors SET id = id WHERE id = ?")
                    .bind(id)
                    .execute(&mut *conn)
                    .await?
            }
        };
        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM directors WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
