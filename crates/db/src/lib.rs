//! SQLite persistence context shared by every module.
//!
//! [`Database`] wraps a `sqlx::SqlitePool`. It is opened once at startup,
//! handed to modules through the kernel's `InitCtx` and their routers, and
//! closed explicitly after the HTTP server has drained.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

/// A scoped write transaction. Dropping it without `commit` rolls back.
pub type Tx = Transaction<'static, Sqlite>;

/// A table a module needs, created at startup when absent.
#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: &'static str,
    /// Must be idempotent (`CREATE TABLE IF NOT EXISTS ...`).
    pub ddl: &'static str,
}

/// Process-wide handle to the relational store.
///
/// Clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool for `url`, creating the database file if it does not exist.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url '{url}'"))?
            .create_if_missing(true);

        // Every connection to `:memory:` is a separate database, so pin a single
        // connection for the lifetime of the pool.
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database '{url}'"))?;

        tracing::info!(target: "cinema-db", %url, max_connections, "database pool ready");

        Ok(Self { pool })
    }

    /// Shared pool for read-only queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a write transaction.
    pub async fn begin(&self) -> Result<Tx, sqlx::Error> {
        self.pool.begin().await
    }

    /// Create every table in `tables` inside a single transaction.
    pub async fn ensure_schema(&self, tables: &[TableDef]) -> anyhow::Result<()> {
        let mut tx = self
            .begin()
            .await
            .context("failed to open schema transaction")?;

        for table in tables {
            sqlx::query(table.ddl)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("failed to create table '{}'", table.name))?;
            tracing::debug!(target: "cinema-db", table = table.name, "table ensured");
        }

        tx.commit()
            .await
            .context("failed to commit schema transaction")?;

        tracing::info!(target: "cinema-db", tables = tables.len(), "schema ready");
        Ok(())
    }

    /// Whether a table named `name` exists.
    pub async fn table_exists(&self, name: &str) -> Result<bool, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(target: "cinema-db", "database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGETS: TableDef = TableDef {
        name: "widgets",
        ddl: "CREATE TABLE IF NOT EXISTS widgets (id INTEGER PRIMARY KEY AUTOINCREMENT, label TEXT)",
    };

    async fn file_database(dir: &tempfile::TempDir) -> Database {
        let url = format!("sqlite://{}", dir.path().join("test.db").display());
        Database::connect(&url, 2).await.unwrap()
    }

    #[tokio::test]
    async fn connect_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_database(&dir).await;
        assert!(dir.path().join("test.db").exists());
        db.close().await;
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_database(&dir).await;

        db.ensure_schema(&[WIDGETS]).await.unwrap();
        db.ensure_schema(&[WIDGETS]).await.unwrap();

        assert!(db.table_exists("widgets").await.unwrap());
        assert!(!db.table_exists("gadgets").await.unwrap());
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_database(&dir).await;
        db.ensure_schema(&[WIDGETS]).await.unwrap();

        {
            let mut tx = db.begin().await.unwrap();
            sqlx::query("INSERT INTO widgets (label) VALUES ('lost')")
                .execute(&mut *tx)
                .await
                .unwrap();
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM widgets")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn in_memory_database_keeps_state_across_queries() {
        let db = Database::connect("sqlite::memory:", 8).await.unwrap();
        db.ensure_schema(&[WIDGETS]).await.unwrap();
        assert!(db.table_exists("widgets").await.unwrap());
    }
}
