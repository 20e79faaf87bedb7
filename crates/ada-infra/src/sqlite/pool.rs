//! Split reader/writer SQLite pools.
//!
//! SQLite permits one writer at a time, and this workload is read-heavy:
//! every chat turn loads history and every session-list call hits the
//! reader, while writes arrive only when an exchange completes. The
//! writer pool is therefore pinned to a single connection (writes queue
//! instead of fighting over the lock) and reads fan out over their own
//! read-only pool.

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;

/// Upper bound on concurrent read connections. Streams hold their history
/// read only briefly, so a small pool suffices.
const READER_POOL_SIZE: u32 = 8;

/// How long a connection waits on the write lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Paired read and write pools over one database file.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open both pools and run pending migrations on the writer.
    ///
    /// WAL journaling lets readers proceed while a write is in flight;
    /// synchronous NORMAL is safe under WAL and avoids an fsync per
    /// transaction on the chat commit path. Foreign keys are enforced so
    /// deleting a session cascades to its turns.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT)
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        // Migrations need the writer; the read-only pool opens after the
        // schema exists.
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(READER_POOL_SIZE)
            .connect_with(read_opts)
            .await?;

        Ok(Self { reader, writer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_pool(name: &str) -> (DatabasePool, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join(name);
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        (DatabasePool::new(&url).await.unwrap(), dir)
    }

    #[tokio::test]
    async fn test_migrations_create_schema() {
        let (pool, _dir) = open_pool("schema.db").await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let table_names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(
            table_names,
            vec![
                "chat_sessions",
                "conversation_turns",
                "guest_names",
                "user_profiles"
            ]
        );
    }

    #[tokio::test]
    async fn test_wal_and_synchronous_settings() {
        let (pool, _dir) = open_pool("wal.db").await;

        let journal: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool.writer)
            .await
            .unwrap();
        assert_eq!(journal.0.to_lowercase(), "wal");

        // NORMAL reports as 1.
        let synchronous: (i32,) = sqlx::query_as("PRAGMA synchronous")
            .fetch_one(&pool.writer)
            .await
            .unwrap();
        assert_eq!(synchronous.0, 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let (pool, _dir) = open_pool("fk.db").await;

        let result: (i32,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool.writer)
            .await
            .unwrap();
        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn test_reader_pool_rejects_writes() {
        let (pool, _dir) = open_pool("ro.db").await;

        let result = sqlx::query(
            "INSERT INTO guest_names (sender_id, display_name, updated_at) VALUES ('s', 'n', 'now')",
        )
        .execute(&pool.reader)
        .await;
        assert!(result.is_err());
    }
}
