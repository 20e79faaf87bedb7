//! SQLite guest identity repository.
//!
//! One row per sender id. `set` is an upsert so a guest can re-introduce
//! themselves under a new name.

use ada_core::guest::GuestIdentityRepository;
use ada_types::error::RepositoryError;
use chrono::Utc;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `GuestIdentityRepository`.
pub struct SqliteGuestRepository {
    pool: DatabasePool,
}

impl SqliteGuestRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl GuestIdentityRepository for SqliteGuestRepository {
    async fn get(&self, sender_id: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT display_name FROM guest_names WHERE sender_id = ?")
            .bind(sender_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let name: String = row
                    .try_get("display_name")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(name))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, sender_id: &str, name: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO guest_names (sender_id, display_name, updated_at)
               VALUES (?, ?, ?)
               ON CONFLICT(sender_id) DO UPDATE SET
                   display_name = excluded.display_name,
                   updated_at = excluded.updated_at"#,
        )
        .bind(sender_id)
        .bind(name)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_repo() -> (SqliteGuestRepository, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (SqliteGuestRepository::new(pool), dir)
    }

    #[tokio::test]
    async fn test_unknown_sender_is_none() {
        let (repo, _dir) = test_repo().await;
        assert!(repo.get("stranger").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (repo, _dir) = test_repo().await;
        repo.set("sender-1", "Riya").await.unwrap();
        assert_eq!(repo.get("sender-1").await.unwrap().as_deref(), Some("Riya"));
    }

    #[tokio::test]
    async fn test_set_is_an_upsert() {
        let (repo, _dir) = test_repo().await;
        repo.set("sender-1", "Riya").await.unwrap();
        repo.set("sender-1", "Priya").await.unwrap();
        assert_eq!(repo.get("sender-1").await.unwrap().as_deref(), Some("Priya"));
    }
}
