//! SQLite session repository implementation.
//!
//! Implements `SessionRepository` from `ada-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reads on the reader
//! pool and writes on the single-connection writer pool. Appends run in a
//! transaction so the turns and the session bump land together.

use ada_core::chat::repository::SessionRepository;
use ada_types::chat::{ChatSession, ConversationTurn};
use ada_types::error::RepositoryError;
use ada_types::llm::MessageRole;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionRepository`.
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain ChatSession.
struct ChatSessionRow {
    id: String,
    user_id: String,
    title: String,
    created_at: String,
    updated_at: String,
    pinned: i64,
    turn_count: i64,
}

impl ChatSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            pinned: row.try_get("pinned")?,
            turn_count: row.try_get("turn_count")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(ChatSession {
            id,
            user_id: self.user_id,
            title: self.title,
            created_at,
            updated_at,
            pinned: self.pinned != 0,
            turn_count: self.turn_count as u32,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain ConversationTurn.
struct TurnRow {
    id: String,
    session_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_turn(self) -> Result<ConversationTurn, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid turn id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ConversationTurn {
            id,
            session_id,
            role,
            content: self.content,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

async fn insert_turn(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    turn: &ConversationTurn,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r#"INSERT INTO conversation_turns (id, session_id, role, content, created_at)
           VALUES (?, ?, ?, ?, ?)"#,
    )
    .bind(turn.id.to_string())
    .bind(turn.session_id.to_string())
    .bind(turn.role.to_string())
    .bind(&turn.content)
    .bind(format_datetime(&turn.created_at))
    .execute(&mut **tx)
    .await
    .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// SessionRepository implementation
// ---------------------------------------------------------------------------

impl SessionRepository for SqliteSessionRepository {
    async fn create_session_with_turns(
        &self,
        session: &ChatSession,
        turns: &[ConversationTurn],
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO chat_sessions (id, user_id, title, created_at, updated_at, pinned, turn_count)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(&session.user_id)
        .bind(&session.title)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.updated_at))
        .bind(session.pinned as i64)
        .bind(turns.len() as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.message().contains("UNIQUE") {
                    return RepositoryError::Conflict(format!(
                        "session {} already exists",
                        session.id
                    ));
                }
            }
            RepositoryError::Query(e.to_string())
        })?;

        for turn in turns {
            insert_turn(&mut tx, turn).await?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_session(
        &self,
        session_id: &Uuid,
        user_id: &str,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ? AND user_id = ?")
            .bind(session_id.to_string())
            .bind(user_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row = ChatSessionRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn append_turns(
        &self,
        session_id: &Uuid,
        turns: &[ConversationTurn],
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Bump the session first: zero rows means it was deleted out from
        // under us, and the FK on conversation_turns would reject the
        // inserts with an opaque constraint error.
        let result = sqlx::query(
            "UPDATE chat_sessions SET updated_at = ?, turn_count = turn_count + ? WHERE id = ?",
        )
        .bind(format_datetime(&Utc::now()))
        .bind(turns.len() as i64)
        .bind(session_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            // The drop of `tx` rolls back.
            return Err(RepositoryError::NotFound);
        }

        for turn in turns {
            insert_turn(&mut tx, turn).await?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_turns(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<ConversationTurn>, RepositoryError> {
        // Turn ids are UUIDv7, so id order is insertion order.
        let rows =
            sqlx::query("SELECT * FROM conversation_turns WHERE session_id = ? ORDER BY id ASC")
                .bind(session_id.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row =
                TurnRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            turns.push(turn_row.into_turn()?);
        }

        Ok(turns)
    }

    async fn list_sessions(&self, user_id: &str) -> Result<Vec<ChatSession>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_sessions WHERE user_id = ? ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                ChatSessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }

    async fn delete_session(&self, session_id: &Uuid, user_id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_sessions WHERE id = ? AND user_id = ?")
            .bind(session_id.to_string())
            .bind(user_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn rename_session(
        &self,
        session_id: &Uuid,
        user_id: &str,
        title: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE chat_sessions SET title = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(title)
        .bind(format_datetime(&Utc::now()))
        .bind(session_id.to_string())
        .bind(user_id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn set_pinned(
        &self,
        session_id: &Uuid,
        user_id: &str,
        pinned: bool,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE chat_sessions SET pinned = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(pinned as i64)
        .bind(format_datetime(&Utc::now()))
        .bind(session_id.to_string())
        .bind(user_id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_pool() -> (DatabasePool, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        (DatabasePool::new(&url).await.unwrap(), dir)
    }

    fn make_session(user_id: &str) -> ChatSession {
        ChatSession::new(Uuid::now_v7(), user_id.to_string())
    }

    fn exchange(session_id: Uuid, q: &str, a: &str) -> [ConversationTurn; 2] {
        [
            ConversationTurn::user(session_id, q.to_string()),
            ConversationTurn::assistant(session_id, a.to_string()),
        ]
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let mut session = make_session("user-1");
        session.title = "Rust lifetimes".to_string();
        let turns = exchange(session.id, "what is a lifetime?", "A lifetime is...");

        repo.create_session_with_turns(&session, &turns).await.unwrap();

        let found = repo.get_session(&session.id, "user-1").await.unwrap().unwrap();
        assert_eq!(found.title, "Rust lifetimes");
        assert_eq!(found.turn_count, 2);
        assert!(!found.pinned);

        let stored = repo.get_turns(&session.id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].role, MessageRole::User);
        assert_eq!(stored[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_get_session_is_owner_scoped() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let session = make_session("user-1");
        repo.create_session_with_turns(&session, &exchange(session.id, "q", "a"))
            .await
            .unwrap();

        let found = repo.get_session(&session.id, "someone-else").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_append_bumps_count_and_updated_at() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let session = make_session("user-1");
        repo.create_session_with_turns(&session, &exchange(session.id, "q1", "a1"))
            .await
            .unwrap();
        let before = repo.get_session(&session.id, "user-1").await.unwrap().unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.append_turns(&session.id, &exchange(session.id, "q2", "a2"))
            .await
            .unwrap();

        let after = repo.get_session(&session.id, "user-1").await.unwrap().unwrap();
        assert_eq!(after.turn_count, 4);
        assert!(after.updated_at > before.updated_at);

        let turns = repo.get_turns(&session.id).await.unwrap();
        let contents: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["q1", "a1", "q2", "a2"]);
    }

    #[tokio::test]
    async fn test_append_to_missing_session_is_not_found() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let ghost = Uuid::now_v7();
        let err = repo
            .append_turns(&ghost, &exchange(ghost, "q", "a"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        // Rollback means no orphan turns.
        let turns = repo.get_turns(&ghost).await.unwrap();
        assert!(turns.is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_turns() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let session = make_session("user-1");
        repo.create_session_with_turns(&session, &exchange(session.id, "q", "a"))
            .await
            .unwrap();

        repo.delete_session(&session.id, "user-1").await.unwrap();

        assert!(repo.get_session(&session.id, "user-1").await.unwrap().is_none());
        assert!(repo.get_turns(&session.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_wrong_owner_is_not_found() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let session = make_session("user-1");
        repo.create_session_with_turns(&session, &exchange(session.id, "q", "a"))
            .await
            .unwrap();

        let err = repo.delete_session(&session.id, "intruder").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        assert!(repo.get_session(&session.id, "user-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_sessions_most_recent_first() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let older = make_session("user-1");
        repo.create_session_with_turns(&older, &exchange(older.id, "q", "a"))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let newer = make_session("user-1");
        repo.create_session_with_turns(&newer, &exchange(newer.id, "q", "a"))
            .await
            .unwrap();

        let other = make_session("user-2");
        repo.create_session_with_turns(&other, &exchange(other.id, "q", "a"))
            .await
            .unwrap();

        let sessions = repo.list_sessions("user-1").await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, newer.id);
        assert_eq!(sessions[1].id, older.id);
    }

    #[tokio::test]
    async fn test_rename_and_pin() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let session = make_session("user-1");
        repo.create_session_with_turns(&session, &exchange(session.id, "q", "a"))
            .await
            .unwrap();

        repo.rename_session(&session.id, "user-1", "Borrow checker help")
            .await
            .unwrap();
        repo.set_pinned(&session.id, "user-1", true).await.unwrap();

        let found = repo.get_session(&session.id, "user-1").await.unwrap().unwrap();
        assert_eq!(found.title, "Borrow checker help");
        assert!(found.pinned);

        let err = repo
            .rename_session(&session.id, "intruder", "stolen")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_duplicate_session_is_conflict() {
        let (pool, _dir) = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let session = make_session("user-1");
        repo.create_session_with_turns(&session, &[]).await.unwrap();

        let err = repo
            .create_session_with_turns(&session, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
