//! SessionRepository trait definition.
//!
//! Document-style operations over sessions and their turns. Appending turns
//! and bumping `updated_at` must be a single atomic operation in the
//! implementation (one transaction), never a read-modify-write pair --
//! two rapid-fire messages on one session must both land.

use std::sync::Arc;

use ada_types::chat::{ChatSession, ConversationTurn};
use ada_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session and turn persistence.
///
/// Implementations live in ada-infra (e.g. `SqliteSessionRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait SessionRepository: Send + Sync {
    /// Create a session together with its first turns, atomically.
    fn create_session_with_turns(
        &self,
        session: &ChatSession,
        turns: &[ConversationTurn],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a session by id, scoped to its owner.
    fn get_session(
        &self,
        session_id: &Uuid,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Append turns to an existing session and bump `updated_at` and
    /// `turn_count`, all in one atomic operation.
    ///
    /// Returns `NotFound` when the session was deleted concurrently.
    fn append_turns(
        &self,
        session_id: &Uuid,
        turns: &[ConversationTurn],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get all turns for a session in insertion order.
    fn get_turns(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationTurn>, RepositoryError>> + Send;

    /// List a user's sessions ordered by `updated_at` descending.
    fn list_sessions(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Delete a session and its turns, scoped to its owner.
    fn delete_session(
        &self,
        session_id: &Uuid,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Set the session title and bump `updated_at`.
    fn rename_session(
        &self,
        session_id: &Uuid,
        user_id: &str,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Set the pinned flag and bump `updated_at`.
    fn set_pinned(
        &self,
        session_id: &Uuid,
        user_id: &str,
        pinned: bool,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// Shared repositories delegate straight through.
impl<T: SessionRepository> SessionRepository for Arc<T> {
    async fn create_session_with_turns(
        &self,
        session: &ChatSession,
        turns: &[ConversationTurn],
    ) -> Result<(), RepositoryError> {
        (**self).create_session_with_turns(session, turns).await
    }

    async fn get_session(
        &self,
        session_id: &Uuid,
        user_id: &str,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        (**self).get_session(session_id, user_id).await
    }

    async fn append_turns(
        &self,
        session_id: &Uuid,
        turns: &[ConversationTurn],
    ) -> Result<(), RepositoryError> {
        (**self).append_turns(session_id, turns).await
    }

    async fn get_turns(&self, session_id: &Uuid) -> Result<Vec<ConversationTurn>, RepositoryError> {
        (**self).get_turns(session_id).await
    }

    async fn list_sessions(&self, user_id: &str) -> Result<Vec<ChatSession>, RepositoryError> {
        (**self).list_sessions(user_id).await
    }

    async fn delete_session(&self, session_id: &Uuid, user_id: &str) -> Result<(), RepositoryError> {
        (**self).delete_session(session_id, user_id).await
    }

    async fn rename_session(
        &self,
        session_id: &Uuid,
        user_id: &str,
        title: &str,
    ) -> Result<(), RepositoryError> {
        (**self).rename_session(session_id, user_id, title).await
    }

    async fn set_pinned(
        &self,
        session_id: &Uuid,
        user_id: &str,
        pinned: bool,
    ) -> Result<(), RepositoryError> {
        (**self).set_pinned(session_id, user_id, pinned).await
    }
}
