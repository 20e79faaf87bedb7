//! Chat service wrapping the session repository with policy.
//!
//! Two policies live here: corrupt or unreadable history heals to an empty
//! list (never fatal), and every exchange is committed as one atomic
//! append -- user turn and assistant turn together, never two racing
//! writes.

use ada_types::chat::{ChatSession, ConversationTurn};
use ada_types::error::RepositoryError;
use ada_types::llm::{Message, MessageRole};
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::repository::SessionRepository;

/// Orchestrates session lifecycle and exchange persistence.
pub struct ChatService<R: SessionRepository> {
    repo: R,
}

impl<R: SessionRepository> ChatService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Load a session's prior turns as LLM messages, in persisted order.
    ///
    /// Scoped to the owner: another user's session id reads as empty, so
    /// its turns can never reach a prompt. Missing sessions and read
    /// failures also heal to an empty history; a broken log must never
    /// block a chat turn.
    pub async fn load_history(&self, session_id: &Uuid, user_id: &str) -> Vec<Message> {
        match self.repo.get_session(session_id, user_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "session lookup failed, starting empty");
                return Vec::new();
            }
        }

        match self.repo.get_turns(session_id).await {
            Ok(turns) => turns
                .into_iter()
                .map(|t| Message {
                    role: t.role,
                    content: t.content,
                })
                .collect(),
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "history load failed, starting empty");
                Vec::new()
            }
        }
    }

    /// Whether the session already exists for this user.
    pub async fn session_exists(&self, session_id: &Uuid, user_id: &str) -> bool {
        matches!(self.repo.get_session(session_id, user_id).await, Ok(Some(_)))
    }

    /// Commit one completed exchange (user turn + assistant turn) to the
    /// session in a single atomic append.
    ///
    /// Creates the session with the given `title` when it does not exist
    /// yet; otherwise appends and lets the title stand. Two rapid first
    /// exchanges can both take the create path; the loser sees `Conflict`
    /// and retries as an append so neither exchange is dropped. A conflict
    /// against a session the caller does not own propagates instead.
    pub async fn commit_exchange(
        &self,
        session_id: Uuid,
        user_id: &str,
        user_text: String,
        assistant_text: String,
        title: String,
    ) -> Result<(), RepositoryError> {
        let turns = [
            ConversationTurn::user(session_id, user_text),
            ConversationTurn::assistant(session_id, assistant_text),
        ];

        if self.session_exists(&session_id, user_id).await {
            self.repo.append_turns(&session_id, &turns).await?;
        } else {
            let mut session = ChatSession::new(session_id, user_id.to_string());
            session.title = title;
            match self.repo.create_session_with_turns(&session, &turns).await {
                Ok(()) => {
                    info!(session_id = %session_id, "session created");
                }
                Err(RepositoryError::Conflict(_))
                    if self.session_exists(&session_id, user_id).await =>
                {
                    self.repo.append_turns(&session_id, &turns).await?;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    /// List a user's sessions, most recently updated first.
    pub async fn list_sessions(&self, user_id: &str) -> Result<Vec<ChatSession>, RepositoryError> {
        self.repo.list_sessions(user_id).await
    }

    /// Get one session with its turns, scoped to its owner.
    pub async fn get_session_with_turns(
        &self,
        session_id: &Uuid,
        user_id: &str,
    ) -> Result<Option<(ChatSession, Vec<ConversationTurn>)>, RepositoryError> {
        match self.repo.get_session(session_id, user_id).await? {
            Some(session) => {
                let turns = self.repo.get_turns(session_id).await?;
                Ok(Some((session, turns)))
            }
            None => Ok(None),
        }
    }

    /// Delete a session, scoped to its owner.
    pub async fn delete_session(
        &self,
        session_id: &Uuid,
        user_id: &str,
    ) -> Result<(), RepositoryError> {
        self.repo.delete_session(session_id, user_id).await
    }

    /// Rename a session, scoped to its owner.
    pub async fn rename_session(
        &self,
        session_id: &Uuid,
        user_id: &str,
        title: &str,
    ) -> Result<(), RepositoryError> {
        self.repo.rename_session(session_id, user_id, title).await
    }

    /// Pin or unpin a session, scoped to its owner.
    pub async fn set_pinned(
        &self,
        session_id: &Uuid,
        user_id: &str,
        pinned: bool,
    ) -> Result<(), RepositoryError> {
        self.repo.set_pinned(session_id, user_id, pinned).await
    }
}

/// Turns only ever carry user or assistant roles; guard used by tests and
/// repository implementations.
pub fn is_turn_role(role: &MessageRole) -> bool {
    matches!(role, MessageRole::User | MessageRole::Assistant)
}
