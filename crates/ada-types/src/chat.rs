//! Chat session and conversation turn types for Ada.
//!
//! A session is an ordered, append-only log of turns scoped to one user.
//! Turns are immutable once written and totally ordered by insertion
//! (v7 ids are time-sortable).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export MessageRole from the llm module (turns carry the same roles).
pub use crate::llm::MessageRole;

/// Default title for a session whose title generation failed or is pending.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// A persisted conversation thread belonging to one user.
///
/// `updated_at` is bumped by the same atomic operation that appends turns,
/// so listing by `updated_at` descending always reflects the latest append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pinned: bool,
    pub turn_count: u32,
}

impl ChatSession {
    /// Create a fresh session for a user with the default title.
    pub fn new(id: Uuid, user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            title: DEFAULT_SESSION_TITLE.to_string(),
            created_at: now,
            updated_at: now,
            pinned: false,
            turn_count: 0,
        }
    }
}

/// One message exchange unit within a session.
///
/// Turns are never edited or reordered after being written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a user turn.
    pub fn user(session_id: Uuid, content: String) -> Self {
        Self::new(session_id, MessageRole::User, content)
    }

    /// Create an assistant turn.
    pub fn assistant(session_id: Uuid, content: String) -> Self {
        Self::new(session_id, MessageRole::Assistant, content)
    }

    fn new(session_id: Uuid, role: MessageRole, content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id,
            role,
            content,
            created_at: Utc::now(),
        }
    }
}

/// An uploaded file accompanying a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContext {
    pub name: String,
    pub content: String,
}
