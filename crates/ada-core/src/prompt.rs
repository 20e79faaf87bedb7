//! Prompt assembly for the streaming chat pipeline.
//!
//! Message order is significant and fixed: system instructions first (sent
//! via the request's `system` field), then the real-time clock message, then
//! prior turns in their persisted order, then the new user message with its
//! optional code/file context blocks. The clock message is recomputed per
//! request so the model always receives a single authoritative time value
//! and never infers or converts timezones itself.

use chrono::Utc;
use chrono_tz::Asia::Kolkata;

use ada_types::chat::FileContext;
use ada_types::llm::{Message, MessageRole};

/// Fixed system instructions: persona, creator bio, and the strict
/// language-mirroring rule with its fixed refusal sentence.
pub const SYSTEM_INSTRUCTIONS: &str = "\
You are Ada, a powerful AI assistant created by Amit Dutta, a software \
developer from India. Answer accurately, clearly, and concisely.

STRICT LANGUAGE RULE: respond only in the language the user used in their \
message. If you cannot recognize the user's language, reply with exactly: \
\"I'm sorry, I could not recognize the language of your message.\"";

/// All wall-clock context uses this fixed timezone.
const CLOCK_TZ: chrono_tz::Tz = Kolkata;

/// Build the real-time context message from the current wall clock.
///
/// Never cached; call once per request.
pub fn realtime_context() -> Message {
    let now = Utc::now().with_timezone(&CLOCK_TZ);
    Message {
        role: MessageRole::System,
        content: format!(
            "Use this real-time info:\n{} {}",
            now.format("%A, %d %B %Y"),
            now.format("%H:%M:%S (%Z)"),
        ),
    }
}

/// Compose the final user message from the raw text and its optional
/// code/file context blocks. Context precedes the message itself.
pub fn compose_user_message(
    message: &str,
    code_context: Option<&str>,
    file_context: Option<&FileContext>,
) -> Message {
    let mut content = String::new();

    if let Some(code) = code_context.filter(|c| !c.trim().is_empty()) {
        content.push_str("[CURRENT EDITOR CONTENT]:\n");
        content.push_str(code);
        content.push_str("\n\n");
    }

    if let Some(file) = file_context.filter(|f| !f.content.trim().is_empty()) {
        content.push_str(&format!("[UPLOADED FILE: {}]:\n", file.name));
        content.push_str(&file.content);
        content.push_str("\n\n");
    }

    content.push_str(message);

    Message {
        role: MessageRole::User,
        content,
    }
}

/// Assemble the full message sequence for one chat request.
///
/// `history` must already be in persisted order; this function never
/// filters, drops, or reorders it.
pub fn build_messages(
    history: &[Message],
    message: &str,
    code_context: Option<&str>,
    file_context: Option<&FileContext>,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(realtime_context());
    messages.extend_from_slice(history);
    messages.push(compose_user_message(message, code_context, file_context));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realtime_context_is_system_role() {
        let msg = realtime_context();
        assert_eq!(msg.role, MessageRole::System);
        assert!(msg.content.starts_with("Use this real-time info:"));
    }

    #[test]
    fn test_compose_plain_message() {
        let msg = compose_user_message("hello", None, None);
        assert_eq!(msg.content, "hello");
        assert_eq!(msg.role, MessageRole::User);
    }

    #[test]
    fn test_compose_with_code_context() {
        let msg = compose_user_message("fix this", Some("fn main() {}"), None);
        assert!(msg.content.starts_with("[CURRENT EDITOR CONTENT]:\nfn main() {}"));
        assert!(msg.content.ends_with("fix this"));
    }

    #[test]
    fn test_compose_with_file_context() {
        let file = FileContext {
            name: "notes.txt".to_string(),
            content: "remember the milk".to_string(),
        };
        let msg = compose_user_message("summarize", None, Some(&file));
        assert!(msg.content.contains("[UPLOADED FILE: notes.txt]:"));
        assert!(msg.content.contains("remember the milk"));
        assert!(msg.content.ends_with("summarize"));
    }

    #[test]
    fn test_empty_context_blocks_are_skipped() {
        let file = FileContext {
            name: "empty.txt".to_string(),
            content: "   ".to_string(),
        };
        let msg = compose_user_message("hi", Some("  "), Some(&file));
        assert_eq!(msg.content, "hi");
    }

    #[test]
    fn test_build_messages_preserves_history_order() {
        let history = vec![
            Message {
                role: MessageRole::User,
                content: "first".to_string(),
            },
            Message {
                role: MessageRole::Assistant,
                content: "second".to_string(),
            },
            Message {
                role: MessageRole::User,
                content: "third".to_string(),
            },
        ];

        let messages = build_messages(&history, "fourth", None, None);
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].content, "first");
        assert_eq!(messages[2].content, "second");
        assert_eq!(messages[3].content, "third");
        assert_eq!(messages[4].content, "fourth");
    }

    #[test]
    fn test_system_instructions_fixed_refusal() {
        assert!(SYSTEM_INSTRUCTIONS.contains("Amit Dutta"));
        assert!(SYSTEM_INSTRUCTIONS
            .contains("I'm sorry, I could not recognize the language of your message."));
    }
}
