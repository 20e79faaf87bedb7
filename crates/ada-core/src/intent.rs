//! Intent classification for inbound messages.
//!
//! `classify` is a pure function of the message text, the sender's
//! privilege flag, and the guest-name lookup result. No network or storage
//! side effects happen here. Rules are evaluated in fixed priority order;
//! earlier rules shadow later ones.

/// Phrases meaning "who am I", checked as substrings of the lowered text.
const IDENTITY_QUERIES: &[&str] = &["who am i", "amar naam", "ami ke", "আমার নাম"];

/// Greetings that trigger the welcome-back reply for remembered guests.
const GREETINGS: &[&str] = &["hi", "hello", "hey"];

/// Reserved command prefix for image generation.
const IMAGE_PREFIX: &str = "/image";

/// Reserved keyword for web search.
const SEARCH_KEYWORD: &str = "search";

/// Reserved keyword for video search.
const VIDEO_KEYWORD: &str = "youtube";

/// The handling mode selected for an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Non-privileged sender asked who they are. Always answered with the
    /// name-capture hint, even when a name is already on file; quirk kept
    /// from day one, like the search-keyword misfire.
    IdentityUnknown,
    /// Sender introduced themselves via `name: <word>`; carries the
    /// capitalized name token.
    CaptureName(String),
    /// A remembered guest sent a plain greeting.
    GreetingWelcome,
    /// Image generation; carries the trimmed prompt.
    ImageGenerate(String),
    /// Web search; carries the query with the keyword removed.
    WebSearch(String),
    /// Video search; carries the query with the keyword removed.
    VideoSearch(String),
    /// Everything else goes to the streaming chat pipeline.
    Chat,
}

/// Classify a message into exactly one handling mode.
///
/// `text` is the raw message; normalization (trim + lowercase) happens
/// internally. `privileged` exempts the sender from the identity and
/// name-capture flows. `guest_name` is the result of the guest-name lookup
/// for this sender (None when unknown or when the lookup degraded).
///
/// Known limitation, preserved deliberately: the web-search rule fires when
/// the text merely *contains* the reserved keyword, so a sentence like
/// "I researched the word search yesterday" is treated as a search query.
pub fn classify(text: &str, privileged: bool, guest_name: Option<&str>) -> Intent {
    let lowered = text.trim().to_lowercase();

    if !privileged && IDENTITY_QUERIES.iter().any(|kw| lowered.contains(kw)) {
        return Intent::IdentityUnknown;
    }

    if !privileged {
        if let Some(name) = extract_name(text) {
            return Intent::CaptureName(name);
        }
    }

    if guest_name.is_some() && GREETINGS.contains(&lowered.as_str()) {
        return Intent::GreetingWelcome;
    }

    if lowered.starts_with(IMAGE_PREFIX) {
        // Take the prompt from the original text to preserve its casing.
        let prompt = text.trim()[IMAGE_PREFIX.len()..].trim().to_string();
        return Intent::ImageGenerate(prompt);
    }

    if lowered.starts_with(&format!("{SEARCH_KEYWORD} ")) || lowered.contains(SEARCH_KEYWORD) {
        return Intent::WebSearch(remove_keyword(text, SEARCH_KEYWORD));
    }

    if lowered.contains(VIDEO_KEYWORD) {
        return Intent::VideoSearch(remove_keyword(text, VIDEO_KEYWORD));
    }

    Intent::Chat
}

/// Extract and capitalize the name token from a `name: <word>` utterance.
///
/// Matching is case-insensitive on the `name:` prefix; the name token is the
/// leading run of alphanumeric characters after the colon.
pub fn extract_name(text: &str) -> Option<String> {
    let trimmed = text.trim();
    // get() instead of slicing: byte 5 may not be a char boundary.
    let prefix = trimmed.get(..5)?;
    if !prefix.eq_ignore_ascii_case("name:") {
        return None;
    }

    let token: String = trimmed[5..]
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphanumeric())
        .collect();

    if token.is_empty() {
        return None;
    }

    Some(capitalize(&token))
}

/// Capitalize the first character, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Remove every case-insensitive occurrence of `keyword` and trim the rest.
///
/// Matches on byte windows; the keyword is ASCII, so every match starts and
/// ends on a char boundary even in non-ASCII text.
fn remove_keyword(text: &str, keyword: &str) -> String {
    let needle = keyword.as_bytes();
    let hay = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut at = 0;
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        if hay[i..i + needle.len()].eq_ignore_ascii_case(needle) {
            out.push_str(&text[at..i]);
            i += needle.len();
            at = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[at..]);
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_query_for_guest() {
        assert_eq!(classify("who am i", false, None), Intent::IdentityUnknown);
        assert_eq!(classify("  WHO AM I?  ", false, None), Intent::IdentityUnknown);
    }

    #[test]
    fn test_identity_query_ignores_remembered_name() {
        // A remembered name does not change the identity reply; the
        // capture hint is sent either way.
        assert_eq!(
            classify("who am i", false, Some("Alice")),
            Intent::IdentityUnknown
        );
    }

    #[test]
    fn test_identity_query_skipped_for_owner() {
        assert_eq!(classify("who am i", true, None), Intent::Chat);
    }

    #[test]
    fn test_name_capture() {
        assert_eq!(
            classify("name: bob", false, None),
            Intent::CaptureName("Bob".to_string())
        );
        assert_eq!(
            classify("NAME:   aLiCe", false, None),
            Intent::CaptureName("Alice".to_string())
        );
    }

    #[test]
    fn test_name_capture_skipped_for_owner() {
        assert_eq!(classify("name: bob", true, None), Intent::Chat);
    }

    #[test]
    fn test_extract_name_rejects_empty_token() {
        assert_eq!(extract_name("name:"), None);
        assert_eq!(extract_name("name:   "), None);
        assert_eq!(extract_name("rename: bob"), None);
    }

    #[test]
    fn test_non_ascii_text_is_chat() {
        assert_eq!(classify("অনুবাদ করো", false, None), Intent::Chat);
        assert_eq!(extract_name("আমাকে সাহায্য করো"), None);
    }

    #[test]
    fn test_greeting_requires_remembered_name() {
        assert_eq!(classify("hi", false, Some("Alice")), Intent::GreetingWelcome);
        assert_eq!(classify("hi", false, None), Intent::Chat);
        assert_eq!(classify("hi there", false, Some("Alice")), Intent::Chat);
    }

    #[test]
    fn test_image_command() {
        assert_eq!(
            classify("/image a red fox in snow", false, None),
            Intent::ImageGenerate("a red fox in snow".to_string())
        );
    }

    #[test]
    fn test_search_strips_keyword() {
        assert_eq!(
            classify("search capital of France", false, None),
            Intent::WebSearch("capital of France".to_string())
        );
    }

    #[test]
    fn test_search_contains_misfire_is_preserved() {
        // Documented limitation: the keyword anywhere in the text triggers
        // search mode, even mid-sentence.
        assert_eq!(
            classify("I researched the word search yesterday", false, None),
            Intent::WebSearch("I reed the word  yesterday".to_string())
        );
    }

    #[test]
    fn test_video_search() {
        assert_eq!(
            classify("youtube rust async tutorial", false, None),
            Intent::VideoSearch("rust async tutorial".to_string())
        );
    }

    #[test]
    fn test_search_shadows_video_search() {
        // "search" outranks "youtube" in the priority order.
        assert_eq!(
            classify("search youtube history", false, None),
            Intent::WebSearch("youtube history".to_string())
        );
    }

    #[test]
    fn test_plain_message_is_chat() {
        assert_eq!(classify("explain lifetimes in Rust", false, None), Intent::Chat);
    }

    #[test]
    fn test_remove_keyword_is_case_insensitive() {
        assert_eq!(remove_keyword("Search rust Search", "search"), "rust");
    }
}
