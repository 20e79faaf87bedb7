//! User profile types.
//!
//! One profile per verified subject id, created lazily with defaults on
//! first read. `ProfileUpdate` is the editable subset; everything else
//! (identity, timestamps) is server-owned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UI theme a fresh profile starts with.
pub const DEFAULT_THEME: &str = "dark";

/// Code highlighting theme a fresh profile starts with.
pub const DEFAULT_CODE_THEME: &str = "dracula";

/// Editor font size a fresh profile starts with.
pub const DEFAULT_FONT_SIZE: u16 = 13;

/// A user's profile and UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub photo_url: String,
    /// Free-form text, like the rest of the bio fields.
    pub age: String,
    pub location: String,
    pub bio: String,
    pub theme: String,
    pub code_theme: String,
    pub font_size: u16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// The default profile written on a user's first read.
    pub fn new_default(user_id: String) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            display_name: String::new(),
            email: String::new(),
            photo_url: String::new(),
            age: String::new(),
            location: String::new(),
            bio: String::new(),
            theme: DEFAULT_THEME.to_string(),
            code_theme: DEFAULT_CODE_THEME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields a profile update may change; absent fields stay untouched.
///
/// `email` is deliberately not here: it comes from the identity provider,
/// never from the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub age: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub theme: Option<String>,
    pub code_theme: Option<String>,
    pub font_size: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_values() {
        let profile = UserProfile::new_default("user-1".to_string());
        assert_eq!(profile.theme, "dark");
        assert_eq!(profile.code_theme, "dracula");
        assert_eq!(profile.font_size, 13);
        assert!(profile.display_name.is_empty());
        assert_eq!(profile.created_at, profile.updated_at);
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = UserProfile::new_default("user-1".to_string());
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"userId\":\"user-1\""));
        assert!(json.contains("\"codeTheme\":\"dracula\""));
    }

    #[test]
    fn test_update_ignores_unknown_and_server_owned_fields() {
        let update: ProfileUpdate = serde_json::from_str(
            r#"{"displayName": "Amit", "email": "spoof@example.com", "totalChats": 99}"#,
        )
        .unwrap();
        assert_eq!(update.display_name.as_deref(), Some("Amit"));
        assert!(update.photo_url.is_none());
    }
}
