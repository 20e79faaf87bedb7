//! Environment-backed application configuration.
//!
//! All runtime settings come from environment variables (a `.env` file is
//! loaded by the binary before this runs). Required keys fail startup with
//! a named error; optional provider keys degrade the matching chat mode
//! instead.

use std::path::PathBuf;

use secrecy::SecretString;

/// Default model for chat completions.
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default model for short utility completions such as title generation.
pub const DEFAULT_TITLE_MODEL: &str = "llama-3.1-8b-instant";

/// Default per-reply output token cap.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Application configuration resolved at startup.
#[derive(Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub database_url: String,
    pub groq_api_key: SecretString,
    pub serper_api_key: Option<SecretString>,
    pub youtube_api_key: Option<SecretString>,
    pub image_api_key: Option<SecretString>,
    pub jwt_secret: SecretString,
    /// Sender id granted the privileged intent set, when configured.
    pub owner_id: Option<String>,
    pub chat_model: String,
    pub title_model: String,
    pub max_tokens: u32,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match get("ADA_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = get("HOME").unwrap_or_else(|| ".".to_string());
                PathBuf::from(home).join(".ada")
            }
        };
        let database_url = format!("sqlite://{}/ada.db", data_dir.display());

        let groq_api_key = get("GROQ_API_KEY")
            .map(SecretString::from)
            .ok_or(ConfigError::MissingVar("GROQ_API_KEY"))?;
        let jwt_secret = get("ADA_JWT_SECRET")
            .map(SecretString::from)
            .ok_or(ConfigError::MissingVar("ADA_JWT_SECRET"))?;

        let max_tokens = match get("ADA_MAX_TOKENS") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                var: "ADA_MAX_TOKENS",
                message: format!("{e}"),
            })?,
            None => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            data_dir,
            database_url,
            groq_api_key,
            serper_api_key: get("SERPER_API_KEY").map(SecretString::from),
            youtube_api_key: get("YOUTUBE_API_KEY").map(SecretString::from),
            image_api_key: get("IMAGE_API_KEY").map(SecretString::from),
            jwt_secret,
            owner_id: get("ADA_OWNER_ID"),
            chat_model: get("ADA_CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            title_model: get("ADA_TITLE_MODEL").unwrap_or_else(|| DEFAULT_TITLE_MODEL.to_string()),
            max_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("GROQ_API_KEY", "gsk-test"),
            ("ADA_JWT_SECRET", "jwt-test"),
            ("ADA_DATA_DIR", "/tmp/ada-test"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_source(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.database_url, "sqlite:///tmp/ada-test/ada.db");
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.title_model, DEFAULT_TITLE_MODEL);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(config.serper_api_key.is_none());
        assert!(config.owner_id.is_none());
    }

    #[test]
    fn test_missing_groq_key_fails() {
        let mut env = base_env();
        env.remove("GROQ_API_KEY");
        let err = load(&env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("GROQ_API_KEY")));
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        let mut env = base_env();
        env.remove("ADA_JWT_SECRET");
        let err = load(&env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("ADA_JWT_SECRET")));
    }

    #[test]
    fn test_overrides_are_honored() {
        let mut env = base_env();
        env.insert("ADA_CHAT_MODEL", "llama-custom");
        env.insert("ADA_MAX_TOKENS", "512");
        env.insert("ADA_OWNER_ID", "owner-1");
        env.insert("SERPER_API_KEY", "serper-test");

        let config = load(&env).unwrap();
        assert_eq!(config.chat_model, "llama-custom");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.owner_id.as_deref(), Some("owner-1"));
        assert!(config.serper_api_key.is_some());
    }

    #[test]
    fn test_invalid_max_tokens_fails() {
        let mut env = base_env();
        env.insert("ADA_MAX_TOKENS", "lots");
        let err = load(&env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "ADA_MAX_TOKENS",
                ..
            }
        ));
    }

    #[test]
    fn test_home_fallback_data_dir() {
        let mut env = base_env();
        env.remove("ADA_DATA_DIR");
        env.insert("HOME", "/home/tester");
        let config = load(&env).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/home/tester/.ada"));
        assert_eq!(config.database_url, "sqlite:///home/tester/.ada/ada.db");
    }
}
