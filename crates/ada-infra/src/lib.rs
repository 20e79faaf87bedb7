//! Infrastructure layer for Ada.
//!
//! Contains implementations of the ports defined in `ada-core`: SQLite
//! storage, the Groq LLM provider, search and image adapters, and JWT
//! token verification.

pub mod auth;
pub mod config;
pub mod llm;
pub mod providers;
pub mod sqlite;
