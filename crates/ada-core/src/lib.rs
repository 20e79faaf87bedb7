//! Business logic and collaborator trait definitions for the Ada backend.
//!
//! This crate defines the "ports" (collaborator traits) that the
//! infrastructure layer implements: session persistence, guest identity,
//! user profiles, LLM provider, search/video/image adapters, and token
//! verification.
//! It depends only on `ada-types` -- never on `ada-infra` or any
//! database/IO crate.

pub mod adapter;
pub mod auth;
pub mod chat;
pub mod guest;
pub mod intent;
pub mod llm;
pub mod profile;
pub mod prompt;
