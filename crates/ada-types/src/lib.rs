//! Shared domain types for the Ada assistant backend.
//!
//! This crate contains the types used across the Ada backend: chat sessions,
//! conversation turns, LLM request/response shapes, adapter outcomes, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod adapter;
pub mod chat;
pub mod error;
pub mod llm;
pub mod profile;
