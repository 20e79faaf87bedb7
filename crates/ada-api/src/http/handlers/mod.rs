//! HTTP request handlers.

pub mod chat;
pub mod profile;
pub mod session;
pub mod title;
