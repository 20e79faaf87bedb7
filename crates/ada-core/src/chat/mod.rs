//! Chat session persistence abstractions and the streaming chat pipeline.
//!
//! `repository` defines the `SessionRepository` trait the infrastructure
//! layer implements; `service` wraps it with the corruption-healing and
//! ownership policies; `pipeline` drives one streaming chat request from
//! prompt assembly through persistence.

pub mod pipeline;
pub mod repository;
pub mod service;
pub mod title;
