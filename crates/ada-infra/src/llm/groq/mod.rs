//! Groq LLM provider (OpenAI-compatible chat completions API).

mod client;
mod streaming;
mod types;

pub use client::GroqProvider;
