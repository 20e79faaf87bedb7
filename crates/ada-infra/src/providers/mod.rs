//! External adapter providers (web search, video search, image generation).
//!
//! Each provider holds an optional API key. A missing key fails fast with
//! `AdapterError::MissingCredential` before any network call, so the HTTP
//! layer can keep the matching chat mode degraded instead of broken.

pub mod image;
pub mod serper;
pub mod youtube;

pub use image::OpenAiImageProvider;
pub use serper::SerperSearchProvider;
pub use youtube::YoutubeSearchProvider;
