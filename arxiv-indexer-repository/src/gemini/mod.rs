//! Gemini implementation of the embedding provider.

mod client;

pub use client::{GeminiConfig, GeminiEmbedder, DEFAULT_BASE_URL, DEFAULT_MODEL};
