//! Storefront AI Crate
//!
//! Thin client for an OpenAI-compatible chat-completions endpoint. The
//! enrichment worker in `storefront-core` uses it to draft product
//! descriptions; nothing in this crate knows about products or storage.
//!
//! # Core Types
//!
//! - [`TextGenerator`] - the seam the worker depends on
//! - [`ChatCompletionsClient`] - reqwest-backed implementation
//! - [`CompletionRequest`] / [`ChatMessage`] - the wire request shape

pub mod error;
pub mod generator;
pub mod types;

pub use error::AiError;
pub use generator::{ChatCompletionsClient, TextGenerator, DEFAULT_BASE_URL};
pub use types::{ChatMessage, CompletionRequest};
