//! # readmate Protocols
//!
//! Core protocol definitions (traits and wire types) for the readmate engine.
//! Contains only interfaces and shared data types - no implementations.
//!
//! ## Core Traits
//!
//! - [`LLMProvider`] - remote chat-completion service
//! - [`BlockTranslator`] - batch paragraph translation boundary
//! - [`SettingsStore`] - persistent key-value settings storage

pub mod error;
pub mod message;
pub mod provider;
pub mod store;
pub mod translate;
pub mod types;

// Re-export core traits and types
pub use error::{ContentError, ProviderError, SessionError, StoreError};
pub use message::{Request, Response};
pub use provider::{CompletionRequest, CompletionResponse, LLMProvider, Message, MessageRole, Usage};
pub use store::SettingsStore;
pub use translate::BlockTranslator;
pub use types::{PageContext, TextSettings, Theme};
