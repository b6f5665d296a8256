//! # readmate OpenRouter Provider
//!
//! Chat-completion client for the OpenRouter API (and OpenAI-compatible
//! endpoints). The credential is resolved from the settings store on every
//! call; a missing key fails before any request is built.

mod api;
mod provider;

pub use provider::{OpenRouterConfig, OpenRouterProvider};
