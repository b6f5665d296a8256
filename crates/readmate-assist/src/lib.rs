//! # readmate Assist
//!
//! The background half of the engine: builds and parses the numbered batch
//! translation exchange, memoizes free-text translations, runs the reading
//! aids (simplify, explain, summarize), and dispatches background actions.

pub mod cache;
pub mod prompt;
pub mod service;

pub use cache::{CACHE_EXPIRY, Clock, SystemClock, TranslationCache};
pub use service::{AssistConfig, AssistService};
