//! fable-core: Core types and traits for fable
//!
//! This crate provides the foundational types and traits used throughout
//! the fable fairy-tale summarizer: the persona/template model, the
//! completion and search capability traits, and the summarization pipeline.

pub mod error;
pub mod message;
pub mod persona;
pub mod provider;
pub mod search;
pub mod summarizer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::Error;
pub use message::{Message, Role, Usage};
pub use persona::{Persona, PromptTemplate};
pub use provider::{
    CompletionProvider, CompletionRequest, CompletionResponse, FinishReason,
};
pub use search::SearchProvider;
pub use summarizer::{Summarizer, SummarizerConfig, Summary, NO_RESULTS_MESSAGE};

pub type Result<T> = std::result::Result<T, Error>;
