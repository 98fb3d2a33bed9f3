//! fable-providers: LLM provider implementations for fable
//!
//! This crate provides implementations of the CompletionProvider trait.

pub mod openai;

pub use openai::OpenAiProvider;
