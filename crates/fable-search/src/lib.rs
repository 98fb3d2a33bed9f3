//! fable-search: Web search backends for fable
//!
//! This crate provides implementations of the SearchProvider trait.
//! The only backend today is the DuckDuckGo HTML endpoint, which needs
//! no credential.

pub mod duckduckgo;

pub use duckduckgo::{DuckDuckGoSearch, SearchConfig};
