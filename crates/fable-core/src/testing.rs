//! Test utilities shared across the workspace.
//! Only compiled when running tests or with the `testing` feature.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::Error;
use crate::message::{Message, Usage};
use crate::provider::{CompletionProvider, CompletionRequest, CompletionResponse, FinishReason};
use crate::search::SearchProvider;

/// A mock completion provider that returns pre-configured responses.
pub struct MockProvider {
    responses: Mutex<Vec<Result<CompletionResponse, Error>>>,
    /// Captured requests (for assertion).
    pub captured_requests: Mutex<Vec<CompletionRequest>>,
    pub name: String,
    pub default_model: Option<String>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            captured_requests: Mutex::new(Vec::new()),
            name: "mock".to_string(),
            default_model: None,
        }
    }

    /// Queue a response to be returned by the next complete() call.
    /// Responses are returned in FIFO order (first queued = first returned).
    pub fn queue_response(&self, content: &str) {
        let response = CompletionResponse {
            message: Message::assistant(content),
            usage: Usage::new(0, 0),
            model: "mock-model".to_string(),
            finish_reason: FinishReason::Stop,
        };
        self.responses.lock().unwrap().insert(0, Ok(response));
    }

    /// Queue an error to be returned by the next complete() call.
    pub fn queue_error(&self, error: Error) {
        self.responses.lock().unwrap().insert(0, Err(error));
    }

    /// Get the number of captured requests.
    pub fn request_count(&self) -> usize {
        self.captured_requests.lock().unwrap().len()
    }

    /// Get the last captured request.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.captured_requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_model(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, Error> {
        self.captured_requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().pop() {
            Some(response) => response,
            None => Err(Error::Unknown("No mock response queued".to_string())),
        }
    }
}

/// A mock search backend that returns pre-configured result text.
pub struct MockSearch {
    results: Mutex<Vec<Result<String, Error>>>,
    queries: Mutex<Vec<String>>,
    pub name: String,
}

impl MockSearch {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            name: "mock-search".to_string(),
        }
    }

    /// Queue result text for the next search() call (FIFO).
    pub fn queue_result(&self, text: &str) {
        self.results.lock().unwrap().insert(0, Ok(text.to_string()));
    }

    /// Queue a failure for the next search() call (FIFO).
    pub fn queue_failure(&self, error: Error) {
        self.results.lock().unwrap().insert(0, Err(error));
    }

    /// Get the number of search() calls made.
    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Get all captured queries.
    pub fn captured_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str) -> Result<String, Error> {
        self.queries.lock().unwrap().push(query.to_string());
        match self.results.lock().unwrap().pop() {
            Some(result) => result,
            None => Err(Error::Unknown("No mock search result queued".to_string())),
        }
    }
}
