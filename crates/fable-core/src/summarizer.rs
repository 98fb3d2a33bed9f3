//! The summarization pipeline: search, fill template, complete.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Error;
use crate::message::Message;
use crate::persona::Persona;
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::search::SearchProvider;

/// Fixed suffix appended to the title when building the search query.
const SEARCH_SUFFIX: &str = "fairy tale summary";

/// Shown when the search capability returns nothing usable.
pub const NO_RESULTS_MESSAGE: &str =
    "No search results were found. Please try another title.";

/// Prefix for the recovered completion-failure message.
const FAILURE_PREFIX: &str = "An error occurred while generating the summary: ";

/// Outcome of one summarization. Completion failures are a recovered,
/// user-visible state rather than an `Err`; only the search transport
/// failure propagates as `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Model output, verbatim.
    Text(String),
    /// The search step yielded empty or whitespace-only text; the
    /// model was never invoked.
    NoResults,
    /// The completion call failed; holds the underlying error detail.
    Failed(String),
}

impl Summary {
    /// The exact text presented to the user.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Summary::Text(text) => Cow::Borrowed(text),
            Summary::NoResults => Cow::Borrowed(NO_RESULTS_MESSAGE),
            Summary::Failed(detail) => Cow::Owned(format!("{}{}", FAILURE_PREFIX, detail)),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Summary::Failed(_))
    }
}

/// Model settings for the completion call.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// Pipeline binding the search and completion capabilities together.
/// Immutable after construction; one instance serves all submissions.
pub struct Summarizer {
    search: Arc<dyn SearchProvider>,
    provider: Arc<dyn CompletionProvider>,
    config: SummarizerConfig,
}

impl Summarizer {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        provider: Arc<dyn CompletionProvider>,
        config: SummarizerConfig,
    ) -> Self {
        Self {
            search,
            provider,
            config,
        }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Run the search phase for a title.
    pub async fn search_content(&self, title: &str) -> Result<String, Error> {
        let query = format!("{} {}", title, SEARCH_SUFFIX);
        debug!(query = %query, backend = self.search.name(), "searching");
        self.search.search(&query).await
    }

    /// Run the completion phase against already-fetched search text.
    ///
    /// Empty or whitespace-only content short-circuits to
    /// `Summary::NoResults` without touching the provider. Completion
    /// failures are folded into `Summary::Failed`.
    pub async fn summarize_content(
        &self,
        title: &str,
        persona: Persona,
        content: &str,
    ) -> Summary {
        if content.trim().is_empty() {
            return Summary::NoResults;
        }

        let prompt = persona.template().fill(title, content);
        let request = CompletionRequest::new(vec![Message::user(prompt)])
            .with_model(self.config.model.clone())
            .with_temperature(self.config.temperature);
        let request = match self.config.max_tokens {
            Some(n) => request.with_max_tokens(n),
            None => request,
        };

        match self.provider.complete(request).await {
            Ok(response) => Summary::Text(response.message.content),
            Err(err) => {
                warn!(error = %err, "completion failed");
                Summary::Failed(err.to_string())
            }
        }
    }

    /// Full pipeline: search, then summarize.
    pub async fn summarize(&self, title: &str, persona: Persona) -> Result<Summary, Error> {
        let content = self.search_content(title).await?;
        Ok(self.summarize_content(title, persona, &content).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockProvider, MockSearch};

    fn summarizer(search: Arc<MockSearch>, provider: Arc<MockProvider>) -> Summarizer {
        Summarizer::new(search, provider, SummarizerConfig::default())
    }

    #[tokio::test]
    async fn test_empty_search_short_circuits() {
        for blank in ["", "   "] {
            let search = Arc::new(MockSearch::new());
            search.queue_result(blank);
            let provider = Arc::new(MockProvider::new());

            let s = summarizer(Arc::clone(&search), Arc::clone(&provider));
            let summary = s.summarize("The Snow Queen", Persona::Educator).await.unwrap();

            assert_eq!(summary, Summary::NoResults);
            assert_eq!(summary.display_text(), NO_RESULTS_MESSAGE);
            assert_eq!(provider.request_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_successful_summary_returned_verbatim() {
        let search = Arc::new(MockSearch::new());
        search.queue_result("A girl with a red hood meets a wolf.");
        let provider = Arc::new(MockProvider::new());
        provider.queue_response("SUMMARY_TEXT");

        let s = summarizer(Arc::clone(&search), Arc::clone(&provider));
        let summary = s
            .summarize("Little Red Riding Hood", Persona::Psychologist)
            .await
            .unwrap();

        assert_eq!(summary, Summary::Text("SUMMARY_TEXT".to_string()));
        assert_eq!(summary.display_text(), "SUMMARY_TEXT");
        assert_eq!(provider.request_count(), 1);
    }

    #[tokio::test]
    async fn test_prompt_contains_title_and_search_text() {
        let search = Arc::new(MockSearch::new());
        search.queue_result("wolf content here");
        let provider = Arc::new(MockProvider::new());
        provider.queue_response("ok");

        let s = summarizer(Arc::clone(&search), Arc::clone(&provider));
        s.summarize("Little Red Riding Hood", Persona::Psychologist)
            .await
            .unwrap();

        let request = provider.last_request().unwrap();
        assert_eq!(request.model, Some("gpt-4".to_string()));
        assert_eq!(request.temperature, Some(0.7));
        let prompt = &request.messages[0].content;
        assert!(prompt.contains("Little Red Riding Hood"));
        assert!(prompt.contains("wolf content here"));

        let query = &search.captured_queries()[0];
        assert!(query.starts_with("Little Red Riding Hood"));
        assert!(query.ends_with("fairy tale summary"));
    }

    #[tokio::test]
    async fn test_completion_failure_is_recovered() {
        let search = Arc::new(MockSearch::new());
        search.queue_result("some content");
        let provider = Arc::new(MockProvider::new());
        provider.queue_error(Error::api(500, "model overloaded"));

        let s = summarizer(search, provider);
        let summary = s.summarize("Hansel and Gretel", Persona::Educator).await.unwrap();

        assert!(summary.is_failure());
        let text = summary.display_text();
        assert!(text.starts_with(FAILURE_PREFIX));
        assert!(text.contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let search = Arc::new(MockSearch::new());
        search.queue_failure(Error::network("connection refused"));
        let provider = Arc::new(MockProvider::new());

        let s = summarizer(search, Arc::clone(&provider));
        let err = s.summarize("Thumbelina", Persona::Educator).await.unwrap_err();

        assert!(err.to_string().contains("connection refused"));
        assert_eq!(provider.request_count(), 0);
    }
}
