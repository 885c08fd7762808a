//! Mock completion client for tests and offline runs.

use super::{Completion, CompletionClient, CompletionRequest, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned recipe returned by `MockCompletionClient::default()`.
pub const SAMPLE_RECIPE: &str = r#"{"name":"Fried Rice","description":"Quick fried rice","ingredients":"egg\nrice\nsoy sauce","instructions":"Step 1. Cook egg\nStep 2. Mix in rice\nStep 3. Add soy sauce","cookingTime":15,"servings":2,"category":"Main","tips":"Use cold rice"}"#;

enum MockBehavior {
    Content(String),
    Completion(Completion),
    NetworkFailure(String),
}

/// Completion client answering every call the same way and counting calls.
pub struct MockCompletionClient {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockCompletionClient {
    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Reply with a single choice whose content is `content`.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Content(content.into()))
    }

    /// Reply with an arbitrary completion, e.g. one without choices.
    pub fn with_completion(completion: Completion) -> Self {
        Self::with_behavior(MockBehavior::Completion(completion))
    }

    /// Fail every call with a transport-level error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::NetworkFailure(message.into()))
    }

    /// Number of `complete` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request passed to `complete`.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::with_content(SAMPLE_RECIPE)
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.behavior {
            MockBehavior::Content(content) => Ok(Completion::from_content(content.clone())),
            MockBehavior::Completion(completion) => Ok(completion.clone()),
            MockBehavior::NetworkFailure(message) => {
                Err(ProviderError::NetworkError(message.clone()))
            }
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.behavior {
            MockBehavior::NetworkFailure(message) => {
                Err(ProviderError::NetworkError(message.clone()))
            }
            _ => Ok(()),
        }
    }
}
