//! Recipe generation pipeline: prompt, one completion call, parse, validate.

use crate::models::RecipeResult;
use crate::services::metrics::{record_generation, record_provider_latency};
use crate::services::prompt::build_recipe_prompt;
use crate::services::providers::{ChatMessage, CompletionClient, CompletionRequest, ProviderError};
use serde_json::Value;
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Sampling temperature for recipe generation.
pub const RECIPE_TEMPERATURE: f32 = 0.7;

/// Upper bound on generated tokens.
pub const RECIPE_MAX_TOKENS: u32 = 800;

/// Ways a generation can fail after the request was accepted.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Upstream(#[from] ProviderError),

    #[error("Completion response contained no message content")]
    MissingContent,

    #[error("Model output is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Model output does not match the recipe schema: {0}")]
    SchemaMismatch(String),
}

impl GenerationError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Upstream(_) => "upstream",
            GenerationError::MissingContent => "missing_content",
            GenerationError::InvalidJson(_) => "invalid_json",
            GenerationError::SchemaMismatch(_) => "schema_mismatch",
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

/// Turns an ingredient list into a parsed recipe using a completion client.
#[derive(Clone)]
pub struct RecipeGenerator {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl RecipeGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn client(&self) -> &Arc<dyn CompletionClient> {
        &self.client
    }

    /// Request shape sent upstream for `ingredients`.
    pub fn completion_request(&self, ingredients: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(build_recipe_prompt(ingredients))],
            temperature: RECIPE_TEMPERATURE,
            max_tokens: RECIPE_MAX_TOKENS,
        }
    }

    /// Generate a recipe and return the model's JSON object as parsed.
    ///
    /// The value is checked against [`RecipeResult`] but returned untouched.
    #[tracing::instrument(skip(self, ingredients), fields(model = %self.model))]
    pub async fn generate(&self, ingredients: &str) -> Result<Value, GenerationError> {
        let result = self.run(ingredients).await;
        match &result {
            Ok(_) => record_generation("success"),
            Err(e) => record_generation(e.kind()),
        }
        result
    }

    async fn run(&self, ingredients: &str) -> Result<Value, GenerationError> {
        let request = self.completion_request(ingredients);

        let started = Instant::now();
        let completion = self.client.complete(&request).await;
        record_provider_latency(started.elapsed());
        let completion = completion?;

        let content = completion
            .first_content()
            .ok_or(GenerationError::MissingContent)?;
        tracing::info!(raw_response = %content, "Received completion");

        parse_recipe(content)
    }
}

/// Parse model output as JSON and check it against the recipe schema.
pub fn parse_recipe(content: &str) -> Result<Value, GenerationError> {
    let value: Value = serde_json::from_str(content).map_err(GenerationError::InvalidJson)?;

    serde_json::from_value::<RecipeResult>(value.clone())
        .map_err(|e| GenerationError::SchemaMismatch(e.to_string()))?;

    Ok(value)
}
