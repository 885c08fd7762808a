//! Groq chat-completion provider.
//!
//! Groq exposes an OpenAI-compatible `chat/completions` endpoint authenticated
//! with a bearer key.

use super::{Completion, CompletionClient, CompletionRequest, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use service_core::observability::TracedClientExt;
use std::time::Duration;

/// Default Groq API base URL.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Groq provider configuration.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

/// Groq completion client.
pub struct GroqClient {
    config: GroqConfig,
    client: Client,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Whether an API key has been provided.
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.expose_secret().is_empty()
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn require_key(&self) -> Result<&str, ProviderError> {
        if self.is_configured() {
            Ok(self.config.api_key.expose_secret())
        } else {
            Err(ProviderError::NotConfigured(
                "GROQ_API_KEY not configured".to_string(),
            ))
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let api_key = self.require_key()?;
        let url = self.api_url("chat/completions");

        tracing::debug!(
            model = %request.model,
            message_count = request.messages.len(),
            max_tokens = request.max_tokens,
            "Sending request to Groq API"
        );

        let response = self
            .client
            .traced_post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Groq API error {}: {}",
                status, error_text
            )));
        }

        let completion: Completion = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                input_tokens = usage.prompt_tokens,
                output_tokens = usage.completion_tokens,
                "Groq completion finished"
            );
        }

        Ok(completion)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        let api_key = self.require_key()?;

        let response = self
            .client
            .traced_get(&self.api_url("models"))
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: &str, base_url: &str) -> GroqClient {
        GroqClient::new(GroqConfig {
            api_key: Secret::new(api_key.to_string()),
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn api_url_joins_without_double_slash() {
        let groq = client("key", "http://localhost:9999/v1/");
        assert_eq!(
            groq.api_url("chat/completions"),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let groq = client("", GROQ_API_BASE);
        assert!(!groq.is_configured());

        let request = CompletionRequest {
            model: "m".to_string(),
            messages: vec![],
            temperature: 0.7,
            max_tokens: 800,
        };
        let result = groq.complete(&request).await;
        assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
    }
}
