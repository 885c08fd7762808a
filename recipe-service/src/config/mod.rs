use secrecy::{ExposeSecret, Secret};
use service_core::config::{self as core_config, get_env, is_production};
use service_core::error::AppError;
use std::time::Duration;

use crate::services::providers::groq::GROQ_API_BASE;

/// Model used when `GROQ_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Matches the HTTP client timeout used for other hosted model providers.
const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone)]
pub struct RecipeConfig {
    pub common: core_config::Config,
    pub groq: GroqSettings,
    pub provider: ProviderKind,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GroqSettings {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl GroqSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }
}

/// Which completion backend to wire into the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    Mock,
}

impl std::str::FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Unknown COMPLETION_PROVIDER '{}', expected 'groq' or 'mock'",
                other
            ))),
        }
    }
}

impl RecipeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = is_production();

        // The key may be absent outside production; requests then fail upstream.
        let api_key = get_env("GROQ_API_KEY", Some(""), is_prod)?;

        let timeout_seconds = get_env(
            "GROQ_TIMEOUT_SECONDS",
            Some(&DEFAULT_TIMEOUT_SECONDS.to_string()),
            is_prod,
        )?
        .parse()
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Ok(RecipeConfig {
            common,
            groq: GroqSettings {
                api_key: Secret::new(api_key),
                base_url: get_env("GROQ_BASE_URL", Some(GROQ_API_BASE), is_prod)?,
                model: get_env("GROQ_MODEL", Some(DEFAULT_MODEL), is_prod)?,
                timeout_seconds,
            },
            provider: get_env("COMPLETION_PROVIDER", Some("groq"), is_prod)?.parse()?,
            otlp_endpoint: std::env::var("OTLP_ENDPOINT")
                .ok()
                .filter(|s| !s.is_empty()),
        })
    }
}
