//! Application startup and lifecycle management.

use crate::config::{ProviderKind, RecipeConfig};
use crate::handlers;
use crate::services::RecipeGenerator;
use crate::services::providers::CompletionClient;
use crate::services::providers::groq::{GroqClient, GroqConfig};
use crate::services::providers::mock::MockCompletionClient;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: RecipeGenerator,
}

impl AppState {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            generator: RecipeGenerator::new(client, model),
        }
    }
}

/// Build the completion client selected by configuration.
pub fn completion_client(config: &RecipeConfig) -> Result<Arc<dyn CompletionClient>, AppError> {
    match config.provider {
        ProviderKind::Groq => {
            let client = GroqClient::new(GroqConfig {
                api_key: config.groq.api_key.clone(),
                base_url: config.groq.base_url.clone(),
                timeout: config.groq.timeout(),
            })
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e.to_string())))?;

            if client.is_configured() {
                tracing::info!(model = %config.groq.model, "Initialized Groq completion client");
            } else {
                tracing::warn!("GROQ_API_KEY not configured - recipe generation will fail");
            }

            Ok(Arc::new(client))
        }
        ProviderKind::Mock => {
            tracing::warn!("Using mock completion client");
            Ok(Arc::new(MockCompletionClient::default()))
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route("/generate-recipe", post(handlers::generate_recipe))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let client = completion_client(&config)?;
        Self::build_with_client(config, client).await
    }

    /// Build the application around an explicit completion client.
    pub async fn build_with_client(
        config: RecipeConfig,
        client: Arc<dyn CompletionClient>,
    ) -> Result<Self, AppError> {
        let state = AppState::new(client, config.groq.model.clone());
        let router = build_router(state);

        // Port 0 binds a random port, used by the tests.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("SavorAI Backend running on port {}", port);
        tracing::info!(
            "API Key configured: {}",
            if config.groq.has_api_key() { "Yes" } else { "No" }
        );

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve requests until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
