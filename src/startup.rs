//! Application startup and lifecycle management.
//!
//! Builds the adapters from configuration, wires them into the router, binds
//! the listener, and serves until Ctrl-C or SIGTERM.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::adapters::http::{app_router, RelayAppState, RelaySettings, UploadAppState};
use crate::adapters::{LocalUploadStorage, OpenAIConfig, OpenAIProvider, WatsonAssistant, WatsonConfig};
use crate::config::{AppConfig, ValidationError};
use crate::ports::{AssistantError, AssistantSession, CompletionError, CompletionProvider};

/// Errors that can occur while building the application.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("Failed to build completion provider: {0}")]
    Completion(#[from] CompletionError),

    #[error("Failed to build assistant client: {0}")]
    Assistant(#[from] AssistantError),

    #[error("Failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: axum::Router,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Port 0 binds an ephemeral port; read it back with [`Application::port`].
    pub async fn build(config: AppConfig) -> Result<Self, StartupError> {
        config.validate()?;

        let completion = build_completion_provider(&config)?;
        let assistant = build_assistant(&config)?;
        let storage = LocalUploadStorage::new(&config.upload.directory)
            .with_max_bytes(config.upload.max_bytes);

        tracing::info!(
            model = %config.completion.model,
            session_mode = %config.pipeline.session_mode,
            enrich = config.pipeline.enrich,
            upload_dir = %config.upload.directory.display(),
            "Initialized adapters"
        );

        let relay = RelayAppState {
            assistant,
            completion,
            settings: RelaySettings {
                session_mode: config.pipeline.session_mode,
                enrich: config.pipeline.enrich,
                fallback_message: config.completion.fallback_message.clone(),
            },
        };
        let upload = UploadAppState {
            storage: Arc::new(storage),
        };
        let router = app_router(relay, upload, config.upload.max_bytes);

        let addr = config.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            e
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Assistant bridge listening on port {}", port);

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

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

fn build_completion_provider(
    config: &AppConfig,
) -> Result<Arc<dyn CompletionProvider>, StartupError> {
    let settings = &config.completion;
    let api_key = settings
        .api_key
        .clone()
        .ok_or(ValidationError::MissingRequired("COMPLETION__API_KEY"))?;

    let mut openai = OpenAIConfig::new(api_key)
        .with_base_url(&settings.base_url)
        .with_model(&settings.model)
        .with_max_tokens(settings.max_tokens);
    if let Some(timeout) = settings.timeout() {
        openai = openai.with_timeout(timeout);
    }

    Ok(Arc::new(OpenAIProvider::new(openai)?))
}

fn build_assistant(config: &AppConfig) -> Result<Arc<dyn AssistantSession>, StartupError> {
    let settings = &config.assistant;
    let (Some(api_key), Some(service_url), Some(assistant_id)) = (
        settings.api_key.clone(),
        settings.service_url.clone(),
        settings.assistant_id.clone(),
    ) else {
        return Err(ValidationError::MissingRequired("ASSISTANT__API_KEY").into());
    };

    let mut watson = WatsonConfig::new(api_key, service_url, assistant_id)
        .with_version(&settings.version)
        .with_iam_url(&settings.iam_url);
    if let Some(timeout) = settings.timeout() {
        watson = watson.with_timeout(timeout);
    }

    Ok(Arc::new(WatsonAssistant::new(watson)?))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, draining connections");
}
