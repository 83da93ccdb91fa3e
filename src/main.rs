use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use docqa::application::ports::LlmClientFactory;
use docqa::application::services::{DocumentQaService, ResponseRenderer};
use docqa::infrastructure::llm::OpenAiClientFactory;
use docqa::infrastructure::observability::{TracingConfig, init_tracing};
use docqa::infrastructure::text_processing::CompositeFileLoader;
use docqa::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(&settings.logging, environment));

    let file_loader = Arc::new(CompositeFileLoader::standard(Duration::from_secs(
        settings.extraction.pdf_timeout_seconds,
    )));
    let client_factory: Arc<dyn LlmClientFactory> =
        Arc::new(OpenAiClientFactory::from_settings(&settings.llm)?);

    let state = AppState {
        qa_service: Arc::new(DocumentQaService::new(file_loader, client_factory)),
        renderer: ResponseRenderer::new(),
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(
        %addr,
        base_url = %settings.llm.base_url,
        model = %settings.llm.chat_model,
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
