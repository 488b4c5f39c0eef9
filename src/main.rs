/// Serviço de triagem de e-mails
///
/// Fluxo:
/// - Recebe um arquivo (PDF/TXT) ou texto em POST /process
/// - Classifica o e-mail como produtivo ou improdutivo via Ollama
/// - Gera, limpa e compõe a resposta automática

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use email_triage_service::{config::Settings, handlers, services::PromptCatalog, utils, AppState};
use ia_service::{IaServiceConfig, InferenceBackend, OllamaClient};
use utils::{logging::*, AppError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 🔧 Carregar variáveis de ambiente do arquivo .env (se existir)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Inicializar tracing (RUST_LOG controla o nível, padrão info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if dotenv_loaded {
        tracing::info!("✅ Arquivo .env carregado com sucesso");
    } else {
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Carregar configurações
    let settings = Settings::new()
        .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    // Prompts e mensagens padrão
    let catalog = Arc::new(PromptCatalog::load(&settings.prompts.dir));

    // Cliente de inferência
    let ia_config = IaServiceConfig::new(settings.inference.base_url.clone())
        .with_model(settings.inference.model.clone())
        .with_timeout(settings.inference.timeout());
    let inference: Arc<dyn InferenceBackend> = Arc::new(OllamaClient::new(ia_config)?);

    log_info(&format!(
        "🤖 Inference backend: {} em {}",
        inference.model_name(),
        settings.inference.base_url
    ));

    // Iniciar servidor
    // PORT tem prioridade sobre o arquivo de configuração
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let host = settings.server.host.clone();

    let state = Arc::new(AppState::new(settings, inference, catalog));
    let app = handlers::router(state);

    let listener = TcpListener::bind(format!("{}:{}", host, port)).await?;

    log_server_startup(port);
    log_server_ready(&host, port);

    // Graceful shutdown com signal handling
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_error(&format!("Failed to install Ctrl+C handler: {}", e));
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
                log_error(&format!("Failed to install SIGTERM handler: {}", e));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
