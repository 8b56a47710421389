/// Main Application: painel Meta Vendedores
///
/// O serviço é um proxy fino: toda regra de negócio vive no backend de
/// automação (n8n), alcançado por webhooks fixos. Aqui ficam só o
/// encaminhamento das operações, a normalização das respostas e o cookie de
/// sessão do painel.
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use meta_vendedores_middleware::{api_router, config::Settings, services, utils, AppState};

use services::N8nApiService;
use utils::logging::*;
use utils::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Carregar variáveis de ambiente do arquivo .env (se existir)
    if dotenvy::dotenv().is_err() {
        // Em produção não existe .env - variáveis vêm do ambiente
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Inicializar tracing
    tracing_subscriber::fmt::init();

    // Carregar configurações
    let settings = Settings::new()
        .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    // Cliente HTTP compartilhado para todas as operações do n8n
    let n8n = N8nApiService::new(reqwest::Client::new(), settings.webhook.base_url.clone());
    log_info(&format!(
        "🔗 Webhook backend: {}",
        settings.webhook.base_url
    ));

    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        n8n,
    });

    let app = api_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Em plataformas gerenciadas a porta vem da variável PORT
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let listener = TcpListener::bind(format!("{}:{}", settings.server.host, port)).await?;

    log_server_startup(port);
    log_server_ready(port);

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
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
