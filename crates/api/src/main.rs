use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trener_ai::{AiConfig, OpenAiClient};
use trener_api::config::ServerConfig;
use trener_api::router::build_app_router;
use trener_api::state::AppState;
use trener_notify::{MatrixConfig, MatrixNotifier};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trener_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = trener_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    trener_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    trener_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Outbound clients ---
    let ai_config = AiConfig::from_env();
    if ai_config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; AI features will answer with fallbacks");
    }
    let llm = OpenAiClient::new(ai_config).expect("Failed to build LLM HTTP client");

    let matrix_config = MatrixConfig::from_env();
    if !matrix_config.is_configured() {
        tracing::warn!("Matrix not configured; notifications will be skipped");
    }
    let notifier = MatrixNotifier::new(matrix_config).expect("Failed to build Matrix HTTP client");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        llm: Arc::new(llm),
        notifier: Arc::new(notifier),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
