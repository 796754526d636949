use std::sync::Arc;

use trener_ai::LlmClient;
use trener_notify::MatrixNotifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is a pool handle or behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: trener_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Chat-completion backend (OpenAI-compatible in production).
    pub llm: Arc<dyn LlmClient>,
    /// Chat-room notifier.
    pub notifier: Arc<MatrixNotifier>,
}
