/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`). Routine generation
    /// and the chat wait on the model inside this budget.
    pub request_timeout_secs: u64,
    /// SQLite database URL.
    pub database_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                            |
    /// |------------------------|----------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                          |
    /// | `PORT`                 | `8000`                                             |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://localhost:3001`      |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                                               |
    /// | `DATABASE_URL`         | `sqlite://trener.db?mode=rwc`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://trener.db?mode=rwc".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
        }
    }
}
