use crate::auth::jwt::JwtConfig;

/// Which [`RecordStore`](bagline_db::RecordStore) implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Throwaway in-process tables; data is lost on restart.
    Memory,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Record store settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Required when `backend` is [`StoreBackend::Postgres`].
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Apply the bundled migrations at startup.
    pub run_migrations: bool,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store: StoreConfig,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `8001`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `STORE_BACKEND`            | `postgres`                 |
    /// | `DATABASE_URL`             | -- (required for postgres) |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`                       |
    /// | `RUN_MIGRATIONS`           | `false`                    |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on unparseable values, or when the Postgres backend is selected
    /// without `DATABASE_URL`.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "8001")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend_name = env_or("STORE_BACKEND", "postgres");
        let backend = StoreBackend::parse(&backend_name)
            .unwrap_or_else(|| panic!("Unknown STORE_BACKEND '{backend_name}'"));

        let database_url = std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty());
        assert!(
            backend != StoreBackend::Postgres || database_url.is_some(),
            "DATABASE_URL must be set when STORE_BACKEND=postgres"
        );

        let max_connections: u32 = env_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        let run_migrations: bool = env_or("RUN_MIGRATIONS", "false")
            .parse()
            .expect("RUN_MIGRATIONS must be true or false");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store: StoreConfig {
                backend,
                database_url,
                max_connections,
                run_migrations,
            },
            jwt: JwtConfig::from_env(),
        }
    }

    /// Whether `CORS_ORIGINS` is the wildcard.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}
