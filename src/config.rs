use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Which store backs the application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL through SeaORM
    Postgres,
    /// In-process store, optionally snapshotted to a JSON file
    Local,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(ConfigError::Invalid("STORAGE_BACKEND")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub data_file: Option<PathBuf>,

    // Server
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Local,
        };

        let database_url = env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        Ok(Self {
            // Storage
            storage_backend,
            database_url,
            data_file: env::var("DATA_FILE").ok().map(PathBuf::from),

            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            cors_origin: env::var("CORS_ORIGIN").ok(),
        })
    }

    /// In-memory configuration, used by tests and local experiments
    pub fn in_memory() -> Self {
        Self {
            storage_backend: StorageBackend::Local,
            database_url: None,
            data_file: None,
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origin: None,
        }
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
