use std::{env, net::SocketAddr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    Redis,
    Sql,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub storage: StorageKind,
    pub redis_url: String,
    pub database_url: Option<String>,
    pub cors_origin: String,
    pub log_filter: String,
    pub log_format: LogFormat,
    pub otlp_endpoint: Option<String>,
}

const DEFAULT_LOG_FILTER: &str = "info,daycare_ops=info,sqlx=warn,sea_orm=warn";

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a local `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = get("BIND_ADDR", "0.0.0.0:8000")
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let storage = match get("STORAGE_BACKEND", "memory").as_str() {
            "memory" => StorageKind::Memory,
            "redis" => StorageKind::Redis,
            "sql" => StorageKind::Sql,
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    message: format!("expected memory, redis or sql, got {other}"),
                })
            }
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if storage == StorageKind::Sql && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let log_format = match get("RUST_LOG_FORMAT", "text").as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Invalid {
                    key: "RUST_LOG_FORMAT",
                    message: format!("expected text or json, got {other}"),
                })
            }
        };

        Ok(Self {
            bind_addr,
            storage,
            redis_url: get("REDIS_URL", "redis://localhost:6379"),
            database_url,
            cors_origin: get("CORS_ORIGIN", "http://localhost:3000"),
            log_filter: get("RUST_LOG", DEFAULT_LOG_FILTER),
            log_format,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty()),
        })
    }
}
