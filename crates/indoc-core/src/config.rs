//! Configuration module
//!
//! Environment-driven configuration for the API and worker. Values come from
//! the process environment (with `.env` support via dotenvy) and fall back to
//! defaults suitable for local development, except `DATABASE_URL` which is
//! required.

use std::env;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_DOCUMENT_SIZE_MB: usize = 50;
const DEFAULT_TASK_QUEUE_MAX_WORKERS: usize = 4;
const DEFAULT_TASK_QUEUE_POLL_INTERVAL_MS: u64 = 1000;
const DEFAULT_TASK_QUEUE_MAX_RETRIES: i32 = 3;
const DEFAULT_TASK_QUEUE_TIMEOUT_SECS: i32 = 3600;

/// Supported upload extensions (without leading dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "pdf", "docx", "xlsx", "pptx", "txt", "html", "xml", "json", "eml", "png", "jpg", "jpeg",
];

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_document_size_bytes: usize,
    pub document_allowed_extensions: Vec<String>,
    pub task_queue_max_workers: usize,
    pub task_queue_poll_interval_ms: u64,
    pub task_queue_max_retries: i32,
    pub task_queue_default_timeout_seconds: i32,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let document_allowed_extensions = env::var("DOCUMENT_ALLOWED_EXTENSIONS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });

        Ok(Self {
            server_port: parse_env("SERVER_PORT", DEFAULT_SERVER_PORT),
            database_url,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            db_timeout_seconds: parse_env("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            max_document_size_bytes: parse_env(
                "MAX_DOCUMENT_SIZE_MB",
                DEFAULT_MAX_DOCUMENT_SIZE_MB,
            ) * 1024
                * 1024,
            document_allowed_extensions,
            task_queue_max_workers: parse_env(
                "TASK_QUEUE_MAX_WORKERS",
                DEFAULT_TASK_QUEUE_MAX_WORKERS,
            ),
            task_queue_poll_interval_ms: parse_env(
                "TASK_QUEUE_POLL_INTERVAL_MS",
                DEFAULT_TASK_QUEUE_POLL_INTERVAL_MS,
            ),
            task_queue_max_retries: parse_env(
                "TASK_QUEUE_MAX_RETRIES",
                DEFAULT_TASK_QUEUE_MAX_RETRIES,
            ),
            task_queue_default_timeout_seconds: parse_env(
                "TASK_QUEUE_TIMEOUT_SECONDS",
                DEFAULT_TASK_QUEUE_TIMEOUT_SECS,
            ),
        })
    }

    /// Fail fast on nonsensical configuration before the server binds.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.database_url.is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }
        if self.max_document_size_bytes == 0 {
            anyhow::bail!("MAX_DOCUMENT_SIZE_MB must be greater than zero");
        }
        if self.document_allowed_extensions.is_empty() {
            anyhow::bail!("DOCUMENT_ALLOWED_EXTENSIONS must not be empty");
        }
        if self.task_queue_max_workers == 0 {
            anyhow::bail!("TASK_QUEUE_MAX_WORKERS must be greater than zero");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 3000,
            database_url: "postgresql://localhost/indoc".to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 30,
            cors_origins: vec![],
            environment: "development".to_string(),
            max_document_size_bytes: 50 * 1024 * 1024,
            document_allowed_extensions: SUPPORTED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            task_queue_max_workers: 4,
            task_queue_poll_interval_ms: 1000,
            task_queue_max_retries: 3,
            task_queue_default_timeout_seconds: 3600,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_max_size() {
        let mut config = test_config();
        config.max_document_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let mut config = test_config();
        config.document_allowed_extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_supported_extensions_cover_document_formats() {
        for ext in ["pdf", "docx", "xlsx", "pptx", "txt", "html", "xml", "json", "eml", "png",
            "jpg", "jpeg"]
        {
            assert!(SUPPORTED_EXTENSIONS.contains(&ext), "missing {}", ext);
        }
        assert!(!SUPPORTED_EXTENSIONS.contains(&"exe"));
    }
}
