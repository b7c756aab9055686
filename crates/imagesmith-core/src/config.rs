//! Configuration module
//!
//! Startup configuration for the API server and the upload gate. Values come
//! from the environment (optionally seeded from a `.env` file) and are
//! immutable once the server is running.

use std::env;

// Common constants
const SERVER_PORT: u16 = 5000;
const MAX_FILE_SIZE_MB: usize = 20;
const MAX_DIMENSION: u32 = 10_000;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const DEFAULT_ALLOWED_EXTENSIONS: &str = "png,jpg,jpeg,gif";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub allowed_extensions: Vec<String>,
    pub max_file_size_bytes: usize,
    /// Largest accepted resize target on either axis
    pub max_dimension: u32,
    /// In-flight request cap for the HTTP server
    pub http_concurrency_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            allowed_extensions: split_list(DEFAULT_ALLOWED_EXTENSIONS),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            max_dimension: MAX_DIMENSION,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Unparseable numbers fall back to their defaults, the same way unset
    /// variables do.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = lookup("SERVER_PORT")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(SERVER_PORT);

        let cors_origins = split_list(&lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string()));

        let allowed_extensions = split_list(
            &lookup("ALLOWED_EXTENSIONS").unwrap_or_else(|| DEFAULT_ALLOWED_EXTENSIONS.to_string()),
        )
        .into_iter()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .collect();

        let max_file_size_mb = lookup("MAX_FILE_SIZE_MB")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);

        let max_dimension = lookup("MAX_DIMENSION")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(MAX_DIMENSION);

        let http_concurrency_limit = lookup("HTTP_CONCURRENCY_LIMIT")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(HTTP_CONCURRENCY_LIMIT)
            .max(1);

        let config = Config {
            server_port,
            cors_origins,
            environment,
            allowed_extensions,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_dimension,
            http_concurrency_limit,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.max_dimension == 0 {
            return Err(anyhow::anyhow!("MAX_DIMENSION must be greater than 0"));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
