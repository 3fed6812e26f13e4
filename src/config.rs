//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup and handed to the store and the HTTP server;
//! nothing else reads the environment.

use std::env;
use std::str::FromStr;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx connection string, e.g. `sqlite://octofit.db`
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Number of actix-web workers
    pub workers: usize,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
    /// bcrypt work factor used for password hashes
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://octofit.db".to_string(),
            bind_address: "127.0.0.1:8000".to_string(),
            workers: num_cpus::get(),
            max_connections: 5,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            workers: parse_var("WORKERS", defaults.workers)?,
            max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
        })
    }

    /// In-memory database with the cheapest bcrypt cost. For tests only.
    pub fn test_default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            workers: 1,
            max_connections: 1,
            bcrypt_cost: 4,
            ..Self::default()
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
