//! Server configuration from the environment

use std::net::SocketAddr;
use thiserror::Error;

pub const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
const DEFAULT_DATABASE_PATH: &str = "database.db";
const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("Invalid bind address {0:?}")]
    InvalidBindAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_path: String,
    /// Trace collector (OTLP/gRPC) endpoint
    pub otlp_endpoint: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let otlp_endpoint = lookup(OTLP_ENDPOINT_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar(OTLP_ENDPOINT_VAR))?;

        let bind = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(bind.clone()))?;

        let database_path =
            lookup("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        let environment =
            lookup("DEPLOYMENT_ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        Ok(Config {
            bind_address,
            database_path,
            otlp_endpoint,
            environment,
        })
    }
}
