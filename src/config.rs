//! Environment configuration.

use std::net::{Ipv4Addr, SocketAddr};
use thiserror::Error;

use crate::store::PoolConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub log_level: String,
    pub pool: PoolConfig,
}

impl AppConfig {
    pub fn bind_addr(&self) -> SocketAddr { SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port)) }
}

/// Loads `.env` if present, then reads the process environment.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Parses configuration through `lookup` so tests never touch the real environment.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    fn parse<T: std::str::FromStr>(var: &str, raw: String) -> Result<T, ConfigError>
    where
        T::Err: std::fmt::Display,
    {
        raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnvVar { var: var.to_string(), reason: e.to_string() })
    }

    let or_default = |var: &str, default: &str| lookup(var).unwrap_or_else(|_| default.to_string());

    let database_url = lookup("DATABASE_URL").map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;
    let port = parse::<u16>("PORT", or_default("PORT", "8083"))?;
    let log_level = or_default("LOG_LEVEL", "info");
    let defaults = PoolConfig::default();
    let pool = PoolConfig {
        max_connections: parse("DB_MAX_CONNECTIONS", or_default("DB_MAX_CONNECTIONS", &defaults.max_connections.to_string()))?,
        acquire_timeout_secs: parse(
            "DB_ACQUIRE_TIMEOUT_SECS",
            or_default("DB_ACQUIRE_TIMEOUT_SECS", &defaults.acquire_timeout_secs.to_string()),
        )?,
    };

    Ok(AppConfig { database_url, port, log_level, pool })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, std::env::VarError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned().ok_or(std::env::VarError::NotPresent)
    }

    #[test]
    fn test_defaults() {
        let config = build_app_config(lookup(&[("DATABASE_URL", "postgres://localhost/shop")])).unwrap();
        assert_eq!(config.port, 8083);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.pool.max_connections, 10);
        assert_eq!(config.pool.acquire_timeout_secs, 10);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8083");
    }

    #[test]
    fn test_missing_database_url() {
        let err = build_app_config(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("DATABASE_URL".to_string()));
    }

    #[test]
    fn test_invalid_port() {
        let err = build_app_config(lookup(&[("DATABASE_URL", "postgres://x"), ("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PORT"));
    }

    #[test]
    fn test_overrides() {
        let config = build_app_config(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("PORT", "9000"),
            ("LOG_LEVEL", "debug"),
            ("DB_MAX_CONNECTIONS", "25"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.pool.max_connections, 25);
    }
}
