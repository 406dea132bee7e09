//! HTTP server bind configuration, sourced from the environment.

use std::env;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `BACKEND_HOST` / `BACKEND_PORT`, falling back to `0.0.0.0:3000`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_values(env::var("BACKEND_HOST").ok(), env::var("BACKEND_PORT").ok())
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Result<Self, AppError> {
        let host = host
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match port {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got {raw:?}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_is_absent() {
        let config = ServerConfig::from_values(None, None).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn explicit_values_win() {
        let config =
            ServerConfig::from_values(Some("127.0.0.1".into()), Some("8080".into())).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn garbage_port_is_a_config_error() {
        let err = ServerConfig::from_values(None, Some("not-a-port".into())).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }
}
