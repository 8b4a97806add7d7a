//! Server configuration from the environment

use crate::error::{Result, SimulationError};
use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load `.env` if present, then read `PORT` (or `API_PORT`) and `BIND_ADDRESS`
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").or_else(|| lookup("API_PORT")) {
            Some(value) => value.trim().parse::<u16>().map_err(|e| {
                SimulationError::ConfigError(format!("invalid port '{}': {}", value, e))
            })?,
            None => DEFAULT_PORT,
        };

        let bind_address = lookup("BIND_ADDRESS")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Self { bind_address, port })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listen_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_port_prefers_port_over_api_port() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("PORT", "3000"), ("API_PORT", "4000")])).unwrap();
        assert_eq!(config.port, 3000);

        let config = ServerConfig::from_lookup(lookup_from(&[("API_PORT", "4000")])).unwrap();
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, SimulationError::ConfigError(_)));
    }

    #[test]
    fn test_bind_address_override() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("BIND_ADDRESS", "127.0.0.1")])).unwrap();
        assert_eq!(config.listen_address(), "127.0.0.1:8080");
    }
}
