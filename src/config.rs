//! Server configuration, populated from environment variables.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HOST` | `0.0.0.0` | Interface to bind |
//! | `PORT` | `8080` | TCP port to listen on |
//! | `CORS_ALLOW_ORIGIN` | (absent = any origin) | Single origin allowed by CORS |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CORS_ALLOW_ORIGIN is not a valid header value: {0:?}")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// `None` allows any origin.
    pub cors_allow_origin: Option<HeaderValue>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = match lookup("HOST") {
            Some(raw) => raw.parse::<IpAddr>().unwrap_or_else(|_| {
                tracing::warn!(host = %raw, "HOST is not an IP address, using 0.0.0.0");
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            }),
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!(port = %raw, "PORT is not a valid port, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let cors_allow_origin = lookup("CORS_ALLOW_ORIGIN")
            .map(|raw| HeaderValue::from_str(&raw).map_err(|_| ConfigError::InvalidOrigin(raw)))
            .transpose()?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            cors_allow_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(config.cors_allow_origin.is_none());
    }

    #[test]
    fn explicit_values() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("CORS_ALLOW_ORIGIN", "https://blog.example.com"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(
            config.cors_allow_origin,
            Some(HeaderValue::from_static("https://blog.example.com"))
        );
    }

    #[test]
    fn bad_port_falls_back() {
        let config = config_from(&[("PORT", "eighty")]).unwrap();
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn bad_origin_is_an_error() {
        let result = config_from(&[("CORS_ALLOW_ORIGIN", "bad\norigin")]);
        assert!(matches!(result, Err(ConfigError::InvalidOrigin(_))));
    }
}
