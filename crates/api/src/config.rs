//! Runtime configuration, read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `VAXREG_BIND_ADDR` | `0.0.0.0:8080` |
//! | `VAXREG_LOG_FORMAT` | `json` (`json` or `pretty`) |
//!
//! Log filtering uses `RUST_LOG`.

use std::net::SocketAddr;

use thiserror::Error;

use vaxreg_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("VAXREG_BIND_ADDR '{value}' is not a socket address")]
    InvalidBindAddr { value: String },

    #[error("VAXREG_LOG_FORMAT '{value}' is not one of: json, pretty")]
    InvalidLogFormat { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("VAXREG_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = match bind.parse() {
            Ok(addr) => addr,
            Err(_) => return Err(ConfigError::InvalidBindAddr { value: bind }),
        };

        let log_format = match lookup("VAXREG_LOG_FORMAT") {
            None => LogFormat::default(),
            Some(value) => match LogFormat::parse(&value) {
                Some(format) => format,
                None => return Err(ConfigError::InvalidLogFormat { value }),
            },
        };

        Ok(Self {
            bind_addr,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn overrides_are_read() {
        let cfg = ApiConfig::from_lookup(lookup(&[
            ("VAXREG_BIND_ADDR", "127.0.0.1:9000"),
            ("VAXREG_LOG_FORMAT", "pretty"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[("VAXREG_BIND_ADDR", "localhost")])),
            Err(ConfigError::InvalidBindAddr {
                value: "localhost".to_string()
            })
        );
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("VAXREG_LOG_FORMAT", "xml")])),
            Err(ConfigError::InvalidLogFormat { .. })
        ));
    }
}
