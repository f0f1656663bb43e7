//! Server settings read from the environment.
//!
//! | Variable                  | Default     |
//! |---------------------------|-------------|
//! | `STUDENT_ID_HOST`         | `127.0.0.1` |
//! | `STUDENT_ID_PORT`         | `8080`      |
//! | `STUDENT_ID_OPEN_BROWSER` | `true`      |

use thiserror::Error;

pub const HOST_VAR: &str = "STUDENT_ID_HOST";
pub const PORT_VAR: &str = "STUDENT_ID_PORT";
pub const OPEN_BROWSER_VAR: &str = "STUDENT_ID_OPEN_BROWSER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Open the app in the default browser once the server is up.
    pub open_browser: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },
    #[error("{var} must be true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            open_browser: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from `lookup`, which maps a variable name to its
    /// value. Unset or blank variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(host) = get(HOST_VAR) {
            config.host = host;
        }
        if let Some(port) = get(PORT_VAR) {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort {
                var: PORT_VAR,
                value: port.clone(),
            })?;
        }
        if let Some(flag) = get(OPEN_BROWSER_VAR) {
            config.open_browser = parse_flag(&flag).ok_or(ConfigError::InvalidFlag {
                var: OPEN_BROWSER_VAR,
                value: flag.clone(),
            })?;
        }
        Ok(config)
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn reads_every_variable() {
        let config = ServerConfig::from_lookup(lookup(&[
            (HOST_VAR, "0.0.0.0"),
            (PORT_VAR, " 9000 "),
            (OPEN_BROWSER_VAR, "off"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert!(!config.open_browser);
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[(HOST_VAR, "  "), (PORT_VAR, "")])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn rejects_bad_port_and_flag() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[(PORT_VAR, "80800")])),
            Err(ConfigError::InvalidPort {
                var: PORT_VAR,
                value: "80800".to_string(),
            })
        );
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[(OPEN_BROWSER_VAR, "maybe")])),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }
}
