//! Configuration loading and resolution.
//!
//! Each setting comes from the command line if given, then the environment,
//! then the built-in default.

use std::time::Duration;

use sandtimer::{TimerClient, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};

pub const HOST_ENV: &str = "SANDTIMER_HOST";
pub const PORT_ENV: &str = "SANDTIMER_PORT";
pub const TIMEOUT_ENV: &str = "SANDTIMER_TIMEOUT";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Sandtimer host must not be empty")]
    EmptyHost,

    #[error("Invalid sandtimer port {value:?}: expected 1-65535")]
    InvalidPort { value: String },

    #[error("Invalid timeout {value:?}: expected whole seconds")]
    InvalidTimeout { value: String },
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout_secs: Option<u64>,
}

/// Where the sandtimer display listens and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Zero disables the connect and write deadlines.
    pub timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// Resolve against the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match overrides.host.or_else(|| lookup(HOST_ENV)) {
            Some(host) => host.trim().to_string(),
            None => defaults.host,
        };
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        let port = match (overrides.port, lookup(PORT_ENV)) {
            (Some(port), _) => port,
            (None, Some(raw)) => parse_port(&raw)?,
            (None, None) => defaults.port,
        };
        if port == 0 {
            return Err(ConfigError::InvalidPort {
                value: port.to_string(),
            });
        }

        let timeout = match (overrides.timeout_secs, lookup(TIMEOUT_ENV)) {
            (Some(secs), _) => Duration::from_secs(secs),
            (None, Some(raw)) => parse_timeout(&raw)?,
            (None, None) => defaults.timeout,
        };

        Ok(Self {
            host,
            port,
            timeout,
        })
    }

    pub fn timer_client(&self) -> TimerClient {
        TimerClient::new(self.host.clone(), self.port, self.timeout)
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort {
            value: raw.to_string(),
        })
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidTimeout {
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::resolve_with(ConfigOverrides::default(), env(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 61420);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = ServerConfig::resolve_with(
            ConfigOverrides::default(),
            env(&[(HOST_ENV, "timer.local"), (PORT_ENV, " 7000 "), (TIMEOUT_ENV, "0")]),
        )
        .unwrap();
        assert_eq!(config.host, "timer.local");
        assert_eq!(config.port, 7000);
        assert_eq!(config.timeout, Duration::ZERO);
    }

    #[test]
    fn test_cli_overrides_environment() {
        let overrides = ConfigOverrides {
            host: Some("10.0.0.2".into()),
            port: Some(9000),
            timeout_secs: Some(1),
        };
        let config = ServerConfig::resolve_with(
            overrides,
            env(&[(HOST_ENV, "ignored"), (PORT_ENV, "not a port"), (TIMEOUT_ENV, "x")]),
        )
        .unwrap();
        assert_eq!(config.host, "10.0.0.2");
        assert_eq!(config.port, 9000);
        assert_eq!(config.timeout, Duration::from_secs(1));

        let client = config.timer_client();
        assert_eq!(client.host(), "10.0.0.2");
        assert_eq!(client.port(), 9000);
    }

    #[test]
    fn test_invalid_values() {
        let resolve = |pairs: &[(&str, &str)]| {
            ServerConfig::resolve_with(ConfigOverrides::default(), env(pairs)).unwrap_err()
        };
        assert_eq!(resolve(&[(HOST_ENV, "  ")]), ConfigError::EmptyHost);
        assert!(matches!(resolve(&[(PORT_ENV, "70000")]), ConfigError::InvalidPort { .. }));
        assert!(matches!(resolve(&[(PORT_ENV, "0")]), ConfigError::InvalidPort { .. }));
        assert!(matches!(
            resolve(&[(TIMEOUT_ENV, "1.5")]),
            ConfigError::InvalidTimeout { .. }
        ));

        let zero_port = ConfigOverrides {
            port: Some(0),
            ..Default::default()
        };
        assert!(ServerConfig::resolve_with(zero_port, env(&[])).is_err());
    }
}
