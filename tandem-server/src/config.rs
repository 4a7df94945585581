//! Relay configuration.
//!
//! Loaded from environment variables; every setting has a default, so an
//! empty environment yields a working server on port 3000.

use std::collections::HashMap;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default capacity of the lobby command queue.
pub const DEFAULT_LOBBY_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (default: 0.0.0.0).
    pub host: IpAddr,

    /// Listen port (default: 3000).
    pub port: u16,

    /// Reject offers, answers and candidates sent to anyone but the
    /// sender's current partner (default: false).
    pub strict_routing: bool,

    /// Commands buffered ahead of the lobby before sockets start waiting.
    pub lobby_queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            strict_routing: false,
            lobby_queue_capacity: DEFAULT_LOBBY_QUEUE_CAPACITY,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let lobby_queue_capacity = parse_var(vars, "LOBBY_QUEUE_CAPACITY")?
            .unwrap_or(defaults.lobby_queue_capacity);
        if lobby_queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LOBBY_QUEUE_CAPACITY",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host: parse_var(vars, "HOST")?.unwrap_or(defaults.host),
            port: parse_var(vars, "PORT")?.unwrap_or(defaults.port),
            strict_routing: parse_var(vars, "STRICT_ROUTING")?.unwrap_or(defaults.strict_routing),
            lobby_queue_capacity,
        })
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: FromStr>(
    vars: &HashMap<String, String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = vars.get(name) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
        name,
        value: raw.to_string(),
    })
}
