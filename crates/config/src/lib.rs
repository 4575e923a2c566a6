//! Configuration model and loader for the zodiac ephemeris service.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 1234;
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_RENDER_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_SITE_TITLE: &str = "Ephemeris Online";

/// Settings for the HTTP service. Every field has a default, so an empty
/// file is a valid configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    pub log_filter: String,
    /// Upper bound on computing one HTML page, in milliseconds.
    pub render_timeout_ms: u64,
    pub site_title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            render_timeout_ms: DEFAULT_RENDER_TIMEOUT_MS,
            site_title: DEFAULT_SITE_TITLE.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("bind_address `{}`", self.bind_address)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        self.socket_addr()?;
        if self.render_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "render_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load a [`ServerConfig`] from a `.toml` file, or YAML for any other extension.
pub fn load_server_config<P: AsRef<Path>>(path: P) -> Result<ServerConfig, ConfigError> {
    let path = path.as_ref();
    let config: ServerConfig = if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            ServerConfig::default()
        } else {
            serde_yaml::from_str(&contents)?
        }
    };
    config.validate()
}
