// Server configuration

use crate::{ConfigError, ConfigValidator, Result, Validate};
use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};

/// Level names accepted by `vbapi_log::Level::from_str`, after trimming and lower-casing
pub const LOG_LEVELS: [&str; 8] = [
    "trace", "debug", "info", "warn", "warning", "error", "off", "none",
];
pub const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

const MIN_BODY_BYTES: usize = 1024;
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Settings for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request body limit in bytes
    pub max_body_bytes: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_bytes: 64 * 1024,
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        }
    }
}

impl ServerConfig {
    /// Resolve `host:port` to the address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "host {} did not resolve to an address",
                    self.host
                ))
            })
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty(&self.host, "host")?;
        ConfigValidator::is_port(self.port, "port")?;
        ConfigValidator::in_range(
            self.max_body_bytes,
            MIN_BODY_BYTES,
            MAX_BODY_BYTES,
            "max_body_bytes",
        )?;
        let level = normalize(&self.log_level);
        ConfigValidator::one_of(&level.as_str(), &LOG_LEVELS, "log_level")?;
        let format = normalize(&self.log_format);
        ConfigValidator::one_of(&format.as_str(), &LOG_FORMATS, "log_format")?;
        Ok(())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
