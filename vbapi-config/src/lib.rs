//! Configuration management for VbApi
//!
//! Values are JSON scalars in a flat key map. Later sources override
//! earlier ones: defaults, config file, `.env`, process environment, and
//! finally explicit [`ConfigManager::set`] calls.
//!
//! ```
//! use vbapi_config::{ConfigManager, ServerConfig};
//!
//! let mut manager = ConfigManager::with_prefix("VBAPI");
//! manager.load_defaults(&ServerConfig::default()).unwrap();
//! manager.load_vars([("VBAPI_PORT", "9000")]);
//! manager.set("host", "127.0.0.1").unwrap();
//!
//! let config: ServerConfig = manager.load_validated().unwrap();
//! assert_eq!(config.port, 9000);
//! assert_eq!(config.host, "127.0.0.1");
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod server;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use server::ServerConfig;
pub use validation::{ConfigValidator, Validate};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Main configuration manager
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: HashMap<String, Value>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: HashMap::new(),
            env_prefix: Some(prefix.into()),
        }
    }

    /// Seed every field of `defaults`
    pub fn load_defaults<T: Serialize>(&mut self, defaults: &T) -> Result<()> {
        let value = serde_json::to_value(defaults)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        self.merge_object(value);
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn load_env(&mut self) {
        let loader = EnvLoader::new(self.env_prefix.clone());
        self.config.extend(loader.load());
    }

    /// Load configuration from an explicit variable list, filtered by prefix
    pub fn load_vars<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let loader = EnvLoader::new(self.env_prefix.clone());
        self.config.extend(loader.load_from(vars));
    }

    /// Load a `.env` file without touching the process environment.
    ///
    /// An explicit path must exist. Without one, `./.env` is read when
    /// present. Returns whether a file was read.
    pub fn load_dotenv(&mut self, path: Option<&Path>) -> Result<bool> {
        let iter = match path {
            Some(path) => dotenvy::from_path_iter(path)
                .map_err(|e| ConfigError::LoadError(format!("{}: {}", path.display(), e)))?,
            None => match dotenvy::from_filename_iter(".env") {
                Ok(iter) => iter,
                Err(e) if e.not_found() => return Ok(false),
                Err(e) => return Err(ConfigError::LoadError(e.to_string())),
            },
        };

        let mut vars = Vec::new();
        for item in iter {
            vars.push(item.map_err(|e| ConfigError::ParseError(e.to_string()))?);
        }
        self.load_vars(vars);

        Ok(true)
    }

    /// Load configuration from file
    pub fn load_file(&mut self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let data = ConfigLoader::new(format).load_file(path)?;
        self.merge_object(data);
        Ok(())
    }

    /// Load a file, picking the format from its extension
    pub fn load_file_auto(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = ConfigLoader::auto(path)?.load_file(path)?;
        self.merge_object(data);
        Ok(())
    }

    /// Set a configuration value
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.config.insert(key.to_string(), json_value);

        Ok(())
    }

    /// Get a configuration value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .config
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// Build and validate a typed configuration
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let json_value = Value::Object(
            self.config
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );

        let validated: T = serde_json::from_value(json_value)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;

        validated.validate()?;

        Ok(validated)
    }

    fn merge_object(&mut self, value: Value) {
        if let Value::Object(map) = value {
            self.config.extend(map);
        }
    }
}
