//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file (path in
//! `HANTVERK_CONFIG`) overlaid by environment variables:
//!
//! | Variable | Field |
//! |---|---|
//! | `HOST` | `server.host` |
//! | `PORT` | `server.port` |
//! | `DATABASE_URL` | `database.url` |
//! | `DATABASE_NAME` | `database.name` |

use crate::core::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Environment variable holding an optional YAML config path
pub const CONFIG_PATH_VAR: &str = "HANTVERK_CONFIG";

const DEFAULT_DATABASE_NAME: &str = "hantverk";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Document store connection settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string; absent means in-memory storage
    pub url: Option<String>,
    pub name: Option<String>,
}

impl DatabaseConfig {
    /// Database name, falling back to "hantverk"
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_DATABASE_NAME)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            ConfigError::ParseError {
                file: None,
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Overlay values found through `lookup` (normally the process environment)
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                value: port.clone(),
                message: "must be a port number".to_string(),
            })?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|s| !s.is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(name) = lookup("DATABASE_NAME").filter(|s| !s.is_empty()) {
            self.database.name = Some(name);
        }
        Ok(self)
    }

    /// Load the YAML file named by `HANTVERK_CONFIG` (if any), then apply the
    /// process environment
    pub fn load() -> Result<Self> {
        let base = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        base.apply_env(|key| std::env::var(key).ok())
    }

    /// Whether a database URL has been configured
    pub fn database_url_set(&self) -> bool {
        self.database.url.is_some()
    }

    /// Whether a database name has been configured explicitly
    pub fn database_name_set(&self) -> bool {
        self.database.name.is_some()
    }
}
