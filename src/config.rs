//! Application configuration
//!
//! Layered in the usual order: built-in defaults, then an optional config
//! file, then `SUPPORT_DESK_*` environment variables (e.g.
//! `SUPPORT_DESK_SERVER__PORT=8080` — double underscore separates sections).

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1"
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

/// Persistence settings
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory the file store writes under
    pub data_dir: String,
}

impl AppConfig {
    /// Load configuration, optionally merging a config file
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")
            .map_err(anyhow::Error::from)?
            .set_default("server.port", 4000_i64)
            .map_err(anyhow::Error::from)?
            .set_default("storage.data_dir", "./desk-data")
            .map_err(anyhow::Error::from)?;

        if let Some(path) = config_file {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("SUPPORT_DESK").separator("__"))
            .build()
            .map_err(anyhow::Error::from)?;

        Ok(settings
            .try_deserialize()
            .map_err(anyhow::Error::from)?)
    }

    /// The socket address string the server binds to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.storage.data_dir, "./desk-data");
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "server:\n  port: 9999\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
