use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const DEFAULT_DATABASE_PATH: &str = "expenses.db";
pub const DEFAULT_CATEGORIES_PATH: &str = "categories.json";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Contents of `expense-tracker.toml`; every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TrackerConfig {
    pub database: Option<String>,
    pub categories: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved settings handed to the store, resource and server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database: PathBuf,
    pub categories: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE_PATH),
            categories: PathBuf::from(DEFAULT_CATEGORIES_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Layer explicit overrides over the file over the defaults.
    pub fn resolve(file: Option<TrackerConfig>, overrides: TrackerConfig) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();
        Self {
            database: overrides
                .database
                .or(file.database)
                .map(PathBuf::from)
                .unwrap_or(defaults.database),
            categories: overrides
                .categories
                .or(file.categories)
                .map(PathBuf::from)
                .unwrap_or(defaults.categories),
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid listen address {}:{}: {e}", self.host, self.port)))
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("expense-tracker.toml")
}

pub fn load_config(path: Option<&Path>) -> Result<Option<TrackerConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TrackerConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &TrackerConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::Config(e.to_string()))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::resolve(None, TrackerConfig::default());
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = TrackerConfig {
            database: Some("file.db".into()),
            port: Some(9000),
            ..Default::default()
        };
        let overrides = TrackerConfig {
            port: Some(7000),
            ..Default::default()
        };
        let config = ServerConfig::resolve(Some(file), overrides);
        assert_eq!(config.database, PathBuf::from("file.db"));
        assert_eq!(config.port, 7000);
        assert_eq!(config.categories, PathBuf::from(DEFAULT_CATEGORIES_PATH));
    }

    #[test]
    fn test_bad_host_is_config_error() {
        let config = ServerConfig {
            host: "not a host".into(),
            ..Default::default()
        };
        assert!(matches!(config.socket_addr(), Err(Error::Config(_))));
    }

    #[test]
    fn test_write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expense-tracker.toml");
        let config = TrackerConfig {
            database: Some("ledger.db".into()),
            port: Some(8000),
            ..Default::default()
        };

        write_config(&path, &config, false).unwrap();
        assert!(matches!(write_config(&path, &config, false), Err(Error::Config(_))));
        write_config(&path, &config, true).unwrap();

        assert_eq!(load_config(Some(path.as_path())).unwrap(), Some(config));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expense-tracker.toml");
        std::fs::write(&path, "port = \"not a number\"").unwrap();
        assert!(matches!(load_config(Some(path.as_path())), Err(Error::Config(_))));
    }

    #[test]
    fn test_write_into_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("expense-tracker.toml");
        let result = write_config(&path, &TrackerConfig::default(), false);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(Some(dir.path().join("nope.toml").as_path())).unwrap().is_none());
    }
}
