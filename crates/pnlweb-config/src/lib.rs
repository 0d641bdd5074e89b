//! Configuration management for pnlweb
//!
//! This crate handles the YAML application config plus the two
//! process-wide tables every report view reads: route paths and labels.

pub mod error;
pub mod labels;
pub mod routes;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};
pub use labels::ReportsLabels;
pub use routes::ReportsRoutes;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Report data settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// Fixture JSON backing the report data source
    #[serde(default)]
    pub fixtures: Option<PathBuf>,
}

/// Storage-backed file serving
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one sub-directory per container
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
    /// Container objects are read from
    #[serde(default = "default_container")]
    pub container: String,
    /// URL prefix the file handler is mounted under
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            container: default_container(),
            route_prefix: default_route_prefix(),
        }
    }
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./storage")
}

fn default_container() -> String {
    "images".to_string()
}

fn default_route_prefix() -> String {
    routes::STORAGE_IMAGES_PREFIX.to_string()
}

/// Static asset copying
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Copy bundled assets here at boot when set
    #[serde(default)]
    pub target_dir: Option<PathBuf>,
    /// Copy from this directory instead of the embedded bundle
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    /// Sub-directory of `target_dir` the files land in
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            target_dir: None,
            source_dir: None,
            namespace: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    "pnlweb".to_string()
}

/// Optional JSON overlays for routes and labels
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OverlaysConfig {
    #[serde(default)]
    pub routes: Option<PathBuf>,
    #[serde(default)]
    pub labels: Option<PathBuf>,
}

/// Application settings passed through to every page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cache-busting token for static asset URLs
    #[serde(default = "default_cache_version")]
    pub cache_version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_version: default_cache_version(),
        }
    }
}

fn default_cache_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Report data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Asset copy settings
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Route and label overlays
    #[serde(default)]
    pub overlays: OverlaysConfig,
    /// Application settings
    #[serde(default)]
    pub app: AppConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = ConfigError::read(path)?;
        let config = Self::from_yaml(&content).map_err(|e| match e {
            ConfigError::InvalidYaml { message, .. } => ConfigError::InvalidYaml {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if !self.storage.route_prefix.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "storage.route_prefix".to_string(),
                reason: "Route prefix must start with '/'".to_string(),
            });
        }

        if self.storage.container.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.container".to_string(),
                reason: "Container name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Route table with the configured overlay applied
    pub fn load_routes(&self) -> ConfigResult<ReportsRoutes> {
        match &self.overlays.routes {
            Some(path) => ReportsRoutes::load_overlay(path),
            None => Ok(ReportsRoutes::default()),
        }
    }

    /// Labels with the configured translation applied
    pub fn load_labels(&self) -> ConfigResult<ReportsLabels> {
        match &self.overlays.labels {
            Some(path) => ReportsLabels::load(path),
            None => Ok(ReportsLabels::default()),
        }
    }

    /// `host:port` string for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
