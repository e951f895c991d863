//! Configuration loading and typed config structures for the catalog service.
//!
//! The configuration lives in `boxoffice-config.yaml` in the working
//! directory (or wherever `BOXOFFICE_CONFIG` points). Every section and
//! field is optional; a missing file means all defaults. A handful of
//! `BOXOFFICE_*` environment variables override the file so deployments
//! can relocate the dataset or port without editing YAML.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use boxoffice_server::ServerConfig;
use serde::Deserialize;

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "boxoffice-config.yaml";

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_VAR: &str = "BOXOFFICE_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value that could not be parsed.
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Env {
        /// The offending variable.
        var: &'static str,
        /// The raw value it held.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ServiceConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Dataset location.
    #[serde(default)]
    pub dataset: DatasetSection,

    /// Static pages.
    #[serde(default)]
    pub pages: PagesSection,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ServiceConfig {
    /// Load configuration from a YAML file. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Override fields from `BOXOFFICE_*` variables resolved by `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `BOXOFFICE_PORT` or
    /// `BOXOFFICE_LOG_FORMAT` cannot be parsed.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("BOXOFFICE_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("BOXOFFICE_PORT") {
            self.server.port = val.parse::<u16>().map_err(|e| ConfigError::Env {
                var: "BOXOFFICE_PORT",
                value: val,
                reason: e.to_string(),
            })?;
        }
        if let Some(val) = lookup("BOXOFFICE_DATA_FILE") {
            self.dataset.path = PathBuf::from(val);
        }
        if let Some(val) = lookup("BOXOFFICE_ROOT_PAGE") {
            self.pages.root = PathBuf::from(val);
        }
        if let Some(val) = lookup("BOXOFFICE_LOG_FORMAT") {
            self.logging.format = val.parse().map_err(|reason| ConfigError::Env {
                var: "BOXOFFICE_LOG_FORMAT",
                value: val,
                reason,
            })?;
        }
        Ok(())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl From<&ServerSection> for ServerConfig {
    fn from(section: &ServerSection) -> Self {
        Self {
            host: section.host.clone(),
            port: section.port,
        }
    }
}

/// Dataset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetSection {
    /// Path to the JSON array of movie records.
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for DatasetSection {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

/// Static page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PagesSection {
    /// HTML document served at `/`.
    #[serde(default = "default_root_page")]
    pub root: PathBuf,
}

impl Default for PagesSection {
    fn default() -> Self {
        Self {
            root: default_root_page(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Resolve the configuration file path from `BOXOFFICE_CONFIG`, falling
/// back to [`DEFAULT_CONFIG_FILE`].
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_VAR).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
}

/// Load configuration from `path` (defaults if it does not exist), then
/// apply the process environment's `BOXOFFICE_*` overrides.
///
/// # Errors
///
/// Propagates [`ConfigError`] from reading, parsing, or overriding.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    load_config_with(path, |var| std::env::var(var).ok())
}

/// [`load_config`] with overrides resolved by `lookup` instead of the
/// process environment.
///
/// # Errors
///
/// Propagates [`ConfigError`] from reading, parsing, or overriding.
pub fn load_config_with(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ServiceConfig, ConfigError> {
    let mut config = if path.exists() {
        ServiceConfig::from_file(path)?
    } else {
        ServiceConfig::default()
    };
    config.apply_overrides(lookup)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("./data/movies.json")
}

fn default_root_page() -> PathBuf {
    PathBuf::from("./pages/root.html")
}

fn default_log_level() -> String {
    "info".to_owned()
}
