//! Bootstrap configuration shared by both applications
//!
//! Settings resolve in priority order:
//! 1. Command-line arguments
//! 2. Environment variables (`APP_HOST`, `APP_PORT`, `APP_DEBUG`, `APP_CONFIG`)
//! 3. TOML configuration file
//! 4. Built-in defaults
//!
//! Missing TOML files are not fatal: a warning is logged and defaults apply.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default database name (a `.db` suffix is added when resolving the file)
pub const DEFAULT_DB_NAME: &str = "project3510";

/// Server arguments common to both binaries, flattened into each `Args`
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "APP_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "APP_PORT")]
    pub port: Option<u16>,

    /// Debug logging ("True"/"False", "1"/"0")
    #[arg(long, env = "APP_DEBUG")]
    pub debug: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long = "config", env = "APP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Configuration file layout
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8080
/// debug = false
///
/// [database]
/// name = "project3510"
///
/// [logging]
/// level = "info"
///
/// [wardrobe]
/// api_url = "https://example.supabase.co"
/// api_key = "..."
/// template_user = "..."
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub database: DatabaseSection,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub wardrobe: WardrobeSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSection {
    /// Database name or path to the SQLite file
    pub name: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
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

/// Hosted backend settings for the wardrobe application
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WardrobeSection {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub template_user: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Read and parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: TomlConfig = toml::from_str(&text)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the file when one is given and exists, otherwise fall back to defaults
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) if !path.exists() => {
                warn!(
                    "Config file {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Some(path) => Self::load(path),
        }
    }
}

/// Effective server settings after merging all sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub log_level: String,
}

impl ServerSettings {
    pub fn resolve(args: &ServerArgs, file: &TomlConfig, default_port: u16) -> Self {
        let host = args
            .host
            .clone()
            .or_else(|| file.server.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = args.port.or(file.server.port).unwrap_or(default_port);

        let debug = match args.debug.as_deref() {
            Some(flag) => parse_flag(flag),
            None => file.server.debug.unwrap_or(true),
        };

        let log_level = if debug {
            "debug".to_string()
        } else {
            file.logging.level.clone()
        };

        Self {
            host,
            port,
            debug,
            log_level,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Interpret a textual boolean the way the deployment scripts write them
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Map a database name to the SQLite file that backs it
///
/// A bare name gets a `.db` suffix; anything with an extension is used as-is.
pub fn database_file(name: &str) -> PathBuf {
    let path = PathBuf::from(name);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("db")
    }
}
