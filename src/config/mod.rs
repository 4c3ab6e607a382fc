//! Server configuration: an optional TOML file overlaid with `KANBAN_*`
//! environment variables.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding [`Config::listen_addr`].
pub const LISTEN_ADDR_VAR: &str = "KANBAN_LISTEN_ADDR";
/// Environment variable overriding [`Config::database_url`].
pub const DATABASE_URL_VAR: &str = "KANBAN_DATABASE_URL";
/// Environment variable overriding [`Config::db_pool_size`].
pub const DB_POOL_SIZE_VAR: &str = "KANBAN_DB_POOL_SIZE";
/// Environment variable overriding [`Config::log`].
pub const LOG_VAR: &str = "KANBAN_LOG";
/// Environment variable overriding [`Config::log_format`].
pub const LOG_FORMAT_VAR: &str = "KANBAN_LOG_FORMAT";
/// Environment variable overriding [`Config::bootstrap_admin`].
pub const BOOTSTRAP_ADMIN_VAR: &str = "KANBAN_BOOTSTRAP_ADMIN";

const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::V4(std::net::SocketAddrV4::new(std::net::Ipv4Addr::LOCALHOST, 5000));
const DEFAULT_POOL_SIZE: u32 = 8;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human-readable events.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("expected compact or json, got '{other}'")),
        }
    }
}

/// Runtime settings for the server binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,
    /// `PostgreSQL` URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: u32,
    /// `tracing` filter directive, e.g. `info` or `kanban=debug`.
    pub log: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Username of an admin account created at startup if missing.
    pub bootstrap_admin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            database_url: None,
            db_pool_size: DEFAULT_POOL_SIZE,
            log: "info".to_owned(),
            log_format: LogFormat::Compact,
            bootstrap_admin: None,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`Config`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was requested.
        path: String,
        /// Underlying parse failure.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// An environment variable holds an unusable value.
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl Config {
    /// Loads the file at `path`, if any, then applies the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or an
    /// environment override is malformed.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(file) => Self::from_file(file)?,
            None => Self::default(),
        };
        base.with_env(|var| std::env::var(var).ok())
    }

    /// Reads a TOML configuration file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = read_file(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source: Box::new(source),
        })
    }

    /// Applies `KANBAN_*` overrides read through `lookup`. Empty values are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] when an override cannot be
    /// parsed.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        if let Some(value) = read(LISTEN_ADDR_VAR) {
            self.listen_addr = parse_env(LISTEN_ADDR_VAR, &value)?;
        }
        if let Some(value) = read(DATABASE_URL_VAR) {
            self.database_url = Some(value);
        }
        if let Some(value) = read(DB_POOL_SIZE_VAR) {
            self.db_pool_size = parse_env(DB_POOL_SIZE_VAR, &value)?;
        }
        if let Some(value) = read(LOG_VAR) {
            self.log = value;
        }
        if let Some(value) = read(LOG_FORMAT_VAR) {
            self.log_format = parse_env(LOG_FORMAT_VAR, &value)?;
        }
        if let Some(value) = read(BOOTSTRAP_ADMIN_VAR) {
            self.bootstrap_admin = Some(value);
        }
        Ok(self)
    }
}

fn read_file(path: &Utf8Path) -> std::io::Result<String> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(file_name)
}

fn parse_env<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidEnv {
        var,
        value: value.to_owned(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests;
