//! Application configuration: a `ron` file plus a few environment overrides.
//!
//! ```ron
//! (
//!     connection: (host: "emba.example", page_scheme: https, session_cookie: Some("sessionid=...")),
//!     output_dir: "output",
//!     log_destination: Both,
//! )
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dashboard_engine::{ConnectionConfig, PageScheme};
use dashboard_logging::dash_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;
use super::ui::constants::{DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_FILE};

pub const ENV_HOST: &str = "DASHBOARD_HOST";
pub const ENV_SCHEME: &str = "DASHBOARD_SCHEME";
pub const ENV_SESSION_COOKIE: &str = "DASHBOARD_SESSION_COOKIE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid value in {name}: {message}")]
    Env { name: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub connection: ConnectionConfig,
    /// Directory receiving the rendered page.
    pub output_dir: PathBuf,
    pub page_file: String,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            page_file: DEFAULT_PAGE_FILE.to_string(),
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    pub fn page_path(&self) -> PathBuf {
        self.output_dir.join(&self.page_file)
    }
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, `dashboard.ron` in the working
/// directory is used when present and defaults otherwise.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match explicit {
        Some(path) => read_file(path)?,
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                read_file(path)?
            } else {
                AppConfig::default()
            }
        }
    };
    apply_env_overrides(config, |name| std::env::var(name).ok())
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse(&text).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })?;
    dash_info!("Loaded configuration from {:?}", path);
    Ok(config)
}

fn parse(text: &str) -> Result<AppConfig, String> {
    ron::from_str(text).map_err(|err| err.to_string())
}

pub fn apply_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    if let Some(host) = lookup(ENV_HOST).filter(|value| !value.trim().is_empty()) {
        config.connection.host = host.trim().to_string();
    }
    if let Some(scheme) = lookup(ENV_SCHEME) {
        config.connection.page_scheme =
            scheme
                .parse::<PageScheme>()
                .map_err(|message| ConfigError::Env {
                    name: ENV_SCHEME,
                    message,
                })?;
    }
    if let Some(cookie) = lookup(ENV_SESSION_COOKIE) {
        config.connection.session_cookie = Some(cookie).filter(|value| !value.is_empty());
    }
    Ok(config)
}
