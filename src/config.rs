//! Application Configuration
//!
//! Layered from built-in defaults, optional TOML files and `IMHOTEP__*`
//! environment variables (highest precedence).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Names an explicit config file; when set the file must exist.
pub const CONFIG_PATH_ENV: &str = "IMHOTEP_CONFIG";

const ENV_PREFIX: &str = "IMHOTEP";
const APP_DIR: &str = "imhotep";
const DEFAULT_FORGOT_PASSWORD_URL: &str = "https://imhotep.example/forgot-password";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub links: LinkSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite database file or `file:` URI
    pub path: PathBuf,
    pub connect_timeout_secs: u64,
    pub query_timeout_secs: u64,
}

impl DatabaseSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkSettings {
    pub forgot_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    pub file: PathBuf,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

impl AppConfig {
    /// Load from the user config dir, `./imhotep.toml` (or `$IMHOTEP_CONFIG`)
    /// and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        if let Some(dir) = dirs::config_dir() {
            let user_file = dir.join(APP_DIR).join("config.toml");
            builder = builder.add_source(File::from(user_file).required(false));
        }

        let local = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => File::from(PathBuf::from(path)).required(true),
            None => File::with_name(APP_DIR).required(false),
        };

        let settings = builder
            .add_source(local)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_settings(settings)
    }

    /// Defaults overlaid with a single file, ignoring the environment.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let settings = Self::defaults()?.add_source(File::from(path)).build()?;
        Self::from_settings(settings)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let data_dir = data_dir();
        let db_path = data_dir.join("imhotep.db");
        let log_path = data_dir.join("imhotep.log");

        Config::builder()
            .set_default("database.path", db_path.to_string_lossy().into_owned())?
            .set_default("database.connect_timeout_secs", 5_i64)?
            .set_default("database.query_timeout_secs", 10_i64)?
            .set_default("links.forgot_password", DEFAULT_FORGOT_PASSWORD_URL)?
            .set_default("log.level", "info")?
            .set_default("log.file", log_path.to_string_lossy().into_owned())
    }

    fn from_settings(settings: Config) -> Result<Self, ConfigError> {
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Message("database.path must not be empty".into()));
        }
        if self.database.connect_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "database.connect_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.database.query_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "database.query_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.links.forgot_password.trim().is_empty() {
            return Err(ConfigError::Message("links.forgot_password must not be empty".into()));
        }
        Ok(())
    }
}
