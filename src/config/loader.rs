//! Configuration loader for fixly
//!
//! Loads configuration from layered TOML files and environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment as EnvSource, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for the configuration directory
const CONFIG_DIR_ENV: &str = "FIXLY_CONFIG_DIR";

/// Environment variable for a single configuration file
const CONFIG_FILE_ENV: &str = "FIXLY_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "FIXLY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Layered configuration loader.
///
/// Sources in order of priority:
/// 1. `default.toml` - base configuration (required)
/// 2. `{environment}.toml` - environment-specific (optional)
/// 3. `local.toml` - local overrides (optional)
/// 4. `FIXLY_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if both `FIXLY_CONFIG_DIR` and `FIXLY_CONFIG_FILE`
    /// are set; they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "FIXLY_CONFIG_DIR and FIXLY_CONFIG_FILE cannot both be set. \
                 Use FIXLY_CONFIG_DIR for layered configuration or \
                 FIXLY_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Create a loader pinned to a single configuration file.
    pub fn from_file(path: PathBuf) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path),
            environment: AppEnvironment::from_env(),
        }
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Override the detected environment (e.g. from a CLI flag).
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Load configuration from all sources.
    ///
    /// If a single file is pinned, only that file and environment variables
    /// are read. Otherwise layered loading applies. Missing files are only
    /// an error for `default.toml`; partial layers fall back to serde
    /// defaults.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            self.add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // FIXLY_SERVER__PORT -> server.port
        let builder = builder.add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = self.add_file_source(builder, &default_path, false)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = self.add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        self.add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        Ok(builder.add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(required),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_from_single_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[server]\nport = 4000\n\n[database]\nurl = \"postgres://localhost/fixly_test\""
        )
        .unwrap();

        let loader = ConfigLoader::from_file(file.path().to_path_buf());
        let settings = loader.load().unwrap();

        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.database.url, "postgres://localhost/fixly_test");
        // untouched sections fall back to defaults
        assert_eq!(settings.server.host, "127.0.0.1");
    }

    #[test]
    fn missing_pinned_file_is_an_error() {
        let loader = ConfigLoader::from_file(PathBuf::from("/nonexistent/fixly.toml"));
        assert!(loader.load().is_err());
    }
}
