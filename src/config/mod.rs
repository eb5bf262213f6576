/// Connection settings: host, token and timeout for one invocation.
///
/// Values come from, in order of precedence: command-line overrides, the
/// `DATABRICKS_HOST` / `DATABRICKS_TOKEN` environment variables, and the
/// selected profile in the TOML config file.
pub mod profile;

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

pub use profile::{ConfigFile, Profile};

/// Profile used when none is selected.
pub const DEFAULT_PROFILE: &str = "DEFAULT";
/// Config file name under the home directory.
pub const CONFIG_FILE_NAME: &str = ".dbperms.toml";
/// Request timeout when the profile does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_HOST: &str = "DATABRICKS_HOST";
pub const ENV_TOKEN: &str = "DATABRICKS_TOKEN";
pub const ENV_PROFILE: &str = "DATABRICKS_CONFIG_PROFILE";
pub const ENV_CONFIG_FILE: &str = "DBPERMS_CONFIG_FILE";

/// Errors from locating, reading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has the wrong shape.
    #[error("Cannot parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A profile was requested explicitly but the file has no such table.
    #[error("Profile '{profile}' not found in {}", .path.display())]
    ProfileNotFound { profile: String, path: PathBuf },

    /// No host from flags, environment or profile.
    #[error("No host configured for profile '{profile}' (set DATABRICKS_HOST or add `host` to the config file)")]
    MissingHost { profile: String },

    /// No token from environment or profile.
    #[error("No token configured for profile '{profile}' (set DATABRICKS_TOKEN or add `token` to the config file)")]
    MissingToken { profile: String },
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub host: Option<String>,
}

/// Fully resolved connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub profile: String,
    pub host: String,
    pub token: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("profile", &self.profile)
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Resolve settings from the process environment and the default config path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the file is unreadable or required values are missing.
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok();
        let path = config_path(&env);
        Self::resolve(overrides, &env, path.as_deref())
    }

    /// Resolve settings from explicit sources.
    ///
    /// `env` looks up environment variables; `path` is the config file to
    /// consult, if any. A missing file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the file is unreadable, the explicitly
    /// selected profile does not exist, or host/token cannot be determined.
    pub fn resolve(
        overrides: &Overrides,
        env: &dyn Fn(&str) -> Option<String>,
        path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let explicit_profile = overrides.profile.clone().or_else(|| env(ENV_PROFILE));
        let profile_name = explicit_profile
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE.to_owned());

        let file = match path {
            Some(p) => ConfigFile::read_optional(p)?,
            None => None,
        };

        let profile = match (&file, path) {
            (Some(file), Some(p)) => match file.profile(&profile_name) {
                Some(profile) => profile.clone(),
                None if explicit_profile.is_some() => {
                    return Err(ConfigError::ProfileNotFound {
                        profile: profile_name,
                        path: p.to_path_buf(),
                    });
                }
                None => Profile::default(),
            },
            _ => Profile::default(),
        };

        let host = overrides
            .host
            .clone()
            .or_else(|| non_empty(env(ENV_HOST)))
            .or(profile.host)
            .ok_or_else(|| ConfigError::MissingHost {
                profile: profile_name.clone(),
            })?;
        let token = non_empty(env(ENV_TOKEN))
            .or(profile.token)
            .ok_or_else(|| ConfigError::MissingToken {
                profile: profile_name.clone(),
            })?;
        let timeout = Duration::from_secs(profile.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        tracing::debug!(profile = %profile_name, %host, ?timeout, "resolved configuration");

        Ok(Self {
            profile: profile_name,
            host,
            token,
            timeout,
        })
    }
}

/// Config file location: `DBPERMS_CONFIG_FILE`, else `~/.dbperms.toml`.
#[must_use]
pub fn config_path(env: &dyn Fn(&str) -> Option<String>) -> Option<PathBuf> {
    non_empty(env(ENV_CONFIG_FILE))
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
