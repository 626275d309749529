//! Runtime configuration.
//!
//! Sources, later overriding earlier:
//! 1. `herald.toml` in the working directory (optional)
//! 2. Process environment, after loading `.env` with dotenvy
//!
//! | Key                      | Required for     | Default    |
//! |--------------------------|------------------|------------|
//! | `DISCORD_TOKEN`          | `run`, `deploy`  |            |
//! | `DISCORD_APPLICATION_ID` | `run`, `deploy`  |            |
//! | `HERALD_COMMANDS_DIR`    |                  | `commands` |
//!
//! In `herald.toml` the commands directory is spelled `commands_dir`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use derive_getters::Getters;
use herald_commands::DeployTarget;
use herald_error::{ConfigError, ConfigErrorKind, HeraldResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Default command manifest directory.
pub const DEFAULT_COMMANDS_DIR: &str = "commands";

/// Default configuration file name, without extension.
pub const CONFIG_FILE: &str = "herald";

const TOKEN_KEY: &str = "DISCORD_TOKEN";
const APPLICATION_ID_KEY: &str = "DISCORD_APPLICATION_ID";

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    discord_token: Option<String>,
    discord_application_id: Option<String>,
    herald_commands_dir: Option<PathBuf>,
    commands_dir: Option<PathBuf>,
}

/// Merged configuration. Credentials are checked lazily by
/// [`credentials`](HeraldConfig::credentials) so commands that stay offline
/// run without them.
#[derive(Clone, Getters)]
pub struct HeraldConfig {
    commands_dir: PathBuf,
    token: Option<String>,
    application_id: Option<String>,
}

impl fmt::Debug for HeraldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeraldConfig")
            .field("commands_dir", &self.commands_dir)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("application_id", &self.application_id)
            .finish()
    }
}

impl HeraldConfig {
    /// Load `.env`, `herald.toml` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source exists but cannot be parsed.
    #[instrument]
    pub fn load() -> HeraldResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env"),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => {
                return Err(ConfigError::new(ConfigErrorKind::Source(e.to_string())).into());
            }
        }

        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::default());
        Self::from_builder(builder)
    }

    /// Load from an explicit config file and environment map.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(
        config_file: Option<&Path>,
        env: HashMap<String, String>,
    ) -> HeraldResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        builder = builder.add_source(Environment::default().source(Some(env)));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> HeraldResult<Self> {
        let raw: RawConfig = builder
            .build()
            .map_err(|e| {
                ConfigError::new(ConfigErrorKind::Source(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ConfigError::new(ConfigErrorKind::Source(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        let commands_dir = raw
            .herald_commands_dir
            .or(raw.commands_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMMANDS_DIR));

        Ok(Self {
            commands_dir,
            token: raw.discord_token.filter(|t| !t.trim().is_empty()),
            application_id: raw.discord_application_id,
        })
    }

    /// Override the commands directory (for `--commands`).
    pub fn with_commands_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.commands_dir = dir.into();
        self
    }

    /// Validated credentials for talking to Discord.
    ///
    /// # Errors
    ///
    /// Returns an error if the token or application id is missing, or the
    /// application id is not a non-zero integer.
    pub fn credentials(&self) -> HeraldResult<DeployTarget> {
        let token = self
            .token
            .clone()
            .ok_or_else(|| ConfigError::new(ConfigErrorKind::MissingValue(TOKEN_KEY.into())))?;
        let raw_id = self.application_id.as_deref().ok_or_else(|| {
            ConfigError::new(ConfigErrorKind::MissingValue(APPLICATION_ID_KEY.into()))
        })?;
        let application_id = parse_application_id(raw_id)?;
        Ok(DeployTarget::new(application_id, token))
    }
}

fn parse_application_id(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::new(ConfigErrorKind::InvalidValue {
            key: APPLICATION_ID_KEY.into(),
            reason,
        })
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be non-zero".into())),
        Ok(id) => Ok(id),
        Err(e) => Err(invalid(e.to_string())),
    }
}
