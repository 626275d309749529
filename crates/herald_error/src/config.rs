//! Configuration error types.

/// Configuration failure conditions.
///
/// Every configuration error is fatal: the driver must exit before opening
/// any connection to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A required value is absent from the environment and config file.
    #[display("Missing required configuration value: {}", _0)]
    MissingValue(String),

    /// A value is present but cannot be used.
    #[display("Invalid value for '{}': {}", key, reason)]
    InvalidValue {
        /// Configuration key
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The configuration sources could not be read or merged.
    #[display("Failed to load configuration: {}", _0)]
    Source(String),
}

/// Configuration error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::new(ConfigErrorKind::MissingValue("DISCORD_TOKEN".into()));
    /// assert!(err.to_string().contains("DISCORD_TOKEN"));
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
