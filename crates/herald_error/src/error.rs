//! Top-level error wrapper types.

use crate::{
    CommandError, ConfigError, DefinitionError, DeployError, DiscordError, DiscoveryError,
    InteractionError,
};

/// Every error family Herald can surface to a driver program.
///
/// # Examples
///
/// ```
/// use herald_error::{DeployError, DeployErrorKind, HeraldError};
///
/// let deploy = DeployError::new(DeployErrorKind::Transport("timed out".into()));
/// let err: HeraldError = deploy.into();
/// assert!(format!("{}", err).contains("Deploy Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HeraldErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Command directory discovery error
    #[from(DiscoveryError)]
    Discovery(DiscoveryError),
    /// Command definition error
    #[from(DefinitionError)]
    Definition(DefinitionError),
    /// Command handler error
    #[from(CommandError)]
    Command(CommandError),
    /// Interaction response error
    #[from(InteractionError)]
    Interaction(InteractionError),
    /// Command deployment error
    #[from(DeployError)]
    Deploy(DeployError),
    /// Discord gateway client error
    #[from(DiscordError)]
    Discord(DiscordError),
}

/// Herald error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Herald Error: {}", _0)]
pub struct HeraldError(Box<HeraldErrorKind>);

impl HeraldError {
    /// Create a new error from a kind.
    pub fn new(kind: HeraldErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeraldErrorKind {
        &self.0
    }
}

impl<T> From<T> for HeraldError
where
    T: Into<HeraldErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Herald operations.
pub type HeraldResult<T> = std::result::Result<T, HeraldError>;
