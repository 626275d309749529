//! Discord gateway client errors.

/// Failures while building or running the gateway client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Connection to the Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Bot token is empty.
    #[display("Invalid or empty bot token")]
    InvalidToken,
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use herald_error::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::InvalidToken);
    /// assert_eq!(err.kind(), &DiscordErrorKind::InvalidToken);
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DiscordErrorKind {
        &self.kind
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;
