//! Command handler errors.

use crate::InteractionError;

/// Failure conditions a command handler can report.
#[derive(Debug, Clone, derive_more::Display)]
pub enum CommandErrorKind {
    /// Handler could not talk back to the caller.
    #[display("{}", _0)]
    Interaction(InteractionError),

    /// A required option was not supplied.
    #[display("Missing option '{}' for command '{}'", option, command)]
    MissingOption {
        /// Command name
        command: String,
        /// Option name
        option: String,
    },

    /// Handler logic failed.
    #[display("Command '{}' failed: {}", command, reason)]
    Failed {
        /// Command name
        command: String,
        /// Failure description
        reason: String,
    },

    /// Handler panicked; caught at the dispatch boundary.
    #[display("Command '{}' panicked: {}", command, message)]
    Panicked {
        /// Command name
        command: String,
        /// Panic payload, when it was a string
        message: String,
    },
}

/// Command error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Command Error: {} at line {} in {}", kind, line, file)]
pub struct CommandError {
    kind: CommandErrorKind,
    line: u32,
    file: &'static str,
}

impl CommandError {
    /// Create a new command error with caller location tracking.
    #[track_caller]
    pub fn new(kind: CommandErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CommandErrorKind {
        &self.kind
    }
}

impl From<InteractionError> for CommandError {
    #[track_caller]
    fn from(err: InteractionError) -> Self {
        Self::new(CommandErrorKind::Interaction(err))
    }
}

/// Result type for command handlers.
pub type CommandResult<T> = Result<T, CommandError>;
