//! Interaction response errors.

/// Failures while acknowledging or answering an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum InteractionErrorKind {
    /// An initial reply or deferral was attempted twice.
    #[display("Interaction already acknowledged")]
    AlreadyAcknowledged,

    /// A follow-up was attempted before any reply or deferral.
    #[display("Interaction not yet acknowledged")]
    NotAcknowledged,

    /// The platform rejected the initial reply.
    #[display("Reply failed: {}", _0)]
    ReplyFailed(String),

    /// The platform rejected the deferral.
    #[display("Defer failed: {}", _0)]
    DeferFailed(String),

    /// The platform rejected the follow-up message.
    #[display("Follow-up failed: {}", _0)]
    FollowUpFailed(String),
}

/// Interaction error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Interaction Error: {} at line {} in {}", kind, line, file)]
pub struct InteractionError {
    kind: InteractionErrorKind,
    line: u32,
    file: &'static str,
}

impl InteractionError {
    /// Create a new interaction error with caller location tracking.
    #[track_caller]
    pub fn new(kind: InteractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &InteractionErrorKind {
        &self.kind
    }
}

/// Result type for interaction responses.
pub type InteractionResult<T> = Result<T, InteractionError>;
