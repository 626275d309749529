//! Command deployment errors.

/// Failures of the full-replace publish call.
///
/// None of these are retried; the caller decides whether to abort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DeployErrorKind {
    /// Credential was rejected by the platform.
    #[display("Platform rejected credentials: {}", _0)]
    Unauthorized(String),

    /// Platform refused the submitted command set.
    #[display("Platform rejected command set: {}", _0)]
    Rejected(String),

    /// The request never completed.
    #[display("Transport failure: {}", _0)]
    Transport(String),

    /// Command schema could not be serialized.
    #[display("Failed to encode command schema: {}", _0)]
    Encode(String),
}

/// Deploy error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Deploy Error: {} at line {} in {}", kind, line, file)]
pub struct DeployError {
    kind: DeployErrorKind,
    line: u32,
    file: &'static str,
}

impl DeployError {
    /// Create a new deploy error with caller location tracking.
    #[track_caller]
    pub fn new(kind: DeployErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DeployErrorKind {
        &self.kind
    }
}
