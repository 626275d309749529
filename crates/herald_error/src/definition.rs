//! Command definition errors.

/// Reasons a command definition could not be loaded or resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DefinitionErrorKind {
    /// Manifest file could not be read.
    #[display("Failed to read manifest: {}", _0)]
    Read(String),

    /// Manifest file is not valid TOML or has the wrong shape.
    #[display("Failed to parse manifest: {}", _0)]
    Parse(String),

    /// Manifest names a deferred producer the catalog does not know.
    #[display("Unknown definition producer: {}", _0)]
    UnknownProducer(String),

    /// Deferred producer returned an error.
    #[display("Definition producer '{}' failed: {}", producer, reason)]
    ProducerFailed {
        /// Producer id
        producer: String,
        /// Failure reported by the producer
        reason: String,
    },

    /// Definition violates a platform naming or size rule.
    #[display("Invalid definition for '{}': {}", name, reason)]
    Invalid {
        /// Command (or option) name as written
        name: String,
        /// Rule that was broken
        reason: String,
    },

    /// A definition builder was missing a required field.
    #[display("Incomplete definition: {}", _0)]
    Incomplete(String),
}

/// Definition error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Definition Error: {} at line {} in {}", kind, line, file)]
pub struct DefinitionError {
    kind: DefinitionErrorKind,
    line: u32,
    file: &'static str,
}

impl DefinitionError {
    /// Create a new definition error with caller location tracking.
    #[track_caller]
    pub fn new(kind: DefinitionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DefinitionErrorKind {
        &self.kind
    }
}
