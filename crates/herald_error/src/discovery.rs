//! Command directory discovery errors.
//!
//! Only root-level failures surface as errors. Problems with individual
//! command files are reported as diagnostics and never abort discovery.

use std::path::PathBuf;

/// Root-level discovery failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DiscoveryErrorKind {
    /// The commands root does not exist.
    #[display("Commands directory not found: {}", _0.display())]
    RootNotFound(PathBuf),

    /// The commands root exists but is not a directory.
    #[display("Commands path is not a directory: {}", _0.display())]
    RootNotDirectory(PathBuf),

    /// The commands root could not be listed.
    #[display("Failed to read commands directory {}: {}", path.display(), reason)]
    RootUnreadable {
        /// Directory that failed to list
        path: PathBuf,
        /// Underlying I/O error
        reason: String,
    },
}

/// Discovery error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Discovery Error: {} at line {} in {}", kind, line, file)]
pub struct DiscoveryError {
    kind: DiscoveryErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscoveryError {
    /// Create a new discovery error with caller location tracking.
    #[track_caller]
    pub fn new(kind: DiscoveryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DiscoveryErrorKind {
        &self.kind
    }
}
