//! Diagnostics emitted by discovery, dispatch and deployment.
//!
//! A [`Diagnostic`] is a record, not an error: it is logged through `tracing`
//! when emitted and handed back to the caller so the failing event can be
//! reconstructed without reproducing it.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use std::fmt;
use std::path::PathBuf;

/// Machine-readable diagnostic codes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    /// Manifest lacks a definition or a handler.
    CommandMissingProperties,
    /// Manifest or deferred definition failed to load.
    CommandLoadError,
    /// Dispatch target is not registered.
    CommandNotFound,
    /// Handler failed while executing.
    CommandExecutionError,
    /// Full-replace publish failed.
    CommandDeployError,
    /// Handler completed successfully.
    CommandExecuted,
}

impl DiagnosticCode {
    /// Severity implied by the code.
    pub fn severity(self) -> Severity {
        match self {
            Self::CommandExecuted => Severity::Info,
            Self::CommandNotFound => Severity::Warn,
            Self::CommandMissingProperties
            | Self::CommandLoadError
            | Self::CommandExecutionError
            | Self::CommandDeployError => Severity::Error,
        }
    }
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Informational record
    Info,
    /// Suspicious but handled
    Warn,
    /// Something was excluded or failed
    Error,
}

/// Where a command unit came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Loaded from a manifest file
    File(PathBuf),
    /// Registered in code under the given id
    Builtin(String),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Builtin(id) => write!(f, "builtin:{id}"),
        }
    }
}

/// One diagnostic record.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Diagnostic {
    code: DiagnosticCode,
    message: String,
    timestamp: DateTime<Utc>,
    source: Option<Provenance>,
    command: Option<String>,
    caller: Option<String>,
    detail: Option<String>,
}

impl Diagnostic {
    /// Start a diagnostic with the given code and message, stamped now.
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            timestamp: Utc::now(),
            source: None,
            command: None,
            caller: None,
            detail: None,
        }
    }

    /// Attach the unit's provenance.
    pub fn with_source(mut self, source: Provenance) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach the command name.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Attach the caller identity.
    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    /// Attach error detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Severity implied by the code.
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Log this diagnostic at its severity and return it.
    pub fn emit(self) -> Self {
        let source = self.source.as_ref().map(ToString::to_string);
        let command = self.command.as_deref();
        let caller = self.caller.as_deref();
        let detail = self.detail.as_deref();
        match self.severity() {
            Severity::Info => tracing::info!(
                code = %self.code,
                source = ?source,
                command = ?command,
                caller = ?caller,
                timestamp = %self.timestamp,
                "{}",
                self.message
            ),
            Severity::Warn => tracing::warn!(
                code = %self.code,
                source = ?source,
                command = ?command,
                caller = ?caller,
                detail = ?detail,
                timestamp = %self.timestamp,
                "{}",
                self.message
            ),
            Severity::Error => tracing::error!(
                code = %self.code,
                source = ?source,
                command = ?command,
                caller = ?caller,
                detail = ?detail,
                timestamp = %self.timestamp,
                "{}",
                self.message
            ),
        }
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}
