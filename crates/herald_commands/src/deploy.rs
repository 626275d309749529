//! Full-replace command deployment.
//!
//! Publishing sends every registry definition in one bulk-overwrite call.
//! Whatever is not in that call disappears from the platform's global
//! command set. Failures are not retried; they are logged and returned so
//! the caller can abort and rerun the whole deploy.

use crate::{CommandSchema, Diagnostic, DiagnosticCode, Registry};
use async_trait::async_trait;
use derive_getters::Getters;
use herald_error::DeployError;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{info, instrument, warn};

/// Application identity and credential for registration calls.
#[derive(Clone, Getters)]
pub struct DeployTarget {
    application_id: u64,
    token: String,
}

impl DeployTarget {
    /// Create a deploy target.
    pub fn new(application_id: u64, token: impl Into<String>) -> Self {
        Self {
            application_id,
            token: token.into(),
        }
    }
}

impl fmt::Debug for DeployTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployTarget")
            .field("application_id", &self.application_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A command as confirmed by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PublishedCommand {
    id: String,
    name: String,
    description: String,
    application_id: String,
}

impl PublishedCommand {
    /// Create a confirmed command record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        application_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            application_id: application_id.into(),
        }
    }
}

/// The platform's bulk-overwrite registration endpoint.
#[async_trait]
pub trait CommandPublisher: Send + Sync {
    /// Replace the application's global commands with exactly `commands`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeployError`] when the platform rejects the call or the
    /// request fails in transit.
    async fn overwrite_global_commands(
        &self,
        target: &DeployTarget,
        commands: &[CommandSchema],
    ) -> Result<Vec<PublishedCommand>, DeployError>;
}

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PublishReport {
    published: Vec<PublishedCommand>,
    /// Names sent but absent from the confirmation.
    missing: Vec<String>,
    /// Names confirmed but never sent.
    unexpected: Vec<String>,
}

impl PublishReport {
    /// Number of confirmed commands.
    pub fn count(&self) -> usize {
        self.published.len()
    }

    /// Whether the confirmed set matches what was sent.
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

/// Publishes registry definitions through a [`CommandPublisher`].
#[derive(Debug, Clone)]
pub struct Synchronizer<P> {
    publisher: P,
}

impl<P: CommandPublisher> Synchronizer<P> {
    /// Create a synchronizer over a publisher.
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    /// The underlying publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Publish every command in `registry`, replacing the platform's set.
    ///
    /// # Errors
    ///
    /// Returns the publisher's error unchanged after logging a
    /// `COMMAND_DEPLOY_ERROR` diagnostic.
    #[instrument(
        skip(self, registry),
        fields(commands = registry.len(), application_id = target.application_id())
    )]
    pub async fn publish(
        &self,
        registry: &Registry,
        target: &DeployTarget,
    ) -> Result<PublishReport, DeployError> {
        let schemas: Vec<CommandSchema> = registry.definitions().map(CommandSchema::from).collect();
        info!(
            "Started refreshing {} application (/) commands.",
            schemas.len()
        );

        let published = match self
            .publisher
            .overwrite_global_commands(target, &schemas)
            .await
        {
            Ok(published) => published,
            Err(err) => {
                Diagnostic::new(
                    DiagnosticCode::CommandDeployError,
                    format!(
                        "Failed to publish {} commands for application {}",
                        schemas.len(),
                        target.application_id()
                    ),
                )
                .with_detail(err.to_string())
                .emit();
                return Err(err);
            }
        };

        let sent: BTreeSet<&str> = schemas.iter().map(|s| s.name.as_str()).collect();
        let confirmed: BTreeSet<&str> = published.iter().map(|c| c.name().as_str()).collect();
        let missing: Vec<String> = sent
            .difference(&confirmed)
            .map(|name| name.to_string())
            .collect();
        let unexpected: Vec<String> = confirmed
            .difference(&sent)
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() || !unexpected.is_empty() {
            warn!(
                ?missing,
                ?unexpected,
                "Published command set differs from registry"
            );
        }
        info!(
            "Successfully reloaded {} application (/) commands.",
            published.len()
        );

        Ok(PublishReport {
            published,
            missing,
            unexpected,
        })
    }
}
