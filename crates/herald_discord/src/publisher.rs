//! Bulk-overwrite publisher over the Discord REST API.

use async_trait::async_trait;
use herald_commands::{CommandPublisher, CommandSchema, DeployTarget, PublishedCommand};
use herald_error::{DeployError, DeployErrorKind};
use serenity::all::{ApplicationId, Http};
use tracing::{debug, instrument};

/// Publishes global commands with `PUT /applications/{id}/commands`.
///
/// A fresh HTTP client is built per call from the target's credential, so
/// the publisher holds no state and works without a gateway connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerenityPublisher;

impl SerenityPublisher {
    /// Create a publisher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandPublisher for SerenityPublisher {
    #[instrument(skip(self, target, commands), fields(commands = commands.len()))]
    async fn overwrite_global_commands(
        &self,
        target: &DeployTarget,
        commands: &[CommandSchema],
    ) -> Result<Vec<PublishedCommand>, DeployError> {
        if *target.application_id() == 0 {
            return Err(DeployError::new(DeployErrorKind::Rejected(
                "application id must be non-zero".to_string(),
            )));
        }

        let http = Http::new(target.token());
        http.set_application_id(ApplicationId::new(*target.application_id()));

        debug!("Sending bulk overwrite");
        let confirmed = http
            .create_global_commands(&commands)
            .await
            .map_err(deploy_error)?;

        Ok(confirmed
            .into_iter()
            .map(|command| {
                PublishedCommand::new(
                    command.id.to_string(),
                    command.name,
                    command.description,
                    command.application_id.to_string(),
                )
            })
            .collect())
    }
}

#[track_caller]
fn deploy_error(err: serenity::Error) -> DeployError {
    let kind = match &err {
        serenity::Error::Json(_) => DeployErrorKind::Encode(err.to_string()),
        serenity::Error::Http(http) => {
            classify_status(http.status_code().map(|s| s.as_u16()), err.to_string())
        }
        _ => DeployErrorKind::Transport(err.to_string()),
    };
    DeployError::new(kind)
}

/// Map an HTTP status to a deploy failure.
fn classify_status(status: Option<u16>, message: String) -> DeployErrorKind {
    match status {
        Some(401 | 403) => DeployErrorKind::Unauthorized(message),
        Some(400..=499) => DeployErrorKind::Rejected(message),
        _ => DeployErrorKind::Transport(message),
    }
}
