//! Interaction dispatch with failure isolation.
//!
//! [`dispatch`] never fails. A missing command is logged and ignored; a
//! failing or panicking handler is logged and the caller is always sent one
//! ephemeral error message, as a follow-up when the handler already replied
//! or deferred and as the initial reply otherwise.

use crate::{Diagnostic, DiagnosticCode, Interaction, Registry, Reply};
use futures::FutureExt;
use herald_error::{CommandError, CommandErrorKind};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Message shown to the caller when a handler fails.
pub const EXECUTION_ERROR_REPLY: &str = "There was an error while executing this command!";

/// Route one interaction to its handler.
///
/// Returns the single diagnostic describing the outcome:
/// `COMMAND_NOT_FOUND`, `COMMAND_EXECUTION_ERROR` or `COMMAND_EXECUTED`.
#[instrument(
    skip(registry, interaction),
    fields(
        command = %interaction.command_name(),
        caller = %interaction.caller().id(),
    )
)]
pub async fn dispatch(registry: &Registry, interaction: &mut dyn Interaction) -> Diagnostic {
    let command_name = interaction.command_name().to_string();
    let caller = interaction.caller().id().clone();

    let Some(unit) = registry.get(&command_name) else {
        return Diagnostic::new(
            DiagnosticCode::CommandNotFound,
            format!("No command matching {command_name} was found."),
        )
        .with_command(command_name)
        .with_caller(caller)
        .emit();
    };

    debug!(source = %unit.source(), "Invoking command handler");
    let handler = Arc::clone(unit.handler());
    let outcome = AssertUnwindSafe(handler.execute(&mut *interaction))
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| {
            Err(CommandError::new(CommandErrorKind::Panicked {
                command: command_name.clone(),
                message: panic_message(payload.as_ref()),
            }))
        });

    match outcome {
        Ok(()) => Diagnostic::new(
            DiagnosticCode::CommandExecuted,
            format!("{command_name} executed"),
        )
        .with_command(command_name)
        .with_caller(caller)
        .with_source(unit.source().clone())
        .emit(),
        Err(err) => {
            let diagnostic = Diagnostic::new(
                DiagnosticCode::CommandExecutionError,
                format!("Error executing {command_name}"),
            )
            .with_command(command_name)
            .with_caller(caller)
            .with_source(unit.source().clone())
            .with_detail(err.to_string())
            .emit();
            send_error_reply(interaction).await;
            diagnostic
        }
    }
}

async fn send_error_reply(interaction: &mut dyn Interaction) {
    let reply = Reply::ephemeral(EXECUTION_ERROR_REPLY);
    let sent = if interaction.is_acknowledged() {
        interaction.follow_up(reply).await
    } else {
        interaction.reply(reply).await
    };
    if let Err(e) = sent {
        error!(error = %e, "Failed to deliver error reply");
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Shares one read-only registry across concurrent dispatches.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    /// Create a dispatcher over a built registry.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The registry being dispatched against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Dispatch one interaction. See [`dispatch`].
    pub async fn dispatch(&self, interaction: &mut dyn Interaction) -> Diagnostic {
        dispatch(&self.registry, interaction).await
    }
}
