//! Command handler and definition producer traits.
//!
//! A command pairs a definition with a handler. The definition is either
//! available up front ([`CommandData::Static`]) or computed once at load time
//! by a [`DefinitionProducer`] ([`CommandData::Deferred`]).
//!
//! # Example
//!
//! ```rust,ignore
//! struct Ping;
//!
//! #[async_trait]
//! impl CommandHandler for Ping {
//!     async fn execute(&self, interaction: &mut dyn Interaction) -> CommandResult<()> {
//!         interaction.reply(Reply::public("Pong!")).await?;
//!         Ok(())
//!     }
//! }
//!
//! impl Command for Ping {
//!     fn id(&self) -> &str { "ping" }
//!     fn data(&self) -> CommandData {
//!         CommandData::Static(ping_definition())
//!     }
//! }
//! ```

use crate::{CommandDefinition, Interaction};
use async_trait::async_trait;
use herald_error::{CommandResult, DefinitionError};
use std::fmt;
use std::sync::Arc;

/// Runs a command for one interaction.
///
/// Handlers hold no per-invocation state. Errors are caught by the
/// dispatcher, which guarantees the caller still gets a reply.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Execute the command.
    async fn execute(&self, interaction: &mut dyn Interaction) -> CommandResult<()>;
}

/// Computes a command definition asynchronously.
///
/// Invoked exactly once while the registry is being built.
#[async_trait]
pub trait DefinitionProducer: Send + Sync {
    /// Catalog id manifests use to reference this producer.
    fn id(&self) -> &str;

    /// Produce the definition.
    async fn produce(&self) -> Result<CommandDefinition, DefinitionError>;
}

/// A command's definition, static or deferred.
#[derive(Clone)]
pub enum CommandData {
    /// Definition known up front
    Static(CommandDefinition),
    /// Definition computed at load time
    Deferred(Arc<dyn DefinitionProducer>),
}

impl fmt::Debug for CommandData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(def) => f.debug_tuple("Static").field(def).finish(),
            Self::Deferred(producer) => f.debug_tuple("Deferred").field(&producer.id()).finish(),
        }
    }
}

impl CommandData {
    /// Resolve to a definition, invoking the producer if deferred.
    pub async fn resolve(self) -> Result<CommandDefinition, DefinitionError> {
        match self {
            Self::Static(def) => Ok(def),
            Self::Deferred(producer) => {
                tracing::debug!(producer = producer.id(), "Resolving deferred definition");
                producer.produce().await
            }
        }
    }
}

/// A statically registered command: definition plus handler in one value.
pub trait Command: CommandHandler {
    /// Stable id used for provenance.
    fn id(&self) -> &str;

    /// The command's definition.
    fn data(&self) -> CommandData;
}
