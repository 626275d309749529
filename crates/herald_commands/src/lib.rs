//! Slash-command registry, interaction dispatch and deployment for Herald.
//!
//! # Overview
//!
//! Three pieces, used in order:
//! - [`discover`] builds a [`Registry`] from TOML manifests and a
//!   [`HandlerCatalog`] of compiled-in handlers
//! - [`Synchronizer::publish`] replaces the platform's global command set
//!   with the registry's definitions
//! - [`dispatch`] routes each inbound [`Interaction`] to its handler and
//!   guarantees a reply when the handler fails
//!
//! The platform itself is reached only through the [`Interaction`] and
//! [`CommandPublisher`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! let catalog = HandlerCatalog::new().with_handler("ping", Ping);
//! let (registry, diagnostics) = discover("commands", &catalog).await?;
//! for diagnostic in &diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//!
//! let dispatcher = Dispatcher::new(registry);
//! dispatcher.dispatch(&mut interaction).await;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod command;
mod definition;
mod deploy;
mod diagnostic;
mod dispatch;
mod interaction;
mod manifest;
mod registry;
mod schema;

pub use catalog::HandlerCatalog;
pub use command::{Command, CommandData, CommandHandler, DefinitionProducer};
pub use definition::{
    CommandDefinition, CommandDefinitionBuilder, CommandDefinitionBuilderError, CommandOption,
    CommandOptionBuilder, CommandOptionBuilderError, MAX_CHOICES, MAX_DESCRIPTION_LEN,
    MAX_NAME_LEN, MAX_OPTIONS, OptionChoice, OptionKind,
};
pub use deploy::{CommandPublisher, DeployTarget, PublishReport, PublishedCommand, Synchronizer};
pub use diagnostic::{Diagnostic, DiagnosticCode, Provenance, Severity};
pub use dispatch::{Dispatcher, EXECUTION_ERROR_REPLY, dispatch};
pub use interaction::{Caller, GuildRef, Interaction, Reply};
pub use manifest::{CommandManifest, MANIFEST_EXTENSION, ManifestData};
pub use registry::{
    CommandUnit, RESERVED_DIR, Registry, RegistryBuilder, discover, discover_into,
};
pub use schema::{CHAT_INPUT, ChoiceSchema, CommandSchema, OptionSchema};
