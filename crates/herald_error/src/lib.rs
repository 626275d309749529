//! Error types for Herald.
//!
//! This crate provides the error types shared by every Herald crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use herald_error::{ConfigError, ConfigErrorKind, HeraldResult};
//!
//! fn load_token() -> HeraldResult<String> {
//!     Err(ConfigError::new(ConfigErrorKind::MissingValue(
//!         "DISCORD_TOKEN".to_string(),
//!     )))?
//! }
//!
//! assert!(load_token().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod definition;
mod deploy;
mod discord;
mod discovery;
mod error;
mod interaction;

pub use command::{CommandError, CommandErrorKind, CommandResult};
pub use config::{ConfigError, ConfigErrorKind};
pub use definition::{DefinitionError, DefinitionErrorKind};
pub use deploy::{DeployError, DeployErrorKind};
pub use discord::{DiscordError, DiscordErrorKind, DiscordResult};
pub use discovery::{DiscoveryError, DiscoveryErrorKind};
pub use error::{HeraldError, HeraldErrorKind, HeraldResult};
pub use interaction::{InteractionError, InteractionErrorKind, InteractionResult};
