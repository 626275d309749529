//! Herald: Discord slash-command bot.
//!
//! Wires the `herald_commands` registry and dispatcher to Discord through
//! `herald_discord`, with configuration, logging and the built-in commands.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod observability;

pub use config::HeraldConfig;
pub use observability::{ObservabilityConfig, init_observability};
