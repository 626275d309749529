//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the herald binary.

mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{handle_deploy, handle_list, handle_run, load_registry, render_listing};
