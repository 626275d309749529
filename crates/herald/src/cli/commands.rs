//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Herald: a Discord slash-command bot.
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Discover, deploy and dispatch Discord slash commands", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command manifest directory (overrides HERALD_COMMANDS_DIR)
    #[arg(long, global = true)]
    pub commands: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and dispatch commands until interrupted
    Run {
        /// Publish the command set before connecting
        #[arg(long)]
        deploy: bool,
    },

    /// Publish the command set, replacing every global command, then exit
    Deploy,

    /// Print the discovered registry and diagnostics without connecting
    List,
}
