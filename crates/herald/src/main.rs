//! Herald CLI binary.
//!
//! - `run`: connect to Discord and dispatch slash commands
//! - `deploy`: publish the command set
//! - `list`: show what would be registered

use clap::Parser;
use herald::cli::{Cli, Commands, handle_deploy, handle_list, handle_run};
use herald::{HeraldConfig, ObservabilityConfig, init_observability};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Configuration first so .env can set RUST_LOG and HERALD_LOG_FORMAT
    let mut config = HeraldConfig::load()?;
    if let Some(dir) = cli.commands {
        config = config.with_commands_dir(dir);
    }

    init_observability(&ObservabilityConfig::from_env(cli.verbose))?;
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Run { deploy } => handle_run(&config, deploy).await?,
        Commands::Deploy => {
            handle_deploy(&config).await?;
        }
        Commands::List => handle_list(&config).await?,
    }

    Ok(())
}
