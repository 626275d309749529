//! Subcommand handlers.

use crate::commands::catalog;
use crate::config::HeraldConfig;
use herald_commands::{
    Diagnostic, Dispatcher, PublishReport, Registry, Severity, Synchronizer, discover,
};
use herald_discord::{HeraldBot, SerenityPublisher};
use herald_error::HeraldResult;
use tracing::{info, instrument, warn};

/// Discover manifests under the configured directory.
///
/// # Errors
///
/// Returns an error only if the directory itself cannot be used.
#[instrument(skip(config), fields(commands_dir = %config.commands_dir().display()))]
pub async fn load_registry(config: &HeraldConfig) -> HeraldResult<(Registry, Vec<Diagnostic>)> {
    let (registry, diagnostics) = discover(config.commands_dir(), &catalog()).await?;
    if !diagnostics.is_empty() {
        warn!(
            rejected = diagnostics.len(),
            "Some command manifests were not loaded"
        );
    }
    Ok((registry, diagnostics))
}

/// Render the registry and diagnostics for `herald list`.
pub fn render_listing(registry: &Registry, diagnostics: &[Diagnostic]) -> String {
    let mut out = format!("{} command(s):\n", registry.len());
    for unit in registry.iter() {
        out.push_str(&format!(
            "  /{:<20} {}  [{}]\n",
            unit.name(),
            unit.definition().description(),
            unit.source()
        ));
    }

    let problems: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity() >= Severity::Warn)
        .collect();
    if !problems.is_empty() {
        out.push_str(&format!("{} problem(s):\n", problems.len()));
        for diagnostic in problems {
            out.push_str(&format!("  {diagnostic}\n"));
        }
    }
    out
}

/// `herald list`: print what would be registered. Needs no credentials.
///
/// # Errors
///
/// Returns an error if the commands directory cannot be used.
pub async fn handle_list(config: &HeraldConfig) -> HeraldResult<()> {
    let (registry, diagnostics) = load_registry(config).await?;
    print!("{}", render_listing(&registry, &diagnostics));
    Ok(())
}

/// `herald deploy`: replace the global command set with the registry.
///
/// # Errors
///
/// Returns an error if credentials are missing, the commands directory
/// cannot be used, or the publish call fails.
pub async fn handle_deploy(config: &HeraldConfig) -> HeraldResult<PublishReport> {
    config.credentials()?;
    let (registry, _) = load_registry(config).await?;
    let report = deploy(&registry, config).await?;
    println!("Published {} command(s).", report.count());
    if !report.is_consistent() {
        println!(
            "Warning: confirmation differs from registry (missing: {:?}, unexpected: {:?})",
            report.missing(),
            report.unexpected()
        );
    }
    Ok(report)
}

async fn deploy(registry: &Registry, config: &HeraldConfig) -> HeraldResult<PublishReport> {
    let target = config.credentials()?;
    let sync = Synchronizer::new(SerenityPublisher::new());
    Ok(sync.publish(registry, &target).await?)
}

/// `herald run`: connect to the gateway and dispatch until interrupted.
///
/// # Errors
///
/// Returns an error if credentials are missing, the commands directory
/// cannot be used, the optional deploy fails, or the gateway client fails.
pub async fn handle_run(config: &HeraldConfig, deploy_first: bool) -> HeraldResult<()> {
    let target = config.credentials()?;
    let (registry, _) = load_registry(config).await?;

    if deploy_first {
        deploy(&registry, config).await?;
    }

    info!(commands = registry.len(), "Starting dispatcher");
    let dispatcher = Dispatcher::new(registry);
    let mut bot = HeraldBot::new(target.token(), *target.application_id(), dispatcher).await?;
    bot.start_until_interrupted().await?;
    Ok(())
}
