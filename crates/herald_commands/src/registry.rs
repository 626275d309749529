//! Command registry construction.
//!
//! The registry maps command names to resolved command units. It is built
//! once, either by [`discover`]ing manifests under a directory, by
//! registering [`Command`]s in code, or both, and is read-only afterwards.
//!
//! # Directory layout
//!
//! ```text
//! commands/
//! ├── ping.toml            candidate
//! ├── utility/
//! │   ├── user.toml        candidate
//! │   └── nested/          ignored (one level only)
//! └── utils/               reserved, never loaded
//! ```
//!
//! Bad manifests never abort discovery. Each produces one [`Diagnostic`] and
//! is left out of the registry.
//!
//! # Name collisions
//!
//! When two units resolve to the same name the later one replaces the
//! earlier (last-write-wins). Entries are processed in sorted path order so
//! the winner is deterministic. A warning is logged for every replacement.

use crate::dispatch::panic_message;
use crate::manifest::{CommandManifest, MANIFEST_EXTENSION};
use crate::{
    Command, CommandData, CommandDefinition, CommandHandler, Diagnostic, DiagnosticCode,
    HandlerCatalog, Provenance,
};
use derive_getters::Getters;
use futures::FutureExt;
use futures::future::join_all;
use herald_error::{DefinitionError, DefinitionErrorKind, DiscoveryError, DiscoveryErrorKind};
use std::collections::BTreeMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Subdirectory reserved for shared non-command files.
pub const RESERVED_DIR: &str = "utils";

/// One registered command: resolved definition, handler and provenance.
#[derive(Clone, Getters)]
pub struct CommandUnit {
    definition: CommandDefinition,
    handler: Arc<dyn CommandHandler>,
    source: Provenance,
}

impl CommandUnit {
    /// Command name (shorthand for `definition().name()`).
    pub fn name(&self) -> &str {
        self.definition.name()
    }
}

impl fmt::Debug for CommandUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandUnit")
            .field("definition", &self.definition)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// A unit whose definition may still need resolving.
pub(crate) struct PendingUnit {
    pub(crate) data: CommandData,
    pub(crate) handler: Arc<dyn CommandHandler>,
    pub(crate) source: Provenance,
}

/// Name-keyed table of command units.
///
/// Iteration is in name order, so projections of the registry are stable.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: BTreeMap<String, CommandUnit>,
}

impl Registry {
    /// Start building a registry from code-registered commands.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up a command by exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&CommandUnit> {
        self.commands.get(name)
    }

    /// Whether a command is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered names in iteration order.
    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Units in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandUnit> {
        self.commands.values()
    }

    /// Resolved definitions in iteration order.
    pub fn definitions(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.values().map(CommandUnit::definition)
    }

    fn insert(&mut self, unit: CommandUnit) {
        let name = unit.name().to_string();
        let source = unit.source.to_string();
        if let Some(previous) = self.commands.insert(name.clone(), unit) {
            warn!(
                command = %name,
                replaced = %previous.source,
                by = %source,
                "Duplicate command name, later definition replaces earlier"
            );
        }
    }
}

/// Collects units, then resolves and validates them into a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    pending: Vec<PendingUnit>,
}

impl RegistryBuilder {
    /// Register a command implemented in code.
    pub fn register<C: Command + 'static>(mut self, command: C) -> Self {
        let source = Provenance::Builtin(command.id().to_string());
        let data = command.data();
        let handler: Arc<dyn CommandHandler> = Arc::new(command);
        self.pending.push(PendingUnit {
            data,
            handler,
            source,
        });
        self
    }

    /// Register a definition and handler pair under an explicit provenance.
    pub fn register_parts(
        mut self,
        data: CommandData,
        handler: Arc<dyn CommandHandler>,
        source: Provenance,
    ) -> Self {
        self.pending.push(PendingUnit {
            data,
            handler,
            source,
        });
        self
    }

    pub(crate) fn push(&mut self, unit: PendingUnit) {
        self.pending.push(unit);
    }

    /// Number of units waiting to be resolved.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Resolve every pending unit and build the registry.
    ///
    /// Deferred producers run concurrently and each is invoked exactly once.
    /// Units whose definition fails to resolve or validate, or whose producer
    /// panics, are excluded with a `COMMAND_LOAD_ERROR` diagnostic. Insertion follows registration
    /// order, so the last unit registered under a name wins.
    #[instrument(skip(self), fields(pending = self.pending.len()))]
    pub async fn build(self) -> (Registry, Vec<Diagnostic>) {
        let (data, rest): (Vec<_>, Vec<_>) = self
            .pending
            .into_iter()
            .map(|unit| (unit.data, (unit.handler, unit.source)))
            .unzip();

        let resolved = join_all(data.into_iter().map(resolve_and_validate)).await;

        let mut registry = Registry::default();
        let mut diagnostics = Vec::new();
        for (result, (handler, source)) in resolved.into_iter().zip(rest) {
            match result {
                Ok(definition) => {
                    debug!(command = %definition.name(), source = %source, "Registered command");
                    registry.insert(CommandUnit {
                        definition,
                        handler,
                        source,
                    });
                }
                Err(err) => {
                    diagnostics.push(
                        Diagnostic::new(
                            DiagnosticCode::CommandLoadError,
                            format!("Failed to load command from {source}"),
                        )
                        .with_source(source)
                        .with_detail(err.to_string())
                        .emit(),
                    );
                }
            }
        }

        info!(
            commands = registry.len(),
            rejected = diagnostics.len(),
            "Command registry built"
        );
        (registry, diagnostics)
    }
}

async fn resolve_and_validate(data: CommandData) -> Result<CommandDefinition, DefinitionError> {
    let producer = match &data {
        CommandData::Static(definition) => definition.name().to_string(),
        CommandData::Deferred(producer) => producer.id().to_string(),
    };
    let definition = AssertUnwindSafe(data.resolve())
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| {
            Err(DefinitionError::new(DefinitionErrorKind::ProducerFailed {
                producer,
                reason: format!("panicked: {}", panic_message(payload.as_ref())),
            }))
        })?;
    definition.validate()?;
    Ok(definition)
}

/// Discover command manifests under `root` and build a registry.
///
/// See the module docs for the traversal rules.
///
/// # Errors
///
/// Only root-level failures are errors: the root is missing, is not a
/// directory, or cannot be listed. Everything else is reported through the
/// returned diagnostics.
pub async fn discover(
    root: impl AsRef<Path>,
    catalog: &HandlerCatalog,
) -> Result<(Registry, Vec<Diagnostic>), DiscoveryError> {
    discover_into(root, catalog, Registry::builder()).await
}

/// Like [`discover`], but starts from a builder that may already hold
/// code-registered commands. Discovered manifests are registered after them.
#[instrument(skip(root, catalog, builder), fields(root = %root.as_ref().display()))]
pub async fn discover_into(
    root: impl AsRef<Path>,
    catalog: &HandlerCatalog,
    mut builder: RegistryBuilder,
) -> Result<(Registry, Vec<Diagnostic>), DiscoveryError> {
    let root = root.as_ref();
    info!("Discovering command manifests");

    let mut diagnostics = Vec::new();
    let candidates = collect_candidates(root, &mut diagnostics).await?;
    debug!(candidates = candidates.len(), "Collected candidate manifests");

    for path in candidates {
        match load_candidate(&path, catalog).await {
            Ok(unit) => builder.push(unit),
            Err(diagnostic) => diagnostics.push(diagnostic.emit()),
        }
    }

    let (registry, mut load_diagnostics) = builder.build().await;
    diagnostics.append(&mut load_diagnostics);
    Ok((registry, diagnostics))
}

async fn load_candidate(path: &Path, catalog: &HandlerCatalog) -> Result<PendingUnit, Diagnostic> {
    let load_error = |detail: String| {
        Diagnostic::new(
            DiagnosticCode::CommandLoadError,
            format!("Failed to load command at {}", path.display()),
        )
        .with_source(Provenance::File(path.to_path_buf()))
        .with_detail(detail)
    };

    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        load_error(DefinitionError::new(DefinitionErrorKind::Read(e.to_string())).to_string())
    })?;
    let manifest = CommandManifest::parse(&text).map_err(|e| load_error(e.to_string()))?;
    manifest.bind(path, catalog)
}

/// List candidate manifests in processing order.
async fn collect_candidates(
    root: &Path,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let metadata = tokio::fs::metadata(root).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DiscoveryError::new(DiscoveryErrorKind::RootNotFound(root.to_path_buf()))
        } else {
            DiscoveryError::new(DiscoveryErrorKind::RootUnreadable {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })
        }
    })?;
    if !metadata.is_dir() {
        return Err(DiscoveryError::new(DiscoveryErrorKind::RootNotDirectory(
            root.to_path_buf(),
        )));
    }

    let entries = sorted_entries(root).await.map_err(|e| {
        DiscoveryError::new(DiscoveryErrorKind::RootUnreadable {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })
    })?;

    let mut candidates = Vec::new();
    for path in entries {
        let is_dir = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta.is_dir(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !is_dir {
            if is_manifest(&path) {
                candidates.push(path);
            }
            continue;
        }

        if path.file_name().is_some_and(|name| name == RESERVED_DIR) {
            debug!(path = %path.display(), "Skipping reserved directory");
            continue;
        }

        match sorted_entries(&path).await {
            Ok(children) => {
                for child in children {
                    let is_file = tokio::fs::metadata(&child)
                        .await
                        .map(|meta| meta.is_file())
                        .unwrap_or(false);
                    if is_file && is_manifest(&child) {
                        candidates.push(child);
                    }
                }
            }
            Err(e) => diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::CommandLoadError,
                    format!("Failed to read command folder {}", path.display()),
                )
                .with_source(Provenance::File(path.clone()))
                .with_detail(e.to_string())
                .emit(),
            ),
        }
    }
    Ok(candidates)
}

async fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut paths = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn is_manifest(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == MANIFEST_EXTENSION)
}
