//! TOML command manifests.
//!
//! A manifest declares the two capabilities every command needs:
//!
//! ```toml
//! execute = "ping"            # handler id in the HandlerCatalog
//!
//! [data]                      # inline definition...
//! name = "ping"
//! description = "Replies with Pong!"
//! ```
//!
//! or, for a deferred definition:
//!
//! ```toml
//! execute = "about"
//! data = { producer = "about" }
//! ```

use crate::registry::PendingUnit;
use crate::{
    CommandData, CommandDefinition, Diagnostic, DiagnosticCode, HandlerCatalog, Provenance,
};
use herald_error::{DefinitionError, DefinitionErrorKind};
use serde::Deserialize;
use std::path::Path;

/// File extension of command manifests.
pub const MANIFEST_EXTENSION: &str = "toml";

/// Where a manifest's definition comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestData {
    /// Definition written in the manifest
    Inline(CommandDefinition),
    /// Definition produced by the named catalog producer
    Deferred(String),
}

/// A parsed manifest. Either capability may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandManifest {
    /// Definition capability
    pub data: Option<ManifestData>,
    /// Handler capability
    pub execute: Option<String>,
}

#[derive(Deserialize)]
struct RawManifest {
    #[serde(default)]
    data: Option<toml::Value>,
    #[serde(default)]
    execute: Option<String>,
}

impl CommandManifest {
    /// Parse manifest text.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionErrorKind::Parse`] for invalid TOML or an inline
    /// definition with the wrong shape.
    pub fn parse(text: &str) -> Result<Self, DefinitionError> {
        let raw: RawManifest = toml::from_str(text)
            .map_err(|e| DefinitionError::new(DefinitionErrorKind::Parse(e.to_string())))?;

        let data = match raw.data {
            None => None,
            Some(toml::Value::Table(table)) => match table.get("producer") {
                Some(toml::Value::String(producer)) => Some(ManifestData::Deferred(producer.clone())),
                Some(other) => {
                    return Err(DefinitionError::new(DefinitionErrorKind::Parse(format!(
                        "data.producer must be a string, found {}",
                        other.type_str()
                    ))));
                }
                None => {
                    let def: CommandDefinition = toml::Value::Table(table)
                        .try_into()
                        .map_err(|e: toml::de::Error| {
                            DefinitionError::new(DefinitionErrorKind::Parse(e.to_string()))
                        })?;
                    Some(ManifestData::Inline(def))
                }
            },
            Some(other) => {
                return Err(DefinitionError::new(DefinitionErrorKind::Parse(format!(
                    "data must be a table, found {}",
                    other.type_str()
                ))));
            }
        };

        Ok(Self {
            data,
            execute: raw.execute,
        })
    }

    /// Bind the manifest's capabilities against the catalog.
    ///
    /// Returns the rejection diagnostic when a capability is missing, the
    /// handler id is unknown, or the producer id is unknown.
    pub(crate) fn bind(
        self,
        path: &Path,
        catalog: &HandlerCatalog,
    ) -> Result<PendingUnit, Diagnostic> {
        let source = Provenance::File(path.to_path_buf());
        let missing = |what: String| {
            Diagnostic::new(
                DiagnosticCode::CommandMissingProperties,
                format!(
                    "The command at {} is missing a required \"data\" or \"execute\" property.",
                    path.display()
                ),
            )
            .with_source(source.clone())
            .with_detail(what)
        };

        let (data, execute) = match (self.data, self.execute) {
            (Some(data), Some(execute)) => (data, execute),
            (None, Some(_)) => return Err(missing("no data".to_string())),
            (Some(_), None) => return Err(missing("no execute".to_string())),
            (None, None) => return Err(missing("no data, no execute".to_string())),
        };

        let handler = catalog
            .handler(&execute)
            .ok_or_else(|| missing(format!("execute refers to unknown handler '{execute}'")))?;

        let data = match data {
            ManifestData::Inline(def) => CommandData::Static(def),
            ManifestData::Deferred(producer_id) => {
                let producer = catalog.producer(&producer_id).ok_or_else(|| {
                    let err = DefinitionError::new(DefinitionErrorKind::UnknownProducer(
                        producer_id.clone(),
                    ));
                    Diagnostic::new(
                        DiagnosticCode::CommandLoadError,
                        format!("Failed to load command at {}", path.display()),
                    )
                    .with_source(source.clone())
                    .with_detail(err.to_string())
                })?;
                CommandData::Deferred(producer)
            }
        };

        Ok(PendingUnit {
            data,
            handler,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline() {
        let manifest = CommandManifest::parse(
            r#"
            execute = "ping"

            [data]
            name = "ping"
            description = "Replies with Pong!"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.execute.as_deref(), Some("ping"));
        match manifest.data {
            Some(ManifestData::Inline(def)) => assert_eq!(def.name(), "ping"),
            other => panic!("expected inline data, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_deferred() {
        let manifest = CommandManifest::parse(
            r#"
            execute = "about"
            data = { producer = "about" }
            "#,
        )
        .unwrap();
        assert_eq!(manifest.data, Some(ManifestData::Deferred("about".into())));
    }

    #[test]
    fn test_parse_missing_capabilities_is_not_an_error() {
        let manifest = CommandManifest::parse("# nothing here\n").unwrap();
        assert_eq!(manifest.data, None);
        assert_eq!(manifest.execute, None);
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let err = CommandManifest::parse("execute = ").unwrap_err();
        assert!(matches!(err.kind(), DefinitionErrorKind::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_scalar_data() {
        let err = CommandManifest::parse("execute = \"x\"\ndata = 3\n").unwrap_err();
        assert!(err.to_string().contains("data must be a table"));
    }

    #[test]
    fn test_parse_rejects_inline_without_description() {
        let err = CommandManifest::parse("execute = \"x\"\n[data]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err.kind(), DefinitionErrorKind::Parse(_)));
    }
}
