//! Build-time catalog of handlers and definition producers.
//!
//! Manifests on disk cannot carry code, so they name their handler (and,
//! for deferred definitions, their producer) by id. The catalog is the
//! compiled-in list those ids resolve against.

use crate::{CommandHandler, DefinitionProducer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Handlers and producers keyed by id.
#[derive(Clone, Default)]
pub struct HandlerCatalog {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    producers: HashMap<String, Arc<dyn DefinitionProducer>>,
}

impl HandlerCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler under `id`, replacing any previous one.
    pub fn with_handler<H: CommandHandler + 'static>(
        mut self,
        id: impl Into<String>,
        handler: H,
    ) -> Self {
        self.handlers.insert(id.into(), Arc::new(handler));
        self
    }

    /// Add a producer under its own id.
    pub fn with_producer<P: DefinitionProducer + 'static>(mut self, producer: P) -> Self {
        self.producers
            .insert(producer.id().to_string(), Arc::new(producer));
        self
    }

    /// Look up a handler.
    pub fn handler(&self, id: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(id).cloned()
    }

    /// Look up a producer.
    pub fn producer(&self, id: &str) -> Option<Arc<dyn DefinitionProducer>> {
        self.producers.get(id).cloned()
    }

    /// Registered handler ids, sorted.
    pub fn handler_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.handlers.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl fmt::Debug for HandlerCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut producers: Vec<_> = self.producers.keys().collect();
        producers.sort();
        f.debug_struct("HandlerCatalog")
            .field("handlers", &self.handler_ids())
            .field("producers", &producers)
            .finish()
    }
}
