//! Intent handler registry
//!
//! Built once by the concrete skill before any turn is served, then owned by
//! the dispatcher and only read.

use super::skill::Turn;
use crate::request::Intent;
use crate::response::ResponseEnvelope;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Business logic for one intent
pub trait IntentHandler: Send + Sync {
    /// Intent name this handler answers to
    fn name(&self) -> &str;

    /// Produce the envelope for this turn
    fn handle(&self, intent: &Intent, turn: &Turn<'_>) -> ResponseEnvelope;
}

/// Adapter so plain closures can be registered as handlers
pub struct FnHandler<F> {
    name: String,
    handler: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&Intent, &Turn<'_>) -> ResponseEnvelope + Send + Sync,
{
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<F> IntentHandler for FnHandler<F>
where
    F: Fn(&Intent, &Turn<'_>) -> ResponseEnvelope + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, intent: &Intent, turn: &Turn<'_>) -> ResponseEnvelope {
        (self.handler)(intent, turn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Intent '{0}' already has a handler")]
    DuplicateIntent(String),
}

/// Intent name to handler mapping
#[derive(Default, Clone)]
pub struct IntentRegistry {
    handlers: HashMap<String, Arc<dyn IntentHandler>>,
}

impl IntentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateIntent`] if the name is taken.
    pub fn register(&mut self, handler: Arc<dyn IntentHandler>) -> Result<(), RegistryError> {
        let name = handler.name().to_string();
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::DuplicateIntent(name));
        }
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Register a closure for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateIntent`] if the name is taken.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(&Intent, &Turn<'_>) -> ResponseEnvelope + Send + Sync + 'static,
    {
        self.register(Arc::new(FnHandler::new(name, handler)))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn IntentHandler>> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered intent names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for IntentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRegistry")
            .field("intents", &self.names())
            .finish()
    }
}
