//! Persona registry and runtime enable/disable state

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::bots::BotDefinition;

/// Registry of all configured personas, keyed by name
///
/// Definitions are registered once at startup and are immutable afterwards;
/// runtime state (enabled/disabled) lives in [`BotStateManager`].
#[derive(Debug, Default)]
pub struct BotRegistry {
    bots: RwLock<HashMap<String, Arc<BotDefinition>>>,
}

impl BotRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a persona definition
    ///
    /// Registering a duplicate name replaces the earlier definition.
    pub async fn register(&self, definition: BotDefinition) {
        let name = definition.name.clone();
        let replaced = self
            .bots
            .write()
            .await
            .insert(name.clone(), Arc::new(definition));

        if replaced.is_some() {
            tracing::warn!(persona = %name, "replaced existing persona registration");
        } else {
            tracing::info!(persona = %name, "persona registered");
        }
    }

    /// Look up a persona by name
    pub async fn get(&self, name: &str) -> Option<Arc<BotDefinition>> {
        self.bots.read().await.get(name).cloned()
    }

    /// Names of all registered personas
    pub async fn names(&self) -> Vec<String> {
        self.bots.read().await.keys().cloned().collect()
    }

    /// Snapshot of all registered definitions
    pub async fn snapshot(&self) -> Vec<Arc<BotDefinition>> {
        self.bots.read().await.values().cloned().collect()
    }

    /// Number of registered personas
    pub async fn len(&self) -> usize {
        self.bots.read().await.len()
    }

    /// Whether the registry is empty
    pub async fn is_empty(&self) -> bool {
        self.bots.read().await.is_empty()
    }
}

/// Runtime enabled/disabled state, keyed by persona name
///
/// Any name not explicitly disabled is enabled, including names the
/// manager has never seen.
#[derive(Debug, Default)]
pub struct BotStateManager {
    disabled: RwLock<HashSet<String>>,
}

impl BotStateManager {
    /// Create a manager with every persona enabled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a persona
    pub async fn enable(&self, name: &str) {
        if self.disabled.write().await.remove(name) {
            tracing::info!(persona = %name, "persona enabled");
        }
    }

    /// Disable a persona
    pub async fn disable(&self, name: &str) {
        if self.disabled.write().await.insert(name.to_string()) {
            tracing::info!(persona = %name, "persona disabled");
        }
    }

    /// Whether a persona is currently enabled
    pub async fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.read().await.contains(name)
    }

    /// Consistent snapshot of the disabled set, taken under one read lock
    /// so a single message's fan-out observes one state
    pub async fn disabled_snapshot(&self) -> HashSet<String> {
        self.disabled.read().await.clone()
    }
}
