//! Runtime response-pool overrides
//!
//! An override pool, keyed by persona name, takes precedence over any
//! configured response spec. Set, appended to, and cleared by the admin
//! surface; read on every matching message.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// Process-wide response override state
#[derive(Debug, Default)]
pub struct CommentOverrideService {
    pools: RwLock<HashMap<String, Vec<String>>>,
}

impl CommentOverrideService {
    /// Create an empty override service
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the override pool for a persona
    pub async fn set(&self, persona: &str, comments: Vec<String>) {
        tracing::info!(persona = %persona, count = comments.len(), "response override set");
        self.pools
            .write()
            .await
            .insert(persona.to_string(), comments);
    }

    /// Append entries to a persona's override pool, creating it if absent
    pub async fn append(&self, persona: &str, comments: Vec<String>) {
        self.pools
            .write()
            .await
            .entry(persona.to_string())
            .or_default()
            .extend(comments);
    }

    /// Current override pool for a persona, if any
    pub async fn get(&self, persona: &str) -> Option<Vec<String>> {
        self.pools.read().await.get(persona).cloned()
    }

    /// Remove a persona's override pool
    pub async fn clear(&self, persona: &str) {
        if self.pools.write().await.remove(persona).is_some() {
            tracing::info!(persona = %persona, "response override cleared");
        }
    }
}
