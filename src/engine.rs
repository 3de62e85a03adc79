//! Per-message dispatch across all enabled personas

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::identity::GuildDirectory;
use crate::message::{Message, SendRequest};
use crate::overrides::CommentOverrideService;
use crate::registry::{BotRegistry, BotStateManager};

/// Default bound on dynamic response generator calls
pub const DEFAULT_GENERATOR_TIMEOUT: Duration = Duration::from_secs(30);

/// Dispatch entry point tying the registry, runtime state, overrides and
/// the guild directory together
///
/// Constructed explicitly and passed by reference; there are no process
/// globals, so parallel test suites get independent engines.
pub struct Engine {
    registry: BotRegistry,
    state: BotStateManager,
    overrides: CommentOverrideService,
    directory: Arc<dyn GuildDirectory>,
    generator_timeout: Duration,
}

impl Engine {
    /// Create an engine backed by the given guild directory
    #[must_use]
    pub fn new(directory: Arc<dyn GuildDirectory>) -> Self {
        Self {
            registry: BotRegistry::new(),
            state: BotStateManager::new(),
            overrides: CommentOverrideService::new(),
            directory,
            generator_timeout: DEFAULT_GENERATOR_TIMEOUT,
        }
    }

    /// Override the bound on dynamic generator calls
    #[must_use]
    pub const fn with_generator_timeout(mut self, timeout: Duration) -> Self {
        self.generator_timeout = timeout;
        self
    }

    /// Persona registry
    #[must_use]
    pub const fn registry(&self) -> &BotRegistry {
        &self.registry
    }

    /// Enable/disable state manager (admin surface)
    #[must_use]
    pub const fn state(&self) -> &BotStateManager {
        &self.state
    }

    /// Response override service (admin surface)
    #[must_use]
    pub const fn overrides(&self) -> &CommentOverrideService {
        &self.overrides
    }

    /// Evaluate one inbound message against every enabled persona
    ///
    /// A snapshot of enabled personas is taken once; disabling a persona
    /// mid-dispatch does not affect personas already captured for this
    /// message. Personas are evaluated concurrently and independently —
    /// one persona's slow generator never serializes another persona's
    /// evaluation, and one persona's failure never suppresses another's
    /// reply.
    pub async fn handle_message(&self, message: &Message) -> Vec<SendRequest> {
        let disabled = self.state.disabled_snapshot().await;
        let enabled: Vec<_> = self
            .registry
            .snapshot()
            .await
            .into_iter()
            .filter(|definition| !disabled.contains(&definition.name))
            .collect();

        tracing::debug!(
            message_id = %message.id,
            personas = enabled.len(),
            "dispatching message"
        );

        let evaluations = enabled.iter().map(|definition| {
            definition.evaluate(
                message,
                &self.overrides,
                self.directory.as_ref(),
                self.generator_timeout,
            )
        });

        join_all(evaluations).await.into_iter().flatten().collect()
    }
}
