//! Persona definitions and first-match trigger dispatch
//!
//! A [`BotDefinition`] is created once at load time and is immutable for
//! the process lifetime; enabled/disabled state lives in the registry's
//! state manager, keyed by name.

use std::time::Duration;

use crate::identity::{GuildDirectory, IdentitySpec, resolve_identity};
use crate::logic::CompiledCondition;
use crate::message::{Message, SendRequest};
use crate::overrides::CommentOverrideService;
use crate::response::{ResponseSpec, resolve_response};
use crate::Result;

/// A named (condition, response) pair owned by a persona
#[derive(Debug, Clone)]
pub struct Trigger {
    /// Trigger name, used in diagnostics
    pub name: String,

    /// Compiled condition, produced once at load time
    pub condition: CompiledCondition,

    /// Response spec for this trigger; falls back to the persona default
    pub response: Option<ResponseSpec>,

    /// Declared priority. Dispatch walks declaration order unless the
    /// persona opts into priority ordering at load time.
    pub priority: i64,
}

/// One configured reply persona
#[derive(Debug, Clone)]
pub struct BotDefinition {
    /// Unique persona name
    pub name: String,

    /// Identity strategy for replies
    pub identity: IdentitySpec,

    /// Triggers, in dispatch order
    pub triggers: Vec<Trigger>,

    /// Persona-level default response spec
    pub default_responses: Option<ResponseSpec>,

    /// Skip messages authored by bot accounts
    pub ignore_bots: bool,

    /// Skip messages authored by human accounts
    pub ignore_humans: bool,
}

impl BotDefinition {
    /// Evaluate this persona against one message
    ///
    /// Walks triggers in stored order and fulfills the first one whose
    /// condition matches. A fulfillment error (response or identity
    /// resolution) is logged and treated as no-match for that trigger
    /// only; evaluation proceeds to subsequent triggers.
    pub async fn evaluate(
        &self,
        message: &Message,
        overrides: &CommentOverrideService,
        directory: &dyn GuildDirectory,
        generator_timeout: Duration,
    ) -> Option<SendRequest> {
        if self.ignore_bots && message.author.is_bot {
            return None;
        }
        if self.ignore_humans && !message.author.is_bot {
            return None;
        }

        for trigger in &self.triggers {
            if !trigger.condition.evaluate(message) {
                continue;
            }

            tracing::debug!(
                persona = %self.name,
                trigger = %trigger.name,
                message_id = %message.id,
                "trigger matched"
            );

            match self
                .fulfill(trigger, message, overrides, directory, generator_timeout)
                .await
            {
                Ok(request) => return Some(request),
                Err(e) => {
                    tracing::warn!(
                        persona = %self.name,
                        trigger = %trigger.name,
                        message_id = %message.id,
                        error = %e,
                        "trigger fulfillment failed, trying next trigger"
                    );
                }
            }
        }

        None
    }

    /// Resolve response and identity for a matched trigger
    async fn fulfill(
        &self,
        trigger: &Trigger,
        message: &Message,
        overrides: &CommentOverrideService,
        directory: &dyn GuildDirectory,
        generator_timeout: Duration,
    ) -> Result<SendRequest> {
        let content = resolve_response(
            &self.name,
            trigger.response.as_ref(),
            self.default_responses.as_ref(),
            overrides,
            message,
            generator_timeout,
        )
        .await?;

        let identity = resolve_identity(&self.identity, &self.name, message, directory).await?;

        Ok(SendRequest {
            identity,
            content,
            channel_id: message.channel_id.clone(),
        })
    }
}
