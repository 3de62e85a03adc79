//! Response resolution
//!
//! Turns a configured response spec into final reply text. Precedence:
//! runtime override pool, then the trigger's own spec, then the
//! persona-level default. Ending up with nothing is a configuration error,
//! never a silent empty reply.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::message::Message;
use crate::overrides::CommentOverrideService;
use crate::{Error, Result};

/// Dynamic reply generation, implemented by an external collaborator
/// (typically an LLM client). Treated as an opaque async call.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Produce reply text for a message
    async fn generate(&self, message: &Message) -> Result<String>;
}

/// Configured source of reply text for a trigger or persona
#[derive(Clone)]
pub enum ResponseSpec {
    /// Literal alternatives; picked uniformly at random when more than one
    Pool(Vec<String>),

    /// Dynamic generator invoked per matching message
    Generator(Arc<dyn ResponseGenerator>),
}

impl fmt::Debug for ResponseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool(entries) => f.debug_tuple("Pool").field(entries).finish(),
            Self::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// Resolve final reply text for a matched trigger
///
/// Pool picks support `{{sender}}`, `{{content}}` and `{{channel}}`
/// template placeholders. Generator calls are bounded by
/// `generator_timeout`.
///
/// # Errors
///
/// Returns an error when no pool or generator is configured after all
/// fallbacks, or when a generator fails or times out.
pub async fn resolve_response(
    persona_name: &str,
    trigger_spec: Option<&ResponseSpec>,
    default_spec: Option<&ResponseSpec>,
    overrides: &CommentOverrideService,
    message: &Message,
    generator_timeout: Duration,
) -> Result<String> {
    // Runtime override wins over everything when present and non-empty
    if let Some(pool) = overrides.get(persona_name).await {
        if !pool.is_empty() {
            return Ok(expand_template(pick(&pool), message));
        }
    }

    let spec = trigger_spec.or(default_spec).ok_or_else(|| {
        Error::Response(format!(
            "persona '{persona_name}' has no response pool or generator configured"
        ))
    })?;

    match spec {
        ResponseSpec::Pool(entries) => {
            if entries.is_empty() {
                return Err(Error::Response(format!(
                    "persona '{persona_name}' has an empty response pool"
                )));
            }
            Ok(expand_template(pick(entries), message))
        }
        ResponseSpec::Generator(generator) => {
            match tokio::time::timeout(generator_timeout, generator.generate(message)).await {
                Ok(result) => result,
                Err(_) => Err(Error::Response(format!(
                    "response generator for '{persona_name}' timed out after {generator_timeout:?}"
                ))),
            }
        }
    }
}

/// Uniform pick from a non-empty pool; single-entry pools return as-is
fn pick(pool: &[String]) -> &str {
    if pool.len() == 1 {
        return &pool[0];
    }
    pool.choose(&mut rand::thread_rng())
        .map_or("", String::as_str)
}

/// Expand template variables in a literal reply
fn expand_template(reply: &str, message: &Message) -> String {
    reply
        .replace("{{sender}}", &message.author.name)
        .replace("{{content}}", &message.content)
        .replace("{{channel}}", &message.channel_id)
}
