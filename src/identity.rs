//! Reply identity strategies
//!
//! Each persona posts under a synthetic identity produced by one of three
//! interchangeable strategies. Member-backed strategies (`mimic`, `random`)
//! look the member up fresh on every resolution so the display identity
//! tracks platform-side profile edits; nothing here is cached.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::message::{GuildMember, Message, ReplyIdentity};
use crate::{Error, Result};

/// Identity strategy configured on a persona
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentitySpec {
    /// Fixed display name and avatar, no I/O
    Static {
        /// Display name to post under
        bot_name: String,
        /// Avatar URL
        #[serde(default)]
        avatar_url: String,
    },

    /// Post as a live guild member, tracking their current profile
    Mimic {
        /// Member to mimic
        as_member: String,
    },

    /// Post as a uniformly random non-bot guild member
    Random,
}

/// Live guild member lookups, implemented by the transport collaborator
#[async_trait]
pub trait GuildDirectory: Send + Sync {
    /// Fetch a single member by id, `None` if not in the guild
    async fn member(&self, guild_id: &str, user_id: &str) -> Result<Option<GuildMember>>;

    /// Fetch the guild's full member list
    async fn members(&self, guild_id: &str) -> Result<Vec<GuildMember>>;
}

/// Resolve a persona's display identity for one matching message
///
/// Member lookups that fail or come back empty degrade to a fallback
/// identity carrying the persona name and an empty avatar; a broken lookup
/// never suppresses the reply.
///
/// # Errors
///
/// Returns an error only for the precondition violation of resolving a
/// member-backed identity against a message without guild context.
pub async fn resolve_identity(
    spec: &IdentitySpec,
    persona_name: &str,
    message: &Message,
    directory: &dyn GuildDirectory,
) -> Result<ReplyIdentity> {
    match spec {
        IdentitySpec::Static {
            bot_name,
            avatar_url,
        } => Ok(ReplyIdentity {
            bot_name: bot_name.clone(),
            avatar_url: avatar_url.clone(),
        }),

        IdentitySpec::Mimic { as_member } => {
            let guild_id = guild_context(message)?;
            match directory.member(guild_id, as_member).await {
                Ok(Some(member)) => Ok(identity_of(&member)),
                Ok(None) => {
                    tracing::warn!(
                        persona = %persona_name,
                        member = %as_member,
                        "mimic target not found, using fallback identity"
                    );
                    Ok(fallback(persona_name))
                }
                Err(e) => {
                    tracing::warn!(
                        persona = %persona_name,
                        member = %as_member,
                        error = %e,
                        "mimic lookup failed, using fallback identity"
                    );
                    Ok(fallback(persona_name))
                }
            }
        }

        IdentitySpec::Random => {
            let guild_id = guild_context(message)?;
            match directory.members(guild_id).await {
                Ok(members) => {
                    let humans: Vec<_> = members.into_iter().filter(|m| !m.is_bot).collect();
                    humans.choose(&mut rand::thread_rng()).map_or_else(
                        || {
                            tracing::warn!(
                                persona = %persona_name,
                                "no non-bot members to impersonate, using fallback identity"
                            );
                            Ok(fallback(persona_name))
                        },
                        |member| Ok(identity_of(member)),
                    )
                }
                Err(e) => {
                    tracing::warn!(
                        persona = %persona_name,
                        error = %e,
                        "member list fetch failed, using fallback identity"
                    );
                    Ok(fallback(persona_name))
                }
            }
        }
    }
}

fn guild_context(message: &Message) -> Result<&str> {
    message.guild_id.as_deref().ok_or_else(|| {
        Error::Identity(format!(
            "message {} has no guild context for member-backed identity",
            message.id
        ))
    })
}

fn identity_of(member: &GuildMember) -> ReplyIdentity {
    ReplyIdentity {
        bot_name: member.display_name().to_string(),
        avatar_url: member.avatar_url.clone().unwrap_or_default(),
    }
}

fn fallback(persona_name: &str) -> ReplyIdentity {
    ReplyIdentity {
        bot_name: persona_name.to_string(),
        avatar_url: String::new(),
    }
}
