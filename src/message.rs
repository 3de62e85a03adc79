//! Message types crossing the engine boundary
//!
//! Inbound messages arrive from a transport collaborator and are consumed
//! read-only. Outbound send requests are handed back to the delivery layer.

use serde::{Deserialize, Serialize};

/// Author of an inbound message
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageAuthor {
    /// Platform-specific user identifier
    pub id: String,

    /// Display name of the author
    #[serde(default)]
    pub name: String,

    /// Whether the author is a bot account
    #[serde(default)]
    pub is_bot: bool,
}

/// A message from the transport collaborator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    /// Message identifier (platform-specific)
    pub id: String,

    /// Message content
    pub content: String,

    /// Message author
    pub author: MessageAuthor,

    /// Channel the message was posted in
    pub channel_id: String,

    /// Guild the channel belongs to, if any
    #[serde(default)]
    pub guild_id: Option<String>,
}

/// Display identity for one reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReplyIdentity {
    /// Display name to post under
    pub bot_name: String,

    /// Avatar URL (empty when unavailable)
    #[serde(default)]
    pub avatar_url: String,
}

/// A reply to hand to the delivery collaborator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendRequest {
    /// Identity to post the reply under
    pub identity: ReplyIdentity,

    /// Reply text
    pub content: String,

    /// Channel to post into
    pub channel_id: String,
}

/// A guild member as reported by the directory collaborator
#[derive(Debug, Clone)]
pub struct GuildMember {
    /// Platform-specific user identifier
    pub id: String,

    /// Account username
    pub username: String,

    /// Guild-specific nickname, if set
    pub nickname: Option<String>,

    /// Avatar URL, if set
    pub avatar_url: Option<String>,

    /// Whether this member is a bot account
    pub is_bot: bool,
}

impl GuildMember {
    /// Display name: nickname when set, username otherwise
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_nickname() {
        let member = GuildMember {
            id: "1".to_string(),
            username: "bob".to_string(),
            nickname: Some("Bobby".to_string()),
            avatar_url: None,
            is_bot: false,
        };
        assert_eq!(member.display_name(), "Bobby");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let member = GuildMember {
            id: "1".to_string(),
            username: "bob".to_string(),
            nickname: None,
            avatar_url: None,
            is_bot: false,
        };
        assert_eq!(member.display_name(), "bob");
    }

    #[test]
    fn message_deserializes_with_defaults() {
        let msg: Message = serde_json::from_str(
            r#"{"id":"m1","content":"hi","author":{"id":"u1"},"channel_id":"c1"}"#,
        )
        .unwrap();
        assert!(!msg.author.is_bot);
        assert!(msg.guild_id.is_none());
    }
}
