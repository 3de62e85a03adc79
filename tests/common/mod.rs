//! Shared test utilities

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chorus_gateway::{GuildDirectory, GuildMember, Message, MessageAuthor, ResponseGenerator};

/// Directory backed by a fixed member map
pub struct MockDirectory {
    members: HashMap<String, GuildMember>,
}

impl MockDirectory {
    #[must_use]
    pub fn new(members: Vec<GuildMember>) -> Self {
        Self {
            members: members.into_iter().map(|m| (m.id.clone(), m)).collect(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

#[async_trait]
impl GuildDirectory for MockDirectory {
    async fn member(
        &self,
        _guild_id: &str,
        user_id: &str,
    ) -> chorus_gateway::Result<Option<GuildMember>> {
        Ok(self.members.get(user_id).cloned())
    }

    async fn members(&self, _guild_id: &str) -> chorus_gateway::Result<Vec<GuildMember>> {
        Ok(self.members.values().cloned().collect())
    }
}

/// Generator that records invocations and returns a fixed reply
pub struct RecordingGenerator {
    reply: String,
    calls: Arc<AtomicUsize>,
}

impl RecordingGenerator {
    #[must_use]
    pub fn new(reply: &str) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let generator = Arc::new(Self {
            reply: reply.to_string(),
            calls: calls.clone(),
        });
        (generator, calls)
    }
}

#[async_trait]
impl ResponseGenerator for RecordingGenerator {
    async fn generate(&self, _message: &Message) -> chorus_gateway::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Generator that sleeps before replying
pub struct SlowGenerator {
    reply: String,
    delay: std::time::Duration,
}

impl SlowGenerator {
    #[must_use]
    pub fn new(reply: &str, delay: std::time::Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            delay,
        })
    }
}

#[async_trait]
impl ResponseGenerator for SlowGenerator {
    async fn generate(&self, _message: &Message) -> chorus_gateway::Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }
}

/// Guild message from a human author
#[must_use]
pub fn guild_message(content: &str, author_id: &str) -> Message {
    Message {
        id: "m1".to_string(),
        content: content.to_string(),
        author: MessageAuthor {
            id: author_id.to_string(),
            name: "Alice".to_string(),
            is_bot: false,
        },
        channel_id: "c1".to_string(),
        guild_id: Some("g1".to_string()),
    }
}

#[must_use]
pub fn member(id: &str, username: &str, nickname: Option<&str>, avatar: Option<&str>) -> GuildMember {
    GuildMember {
        id: id.to_string(),
        username: username.to_string(),
        nickname: nickname.map(ToString::to_string),
        avatar_url: avatar.map(ToString::to_string),
        is_bot: false,
    }
}
