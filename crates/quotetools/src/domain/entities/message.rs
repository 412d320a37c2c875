//! Message Entity
//!
//! A message received from the chat platform, already resolved into plain data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Channel, GuildInfo};

/// A message from the chat platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Platform message ID
    pub id: u64,
    /// Message text, if any
    pub content: Option<String>,
    /// Who sent the message
    pub author: Author,
    /// Channel the message was posted in
    pub channel: Channel,
    /// Guild summary, `None` for direct messages
    pub guild: Option<GuildInfo>,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
    /// Roles mentioned in the message text
    #[serde(default)]
    pub role_mentions: Vec<RoleMention>,
    /// Files attached to the message
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Permalink to the message
    pub jump_url: String,
}

impl Message {
    /// Create a new message with no content, mentions or attachments
    pub fn new(id: u64, author: Author, channel: Channel, jump_url: impl Into<String>) -> Self {
        Self {
            id,
            content: None,
            author,
            channel,
            guild: None,
            timestamp: Utc::now(),
            role_mentions: Vec::new(),
            attachments: Vec::new(),
            jump_url: jump_url.into(),
        }
    }

    /// Set the message text
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the guild summary
    pub fn with_guild(mut self, guild: GuildInfo) -> Self {
        self.guild = Some(guild);
        self
    }

    /// Set timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the mentioned roles
    pub fn with_role_mentions(mut self, role_mentions: Vec<RoleMention>) -> Self {
        self.role_mentions = role_mentions;
        self
    }

    /// Set the attachments
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Message author as seen from the message's guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
    pub avatar_url: String,
    /// Display color; `None` when the author is no longer a guild member
    pub color: Option<u32>,
}

impl Author {
    pub fn new(id: u64, name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar_url: avatar_url.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }
}

/// A role referenced by a mention token in message text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMention {
    pub id: u64,
    pub name: String,
}

impl RoleMention {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The literal token the platform embeds in message text
    pub fn token(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

/// A file attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub url: String,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
        }
    }

    /// Extension after the last dot, or the whole name if there is none
    pub fn extension(&self) -> &str {
        self.filename.rsplit('.').next().unwrap_or_default()
    }
}
