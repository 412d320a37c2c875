//! Channel Entity

use serde::{Deserialize, Serialize};

/// Kind of a platform channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Text,
    News,
    Voice,
    Category,
    Thread,
    Private,
    Other,
}

impl ChannelKind {
    /// Standard guild text channel (plain text or announcement)
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::News)
    }
}

/// A conversation stream, usually inside a guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: u64,
    /// Owning guild, `None` for direct messages
    pub guild_id: Option<u64>,
    pub name: String,
    pub kind: ChannelKind,
}

impl Channel {
    /// Create a standard text channel in a guild
    pub fn text(id: u64, guild_id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            guild_id: Some(guild_id),
            name: name.into(),
            kind: ChannelKind::Text,
        }
    }

    /// Create a direct message channel
    pub fn private(id: u64) -> Self {
        Self {
            id,
            guild_id: None,
            name: String::new(),
            kind: ChannelKind::Private,
        }
    }

    pub fn with_kind(mut self, kind: ChannelKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this is a standard text channel belonging to a guild
    pub fn is_guild_text(&self) -> bool {
        self.guild_id.is_some() && self.kind.is_text()
    }
}
