//! Guild Entity
//!
//! A community the bot belongs to, with its channels in display order.

use serde::{Deserialize, Serialize};

use super::Channel;

/// A guild and its channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: u64,
    pub name: String,
    pub icon_url: Option<String>,
    /// Channels in display order
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl Guild {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon_url: None,
            channels: Vec::new(),
        }
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    /// Add a text channel owned by this guild
    pub fn with_text_channel(mut self, id: u64, name: impl Into<String>) -> Self {
        self.channels.push(Channel::text(id, self.id, name));
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    /// Standard text channels in display order
    pub fn text_channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter().filter(|c| c.kind.is_text())
    }
}

/// Name and icon of a guild, carried by its messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildInfo {
    pub id: u64,
    pub name: String,
    pub icon_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ChannelKind;

    #[test]
    fn test_text_channels_skip_other_kinds() {
        let guild = Guild::new(1, "Guild")
            .with_text_channel(10, "general")
            .with_channel(Channel::text(11, 1, "Voice").with_kind(ChannelKind::Voice))
            .with_channel(Channel::text(12, 1, "news").with_kind(ChannelKind::News));

        let ids: Vec<u64> = guild.text_channels().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 12]);
    }
}
