//! RequestContext - who asked, and where

use serde::{Deserialize, Serialize};

use crate::domain::entities::Channel;
use crate::domain::errors::QuoteError;

/// The invoking user and location of a quote request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: u64,
    /// Guild the request was issued in, `None` for direct messages
    pub guild_id: Option<u64>,
    pub channel: Channel,
    /// Whether the user resolved to a member of `guild_id`
    pub is_member: bool,
}

impl RequestContext {
    /// A request issued by a guild member in one of the guild's channels
    pub fn in_guild(user_id: u64, channel: Channel) -> Self {
        Self {
            user_id,
            guild_id: channel.guild_id,
            channel,
            is_member: true,
        }
    }

    /// Check the request came from a member in a guild text channel
    pub fn require_guild(&self) -> Result<u64, QuoteError> {
        let guild_id = self
            .guild_id
            .ok_or_else(|| QuoteError::Precondition("request was not issued in a guild".into()))?;

        if !self.is_member {
            return Err(QuoteError::Precondition(format!(
                "user {} is not a member of guild {}",
                self.user_id, guild_id
            )));
        }

        if !self.channel.is_guild_text() {
            return Err(QuoteError::Precondition(format!(
                "channel {} is not a guild text channel",
                self.channel.id
            )));
        }

        Ok(guild_id)
    }
}
