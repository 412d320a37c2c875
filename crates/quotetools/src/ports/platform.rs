//! Platform Port
//!
//! Abstract interface over the chat platform client: the bot's guild list,
//! permission checks, its recent-message cache and fetch-by-id.
//!
//! Implementations live in separate crates (e.g., quotetools-discord).

use async_trait::async_trait;

use crate::domain::entities::{Channel, Guild, Message};
use crate::domain::errors::QuoteError;
use crate::domain::value_objects::Permissions;

/// Whose permissions to compute in a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    /// The bot's own member in the channel's guild
    Bot,
    /// A user's member in the channel's guild
    User(u64),
}

/// Read-only view of the platform, as seen by the bot
///
/// # Example
///
/// ```rust,ignore
/// use quotetools::ports::QuotePlatform;
///
/// struct DiscordPlatform { /* ... */ }
///
/// #[async_trait]
/// impl QuotePlatform for DiscordPlatform {
///     fn guilds(&self) -> Vec<Guild> {
///         // Read guilds from the gateway cache
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait QuotePlatform: Send + Sync {
    /// Guilds the bot belongs to, in membership order
    fn guilds(&self) -> Vec<Guild>;

    /// Effective permissions of `member` in `channel`
    ///
    /// Implementations may need a network lookup when the member is not
    /// cached. Returns no permissions when the member cannot be resolved.
    async fn permissions_for(&self, channel: &Channel, member: Member) -> Permissions;

    /// Whether the user owns the bot
    async fn is_owner(&self, user_id: u64) -> Result<bool, QuoteError>;

    /// Messages in the recent-message cache whose id is in `ids`
    fn cached_messages(&self, ids: &[u64]) -> Vec<Message>;

    /// Fetch one message from one channel
    ///
    /// Fails with [`QuoteError::Http`] when the channel does not hold the
    /// message or the bot cannot read it.
    async fn fetch_message(&self, channel: &Channel, message_id: u64)
        -> Result<Message, QuoteError>;
}
