//! QuotePlatform implementation over serenity's cache and HTTP client

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use quotetools::{
    Channel, Guild, Member, Message, Permissions, QuoteError, QuotePlatform, RequestContext,
};
use serenity::cache::Cache;
use serenity::client::Context;
use serenity::http::{Http, HttpError};
use serenity::model::channel::Message as SerenityMessage;
use serenity::model::guild::{Guild as SerenityGuild, Member as GuildMember, PartialMember};
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::config::DiscordConfig;
use crate::convert::{channel_kind, convert_guild, convert_message, request_context};

/// Map a serenity error onto the domain's error kinds
pub fn map_error(err: serenity::Error) -> QuoteError {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp)) => {
            QuoteError::http(resp.status_code.as_u16(), &resp.error.message)
        }
        // Raised locally when serenity already knows the request would be refused
        serenity::Error::Model(e) => QuoteError::http(403, e.to_string()),
        other => QuoteError::Transport(other.to_string()),
    }
}

/// Build a full member from the partial member attached to a message
pub fn member_from_partial(user_id: UserId, partial: &PartialMember) -> GuildMember {
    let mut member = GuildMember::from(partial.clone());
    member.user.id = user_id;
    member
}

/// Permissions of `user_id` in one of the guild's channels
///
/// Members missing from the guild's member map (large guilds only cache a
/// subset) are looked up in `resolved`. Returns `None` when neither knows the
/// member, so the caller must fetch it.
pub fn member_permissions(
    guild: &SerenityGuild,
    channel_id: ChannelId,
    user_id: UserId,
    resolved: Option<&Option<GuildMember>>,
) -> Option<Permissions> {
    let Some(channel) = guild.channels.get(&channel_id) else {
        return Some(Permissions::empty());
    };

    let member = match guild.members.get(&user_id) {
        Some(member) => Some(member),
        None => resolved?.as_ref(),
    };

    Some(
        member
            .map(|m| Permissions::from_bits(guild.user_permissions_in(channel, m).bits()))
            .unwrap_or_default(),
    )
}

type MemberKey = (GuildId, UserId);

/// Discord view of the platform for quote lookups
pub struct DiscordPlatform {
    cache: Arc<Cache>,
    http: Arc<Http>,
    config: DiscordConfig,
    owners: OnceCell<HashSet<u64>>,
    /// Members resolved outside the gateway cache; `None` means not a member
    members: Mutex<HashMap<MemberKey, Option<GuildMember>>>,
}

impl DiscordPlatform {
    /// Create a platform view from a gateway event context
    pub fn new(ctx: &Context, config: DiscordConfig) -> Self {
        Self::from_parts(Arc::clone(&ctx.cache), Arc::clone(&ctx.http), config)
    }

    pub fn from_parts(cache: Arc<Cache>, http: Arc<Http>, config: DiscordConfig) -> Self {
        Self {
            cache,
            http,
            config,
            owners: OnceCell::new(),
            members: Mutex::new(HashMap::new()),
        }
    }

    /// Seed the invoking member from a command message
    ///
    /// Gateway messages carry the author's roles, which covers the current
    /// guild without an HTTP lookup.
    pub fn with_invoker(self, msg: &SerenityMessage) -> Self {
        if let (Some(guild_id), Some(partial)) = (msg.guild_id, msg.member.as_deref()) {
            let member = member_from_partial(msg.author.id, partial);
            self.remember_member((guild_id, msg.author.id), Some(member));
        }
        self
    }

    fn remember_member(&self, key: MemberKey, member: Option<GuildMember>) {
        self.members
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, member);
    }

    /// Permissions from cached data only; `None` when the member is unknown
    fn known_permissions(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Option<Permissions> {
        let Some(guild) = self.cache.guild(guild_id) else {
            return Some(Permissions::empty());
        };
        let members = self.members.lock().unwrap_or_else(PoisonError::into_inner);
        member_permissions(&guild, channel_id, user_id, members.get(&(guild_id, user_id)))
    }

    /// Fetch a member missing from the cache; `None` if they are not in the guild
    async fn fetch_member(&self, guild_id: GuildId, user_id: UserId) -> Option<GuildMember> {
        match guild_id.member(&self.http, user_id).await {
            Ok(member) => Some(member),
            Err(e) => {
                let e = map_error(e);
                if e.is_per_channel() {
                    debug!(guild_id = %guild_id, user_id = %user_id, error = %e, "Member not in guild");
                } else {
                    warn!(guild_id = %guild_id, user_id = %user_id, error = %e, "Failed to fetch member");
                }
                None
            }
        }
    }

    /// Describe the author and location of a command message
    pub fn request_context(&self, msg: &SerenityMessage) -> RequestContext {
        let guild = msg.guild_id.and_then(|id| self.cache.guild(id));
        request_context(msg, guild.as_deref())
    }

    fn convert(&self, msg: &SerenityMessage, guild_id: Option<u64>) -> Message {
        let guild = guild_id
            .filter(|id| *id != 0)
            .and_then(|id| self.cache.guild(GuildId::new(id)));
        convert_message(msg, guild.as_deref())
    }

    /// Application owner, or every member of the owning team
    async fn fetch_owners(&self) -> Result<HashSet<u64>, QuoteError> {
        let info = self
            .http
            .get_current_application_info()
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to fetch application info"))
            .map_err(map_error)?;

        let mut owners = HashSet::new();
        if let Some(team) = &info.team {
            owners.extend(team.members.iter().map(|m| m.user.id.get()));
        } else if let Some(owner) = &info.owner {
            owners.insert(owner.id.get());
        }

        debug!(count = owners.len(), "Resolved bot owners");
        Ok(owners)
    }

    /// Text channel ids of every cached guild
    fn cached_channel_ids(&self) -> Vec<(ChannelId, GuildId)> {
        let mut ids = Vec::new();
        for guild_id in self.cache.guilds() {
            if let Some(guild) = self.cache.guild(guild_id) {
                ids.extend(
                    guild
                        .channels
                        .values()
                        .filter(|c| channel_kind(c.kind).is_text())
                        .map(|c| (c.id, guild_id)),
                );
            }
        }
        ids
    }
}

#[async_trait]
impl QuotePlatform for DiscordPlatform {
    fn guilds(&self) -> Vec<Guild> {
        let mut guilds: Vec<(serenity::model::Timestamp, Guild)> = self
            .cache
            .guilds()
            .into_iter()
            .filter_map(|id| self.cache.guild(id).map(|g| (g.joined_at, convert_guild(&g))))
            .collect();

        // Membership order: the guild the bot joined first comes first.
        guilds.sort_by_key(|(joined_at, guild)| (*joined_at, guild.id));
        guilds.into_iter().map(|(_, guild)| guild).collect()
    }

    async fn permissions_for(&self, channel: &Channel, member: Member) -> Permissions {
        let user_id = match member {
            Member::Bot => self.cache.current_user().id,
            Member::User(0) => return Permissions::empty(),
            Member::User(id) => UserId::new(id),
        };
        let guild_id = match channel.guild_id {
            Some(id) if id != 0 && channel.id != 0 => GuildId::new(id),
            _ => return Permissions::empty(),
        };
        let channel_id = ChannelId::new(channel.id);

        if let Some(permissions) = self.known_permissions(guild_id, channel_id, user_id) {
            return permissions;
        }

        let fetched = self.fetch_member(guild_id, user_id).await;
        self.remember_member((guild_id, user_id), fetched);

        self.known_permissions(guild_id, channel_id, user_id)
            .unwrap_or_default()
    }

    async fn is_owner(&self, user_id: u64) -> Result<bool, QuoteError> {
        if !self.config.owner_ids.is_empty() {
            return Ok(self.config.owner_ids.contains(&user_id));
        }

        let owners = self.owners.get_or_try_init(|| self.fetch_owners()).await?;
        Ok(owners.contains(&user_id))
    }

    fn cached_messages(&self, ids: &[u64]) -> Vec<Message> {
        let message_ids: Vec<MessageId> = ids
            .iter()
            .filter(|id| **id != 0)
            .map(|id| MessageId::new(*id))
            .collect();

        let mut found = Vec::new();
        for (channel_id, guild_id) in self.cached_channel_ids() {
            let hits: Vec<SerenityMessage> = match self.cache.channel_messages(channel_id) {
                Some(messages) => message_ids
                    .iter()
                    .filter_map(|id| messages.get(id).cloned())
                    .collect(),
                None => continue,
            };
            found.extend(hits.iter().map(|m| self.convert(m, Some(guild_id.get()))));
        }

        debug!(requested = ids.len(), hits = found.len(), "Checked message cache");
        found
    }

    async fn fetch_message(
        &self,
        channel: &Channel,
        message_id: u64,
    ) -> Result<Message, QuoteError> {
        if channel.id == 0 || message_id == 0 {
            return Err(QuoteError::http(404, "Unknown Message"));
        }
        let channel_id = ChannelId::new(channel.id);

        debug!(channel_id = %channel.id, message_id = %message_id, "Fetching message from Discord");

        let msg = channel_id
            .message(&self.http, MessageId::new(message_id))
            .await
            .map_err(map_error)?;

        Ok(self.convert(&msg, channel.guild_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_http_errors_are_transport_errors() {
        let err = map_error(serenity::Error::Other("connection reset"));
        assert!(matches!(err, QuoteError::Transport(_)));
        assert!(!err.is_per_channel());
    }

    const GUILD: u64 = 1;
    const CHANNEL: u64 = 10;
    const REQUESTER: u64 = 500;

    /// Guild whose @everyone role can read its one text channel and whose
    /// member map does not contain the requester
    fn guild_without_requester() -> SerenityGuild {
        use serenity::model::channel::{ChannelType, GuildChannel};
        use serenity::model::guild::Role;
        use serenity::model::id::RoleId;
        use serenity::model::Permissions as SerenityPermissions;

        let mut everyone = Role::default();
        everyone.id = RoleId::new(GUILD);
        everyone.permissions =
            SerenityPermissions::VIEW_CHANNEL | SerenityPermissions::READ_MESSAGE_HISTORY;

        let mut channel = GuildChannel::default();
        channel.id = ChannelId::new(CHANNEL);
        channel.guild_id = GuildId::new(GUILD);
        channel.kind = ChannelType::Text;

        let mut guild = SerenityGuild::default();
        guild.id = GuildId::new(GUILD);
        guild.owner_id = UserId::new(999);
        guild.roles.insert(everyone.id, everyone);
        guild.channels.insert(channel.id, channel);
        guild
    }

    fn requester() -> GuildMember {
        let mut member = GuildMember::default();
        member.user.id = UserId::new(REQUESTER);
        member.guild_id = GuildId::new(GUILD);
        member
    }

    #[test]
    fn test_uncached_requester_needs_lookup() {
        let guild = guild_without_requester();

        let perms = member_permissions(
            &guild,
            ChannelId::new(CHANNEL),
            UserId::new(REQUESTER),
            None,
        );

        assert_eq!(perms, None);
    }

    #[test]
    fn test_uncached_requester_resolved_by_lookup() {
        let guild = guild_without_requester();
        let resolved = Some(requester());

        let perms = member_permissions(
            &guild,
            ChannelId::new(CHANNEL),
            UserId::new(REQUESTER),
            Some(&resolved),
        )
        .unwrap();

        assert!(perms.contains(Permissions::READ));
    }

    #[test]
    fn test_requester_outside_guild_has_no_permissions() {
        let guild = guild_without_requester();

        let perms = member_permissions(
            &guild,
            ChannelId::new(CHANNEL),
            UserId::new(REQUESTER),
            Some(&None),
        );

        assert_eq!(perms, Some(Permissions::empty()));
    }

    #[test]
    fn test_cached_member_wins_over_lookup() {
        let mut guild = guild_without_requester();
        guild.members.insert(UserId::new(REQUESTER), requester());

        let perms = member_permissions(
            &guild,
            ChannelId::new(CHANNEL),
            UserId::new(REQUESTER),
            Some(&None),
        )
        .unwrap();

        assert!(perms.contains(Permissions::READ));
    }

    #[test]
    fn test_unknown_channel_has_no_permissions() {
        let guild = guild_without_requester();

        let perms = member_permissions(&guild, ChannelId::new(77), UserId::new(REQUESTER), None);

        assert_eq!(perms, Some(Permissions::empty()));
    }

    fn cached_platform() -> DiscordPlatform {
        use serenity::model::channel::{ChannelType, GuildChannel};
        use serenity::model::event::{GuildCreateEvent, MessageCreateEvent};

        let cache = Arc::new(Cache::new());
        cache.set_max_messages(10);

        let mut guild = guild_without_requester();
        let mut voice = GuildChannel::default();
        voice.id = ChannelId::new(11);
        voice.guild_id = GuildId::new(GUILD);
        voice.kind = ChannelType::Voice;
        guild.channels.insert(voice.id, voice);

        let mut create: GuildCreateEvent =
            serde_json::from_value(serde_json::to_value(&guild).unwrap()).unwrap();
        cache.update(&mut create);

        for (message_id, channel_id) in [(100, CHANNEL), (200, 11)] {
            let mut msg = SerenityMessage::default();
            msg.id = MessageId::new(message_id);
            msg.channel_id = ChannelId::new(channel_id);
            msg.guild_id = Some(GuildId::new(GUILD));
            msg.author.id = UserId::new(REQUESTER);
            let mut event: MessageCreateEvent =
                serde_json::from_value(serde_json::to_value(&msg).unwrap()).unwrap();
            cache.update(&mut event);
        }

        DiscordPlatform::from_parts(cache, Arc::new(Http::new("")), DiscordConfig::default())
    }

    #[test]
    fn test_cached_channel_ids_only_text_channels() {
        let platform = cached_platform();

        assert_eq!(
            platform.cached_channel_ids(),
            vec![(ChannelId::new(CHANNEL), GuildId::new(GUILD))]
        );
    }

    #[test]
    fn test_cached_messages_searches_text_channels() {
        let platform = cached_platform();

        let found = platform.cached_messages(&[100, 200, 300, 0]);

        let ids: Vec<u64> = found.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![100]);
        assert_eq!(found[0].guild.as_ref().map(|g| g.id), Some(GUILD));
    }

    #[test]
    fn test_requester_missing_from_member_cache_is_remembered() {
        let platform = cached_platform();
        let key = (GuildId::new(GUILD), UserId::new(REQUESTER));

        assert_eq!(platform.known_permissions(key.0, ChannelId::new(CHANNEL), key.1), None);

        platform.remember_member(key, Some(requester()));
        let perms = platform
            .known_permissions(key.0, ChannelId::new(CHANNEL), key.1)
            .unwrap();
        assert!(perms.contains(Permissions::READ));

        platform.remember_member(key, None);
        assert_eq!(
            platform.known_permissions(key.0, ChannelId::new(CHANNEL), key.1),
            Some(Permissions::empty())
        );
    }

    #[test]
    fn test_member_from_partial_keeps_roles() {
        let partial: PartialMember =
            serde_json::from_value(serde_json::json!({ "roles": ["2", "3"] })).unwrap();

        let member = member_from_partial(UserId::new(REQUESTER), &partial);

        assert_eq!(member.user.id, UserId::new(REQUESTER));
        assert_eq!(member.roles.len(), 2);
    }
}
