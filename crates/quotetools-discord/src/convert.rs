//! Conversion from serenity models to quotetools domain types

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use quotetools::{
    Attachment, Author, Channel, ChannelKind, Guild, GuildInfo, Message, RequestContext,
    RoleMention,
};
use serenity::model::channel::{ChannelType, GuildChannel, Message as SerenityMessage};
use serenity::model::guild::{Guild as SerenityGuild, Role};
use serenity::model::id::RoleId;

/// Map a serenity channel type onto the domain's channel kinds
pub fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Text => ChannelKind::Text,
        ChannelType::News => ChannelKind::News,
        ChannelType::Voice | ChannelType::Stage => ChannelKind::Voice,
        ChannelType::Category => ChannelKind::Category,
        ChannelType::NewsThread | ChannelType::PublicThread | ChannelType::PrivateThread => {
            ChannelKind::Thread
        }
        ChannelType::Private | ChannelType::GroupDm => ChannelKind::Private,
        _ => ChannelKind::Other,
    }
}

pub fn convert_channel(channel: &GuildChannel) -> Channel {
    Channel {
        id: channel.id.get(),
        guild_id: Some(channel.guild_id.get()),
        name: channel.name.clone(),
        kind: channel_kind(channel.kind),
    }
}

/// Convert a cached guild, ordering channels the way the client lists them
pub fn convert_guild(guild: &SerenityGuild) -> Guild {
    let mut channels: Vec<&GuildChannel> = guild.channels.values().collect();
    channels.sort_by_key(|c| (c.position, c.id));

    let mut converted = channels
        .into_iter()
        .fold(Guild::new(guild.id.get(), guild.name.clone()), |g, c| {
            g.with_channel(convert_channel(c))
        });
    if let Some(icon_url) = guild.icon_url() {
        converted = converted.with_icon_url(icon_url);
    }
    converted
}

/// Color of the member's highest colored role
///
/// `None` when no role carries a color.
pub fn member_colour(roles: &HashMap<RoleId, Role>, member_roles: &[RoleId]) -> Option<u32> {
    member_roles
        .iter()
        .filter_map(|id| roles.get(id))
        .filter(|role| role.colour.0 != 0)
        .max_by_key(|role| (role.position, role.id))
        .map(|role| role.colour.0)
}

/// Resolve mentioned role ids to names; roles missing from the guild are skipped
pub fn role_mentions(roles: &HashMap<RoleId, Role>, mentioned: &[RoleId]) -> Vec<RoleMention> {
    mentioned
        .iter()
        .filter_map(|id| roles.get(id))
        .map(|role| RoleMention::new(role.id.get(), role.name.clone()))
        .collect()
}

/// Resolve the channel a message was posted in
fn message_channel(msg: &SerenityMessage, guild: Option<&SerenityGuild>) -> Channel {
    let Some(guild) = guild else {
        return Channel::private(msg.channel_id.get());
    };

    guild
        .channels
        .get(&msg.channel_id)
        .or_else(|| guild.threads.iter().find(|t| t.id == msg.channel_id))
        .map(convert_channel)
        .unwrap_or_else(|| Channel {
            id: msg.channel_id.get(),
            guild_id: Some(guild.id.get()),
            name: String::new(),
            kind: ChannelKind::Other,
        })
}

/// Convert a serenity message into a domain message
///
/// `guild` is the cached guild the message belongs to; without it the message
/// is treated as a direct message. Messages fetched over HTTP carry no guild
/// id, so the caller decides which guild applies.
pub fn convert_message(msg: &SerenityMessage, guild: Option<&SerenityGuild>) -> Message {
    // Convert serenity's time::OffsetDateTime to chrono::DateTime<Utc>
    let timestamp = DateTime::<Utc>::from_timestamp(
        msg.timestamp.unix_timestamp(),
        msg.timestamp.nanosecond(),
    )
    .unwrap_or_else(Utc::now);

    let mut author = Author::new(msg.author.id.get(), msg.author.name.clone(), msg.author.face());
    let mut mentions = Vec::new();

    if let Some(guild) = guild {
        // Authors who left the guild have no member entry and keep no color.
        let member_roles = guild
            .members
            .get(&msg.author.id)
            .map(|m| m.roles.as_slice())
            .or_else(|| msg.member.as_ref().map(|m| m.roles.as_slice()));

        author.color = member_roles.and_then(|r| member_colour(&guild.roles, r));
        mentions = role_mentions(&guild.roles, &msg.mention_roles);
    }

    let attachments = msg
        .attachments
        .iter()
        .map(|a| Attachment::new(a.filename.clone(), a.url.clone()))
        .collect();

    let converted = Message::new(msg.id.get(), author, message_channel(msg, guild), msg.link())
        .with_content(msg.content.clone())
        .with_timestamp(timestamp)
        .with_role_mentions(mentions)
        .with_attachments(attachments);

    match guild {
        Some(g) => converted.with_guild(GuildInfo {
            id: g.id.get(),
            name: g.name.clone(),
            icon_url: g.icon_url(),
        }),
        None => converted,
    }
}

/// Describe who issued a command message, and where
pub fn request_context(msg: &SerenityMessage, guild: Option<&SerenityGuild>) -> RequestContext {
    let is_member =
        guild.is_some_and(|g| g.members.contains_key(&msg.author.id) || msg.member.is_some());

    RequestContext {
        user_id: msg.author.id.get(),
        guild_id: guild.map(|g| g.id.get()),
        channel: message_channel(msg, guild),
        is_member,
    }
}
