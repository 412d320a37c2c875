//! Channel eligibility
//!
//! Which channels a quote request may search, across every guild the bot is
//! in. The bot must be able to read each channel, and so must the requester
//! unless they own the bot.

use tracing::debug;

use crate::domain::entities::Channel;
use crate::domain::errors::QuoteError;
use crate::domain::value_objects::{Permissions, RequestContext};
use crate::ports::{Member, QuotePlatform};

/// Channels the requester may search, in lookup order
///
/// Guild blocks follow the bot's guild order; within a block the requester's
/// current channel comes first.
pub async fn eligible_channels<P>(
    platform: &P,
    ctx: &RequestContext,
) -> Result<Vec<Channel>, QuoteError>
where
    P: QuotePlatform + ?Sized,
{
    ctx.require_guild()?;

    let is_owner = platform.is_owner(ctx.user_id).await?;
    let needed = Permissions::READ;

    let mut ret = Vec::new();

    for guild in platform.guilds() {
        let mut chans: Vec<Channel> = Vec::new();
        for c in guild.text_channels() {
            if !platform.permissions_for(c, Member::Bot).await.contains(needed) {
                continue;
            }
            if !is_owner
                && !platform
                    .permissions_for(c, Member::User(ctx.user_id))
                    .await
                    .contains(needed)
            {
                continue;
            }
            chans.push(c.clone());
        }

        if let Some(pos) = chans.iter().position(|c| c.id == ctx.channel.id) {
            let current = chans.remove(pos);
            chans.insert(0, current);
        }

        ret.extend(chans);
    }

    debug!(
        user_id = %ctx.user_id,
        is_owner = %is_owner,
        count = ret.len(),
        "Computed eligible channels"
    );

    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChannelKind, Guild};
    use crate::testing::FakePlatform;

    const USER: u64 = 500;

    fn guilds() -> Vec<Guild> {
        vec![
            Guild::new(1, "First")
                .with_text_channel(10, "a")
                .with_text_channel(11, "b")
                .with_text_channel(12, "c"),
            Guild::new(2, "Second")
                .with_text_channel(20, "d")
                .with_channel(Channel::text(21, 2, "voice").with_kind(ChannelKind::Voice))
                .with_text_channel(22, "e"),
        ]
    }

    fn ids(channels: &[Channel]) -> Vec<u64> {
        channels.iter().map(|c| c.id).collect()
    }

    #[tokio::test]
    async fn test_requester_permissions_filter_channels() {
        let platform = FakePlatform::new(guilds()).deny_user(10, USER);
        let ctx = RequestContext::in_guild(USER, platform.channel(11));

        let result = eligible_channels(&platform, &ctx).await.unwrap();

        assert!(!ids(&result).contains(&10));
        assert!(ids(&result).contains(&12));
    }

    #[tokio::test]
    async fn test_current_channel_leads_its_guild_block() {
        let platform = FakePlatform::new(guilds());
        let ctx = RequestContext::in_guild(USER, platform.channel(22));

        let result = eligible_channels(&platform, &ctx).await.unwrap();

        assert_eq!(ids(&result), vec![10, 11, 12, 22, 20]);
    }

    #[tokio::test]
    async fn test_bot_permissions_always_apply() {
        let platform = FakePlatform::new(guilds()).with_owner(USER).deny_bot(11);
        let ctx = RequestContext::in_guild(USER, platform.channel(10));

        let result = eligible_channels(&platform, &ctx).await.unwrap();

        assert_eq!(ids(&result), vec![10, 12, 20, 22]);
    }

    #[tokio::test]
    async fn test_owner_skips_requester_check() {
        let platform = FakePlatform::new(guilds())
            .with_owner(USER)
            .deny_user(20, USER)
            .deny_user(22, USER);
        let ctx = RequestContext::in_guild(USER, platform.channel(12));

        let result = eligible_channels(&platform, &ctx).await.unwrap();

        assert_eq!(ids(&result), vec![12, 10, 11, 20, 22]);
    }

    #[tokio::test]
    async fn test_nothing_eligible_is_empty() {
        let platform = FakePlatform::new(guilds())
            .deny_user(10, USER)
            .deny_user(11, USER)
            .deny_user(12, USER)
            .deny_user(20, USER)
            .deny_user(22, USER);
        let ctx = RequestContext::in_guild(USER, platform.channel(10));

        let result = eligible_channels(&platform, &ctx).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_direct_message_request_fails_fast() {
        let platform = FakePlatform::new(guilds());
        let ctx = RequestContext {
            user_id: USER,
            guild_id: None,
            channel: Channel::private(3),
            is_member: false,
        };

        let err = eligible_channels(&platform, &ctx).await.unwrap_err();
        assert!(matches!(err, QuoteError::Precondition(_)));
        assert_eq!(platform.call_count(), 0);
    }
}
