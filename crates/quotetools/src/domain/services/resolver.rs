//! Message resolution
//!
//! Turns message ids into messages: the bot's recent-message cache first, then
//! a fetch from each eligible channel in turn until one has the message.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::entities::{Channel, Message};
use crate::domain::errors::QuoteError;
use crate::domain::value_objects::RequestContext;
use crate::ports::QuotePlatform;

use super::eligibility::eligible_channels;

/// Find the requested messages the requester is allowed to see
///
/// When `channels` is `None` the eligible channels are computed from `ctx`.
/// Results follow the order of `ids` (first occurrence); ids that cannot be
/// found, or resolve to a message outside the channel set, are dropped.
pub async fn find_messages<P>(
    platform: &P,
    ctx: &RequestContext,
    ids: &[u64],
    channels: Option<&[Channel]>,
) -> Result<Vec<Message>, QuoteError>
where
    P: QuotePlatform + ?Sized,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let computed;
    let channels = match channels {
        Some(channels) => channels,
        None => {
            computed = eligible_channels(platform, ctx).await?;
            computed.as_slice()
        }
    };

    let mut seen = HashSet::new();
    let mut accumulated: Vec<(u64, Option<Message>)> = ids
        .iter()
        .filter(|id| seen.insert(**id))
        .map(|id| (*id, None))
        .collect();

    // May pick up messages from ineligible channels; those are stripped below
    // rather than searched for again.
    for message in platform.cached_messages(ids) {
        if let Some(slot) = accumulated.iter_mut().find(|(id, _)| *id == message.id) {
            slot.1 = Some(message);
        }
    }

    for (id, slot) in accumulated.iter_mut() {
        if slot.is_none() {
            *slot = find_in_channels(platform, channels, *id).await?;
        }
    }

    let eligible: HashSet<u64> = channels.iter().map(|c| c.id).collect();

    Ok(accumulated
        .into_iter()
        .filter_map(|(_, message)| message)
        .filter(|m| eligible.contains(&m.channel.id))
        .collect())
}

/// Try each channel in order, stopping at the first that holds the message
async fn find_in_channels<P>(
    platform: &P,
    channels: &[Channel],
    message_id: u64,
) -> Result<Option<Message>, QuoteError>
where
    P: QuotePlatform + ?Sized,
{
    for channel in channels {
        match platform.fetch_message(channel, message_id).await {
            Ok(message) => return Ok(Some(message)),
            Err(e) if e.is_per_channel() => {
                debug!(
                    channel_id = %channel.id,
                    message_id = %message_id,
                    error = %e,
                    "Message not in channel"
                );
            }
            Err(e) => return Err(e),
        }
    }

    debug!(message_id = %message_id, "Message not found in any eligible channel");
    Ok(None)
}
