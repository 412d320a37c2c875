//! Quote Application Service (Use Case)
//!
//! Resolves requested messages and renders them as display cards.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::services::{find_messages, render};
use crate::domain::{Channel, DisplayCard, QuoteError, RequestContext};
use crate::ports::QuotePlatform;

/// Cards ready to post, plus the ids that produced nothing
#[derive(Debug, Clone, Default)]
pub struct QuoteOutcome {
    pub cards: Vec<DisplayCard>,
    pub missing: Vec<u64>,
}

/// Application service for the quote command
pub struct QuoteService<P: QuotePlatform> {
    platform: Arc<P>,
}

impl<P: QuotePlatform> QuoteService<P> {
    pub fn new(platform: Arc<P>) -> Self {
        Self { platform }
    }

    /// Quote messages from any channel the requester may read
    pub async fn quote(
        &self,
        ctx: &RequestContext,
        ids: &[u64],
    ) -> Result<QuoteOutcome, QuoteError> {
        self.quote_in(ctx, ids, None).await
    }

    /// Quote messages, searching only `channels` when given
    pub async fn quote_in(
        &self,
        ctx: &RequestContext,
        ids: &[u64],
        channels: Option<&[Channel]>,
    ) -> Result<QuoteOutcome, QuoteError> {
        let messages = find_messages(self.platform.as_ref(), ctx, ids, channels).await?;

        let mut outcome = QuoteOutcome::default();
        for id in ids {
            if !messages.iter().any(|m| m.id == *id) && !outcome.missing.contains(id) {
                outcome.missing.push(*id);
            }
        }

        for message in &messages {
            match render(message) {
                Ok(card) => outcome.cards.push(card),
                Err(e) => {
                    warn!(message_id = %message.id, error = %e, "Skipping unrenderable message");
                    outcome.missing.push(message.id);
                }
            }
        }

        info!(
            cards = outcome.cards.len(),
            user_id = %ctx.user_id,
            missing = outcome.missing.len(),
            "Quoted messages"
        );

        Ok(outcome)
    }
}
