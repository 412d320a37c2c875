//! Gateway event handler for the quote command

use std::sync::Arc;

use quotetools::{parse_message_ids, QuoteError, QuoteService};
use serenity::async_trait;
use serenity::builder::CreateMessage;
use serenity::client::{Context, EventHandler};
use serenity::model::channel::Message;
use serenity::model::gateway::{GatewayIntents, Ready};
use tracing::{debug, error, info, warn};

use crate::config::DiscordConfig;
use crate::embed::card_to_embed;
use crate::platform::{map_error, DiscordPlatform};

const COMMAND: &str = "quote";

/// Handles `{prefix}quote <ids or links...>` in guild text channels
pub struct QuoteHandler {
    config: DiscordConfig,
}

impl QuoteHandler {
    pub fn new(config: DiscordConfig) -> Self {
        Self { config }
    }

    /// Gateway intents the handler relies on
    ///
    /// Members and guilds keep the cache able to answer permission checks.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    /// Arguments of a quote command, or `None` if `content` is not one
    pub fn command_args<'a>(&self, content: &'a str) -> Option<&'a str> {
        let rest = content
            .trim_start()
            .strip_prefix(self.config.command_prefix.as_str())?
            .strip_prefix(COMMAND)?;

        match rest.chars().next() {
            None => Some(""),
            Some(c) if c.is_whitespace() => Some(rest.trim()),
            Some(_) => None,
        }
    }

    async fn quote(&self, ctx: &Context, msg: &Message, args: &str) -> Result<(), QuoteError> {
        let ids = parse_message_ids(args);
        if ids.is_empty() {
            msg.reply(ctx, "Give me one or more message ids or links to quote.")
                .await
                .map_err(map_error)?;
            return Ok(());
        }

        let platform = Arc::new(DiscordPlatform::new(ctx, self.config.clone()).with_invoker(msg));
        let request = platform.request_context(msg);

        let service = QuoteService::new(platform);
        let outcome = match service.quote(&request, &ids).await {
            Err(QuoteError::Precondition(reason)) => {
                debug!(reason = %reason, "Quote command used outside a guild text channel");
                msg.reply(ctx, "This command only works in server text channels.")
                    .await
                    .map_err(map_error)?;
                return Ok(());
            }
            result => result?,
        };

        if outcome.cards.is_empty() {
            msg.reply(ctx, "I couldn't find any of those messages.")
                .await
                .map_err(map_error)?;
            return Ok(());
        }

        for card in &outcome.cards {
            msg.channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(card_to_embed(card)))
                .await
                .inspect_err(|e| error!(error = %e, "Failed to send quote embed"))
                .map_err(map_error)?;
        }

        if self.config.delete_invocation {
            if let Err(e) = msg.delete(ctx).await {
                debug!(error = %e, message_id = %msg.id, "Could not delete quote invocation");
            }
        }

        Ok(())
    }
}

#[async_trait]
impl EventHandler for QuoteHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Connected to Discord"
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let Some(args) = self.command_args(&msg.content) else {
            return;
        };

        debug!(user_id = %msg.author.id, channel_id = %msg.channel_id, "Quote command received");

        if let Err(e) = self.quote(&ctx, &msg, args).await {
            warn!(error = %e, message_id = %msg.id, "Quote command failed");
        }
    }
}
