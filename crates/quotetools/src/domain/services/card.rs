//! Display card rendering

use crate::domain::entities::Message;
use crate::domain::errors::QuoteError;
use crate::domain::value_objects::{CardAuthor, CardField, CardFooter, DisplayCard};

use super::mention::rewrite_role_mentions;

/// Attachment extensions shown inline as the card image
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "gif", "jpeg"];

/// Render a guild message as a display card
///
/// Only messages from guild text channels can be rendered.
pub fn render(message: &Message) -> Result<DisplayCard, QuoteError> {
    let channel = &message.channel;
    let guild = match &message.guild {
        Some(guild) if channel.is_guild_text() => guild,
        _ => {
            return Err(QuoteError::Precondition(format!(
                "message {} is not from a guild text channel",
                message.id
            )))
        }
    };

    let author = &message.author;
    let mut card = DisplayCard {
        description: rewrite_role_mentions(message),
        timestamp: message.timestamp,
        color: author.color.filter(|c| *c != 0),
        author: CardAuthor {
            name: format!("{} ▸", author.name),
            url: message.jump_url.clone(),
            icon_url: author.avatar_url.clone(),
        },
        footer: CardFooter {
            text: format!("Said in {} #{}", guild.name, channel.name),
            icon_url: guild.icon_url.clone(),
        },
        image: None,
        fields: Vec::new(),
    };

    if let Some(attachment) = message.attachments.first() {
        if IMAGE_EXTENSIONS.contains(&attachment.extension()) {
            card.image = Some(attachment.url.clone());
        } else {
            card.fields.push(CardField {
                name: "Message has an attachment".to_string(),
                value: format!("[{}]({})", attachment.filename, attachment.url),
                inline: true,
            });
        }
    }

    Ok(card)
}
