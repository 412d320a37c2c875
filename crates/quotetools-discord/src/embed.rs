//! DisplayCard to serenity embed

use quotetools::DisplayCard;
use serenity::builder::{CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter};
use serenity::model::Timestamp;

/// Build the Discord embed for a rendered card
pub fn card_to_embed(card: &DisplayCard) -> CreateEmbed {
    let mut footer = CreateEmbedFooter::new(&card.footer.text);
    if let Some(icon_url) = &card.footer.icon_url {
        footer = footer.icon_url(icon_url);
    }

    let mut embed = CreateEmbed::new()
        .author(
            CreateEmbedAuthor::new(&card.author.name)
                .url(&card.author.url)
                .icon_url(&card.author.icon_url),
        )
        .footer(footer);

    if let Some(description) = &card.description {
        embed = embed.description(description);
    }

    if let Ok(timestamp) = Timestamp::from_unix_timestamp(card.timestamp.timestamp()) {
        embed = embed.timestamp(timestamp);
    }

    if let Some(color) = card.color {
        embed = embed.colour(color);
    }

    if let Some(image) = &card.image {
        embed = embed.image(image);
    }

    for field in &card.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }

    embed
}
