//! Role mention cleanup
//!
//! Rewrites `<@&ROLE_ID>` tokens into `@RoleName` so quoted text stays readable
//! (and does not ping) outside its guild.

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::domain::entities::{Message, RoleMention};

/// Rewrite the role mentions of a message's content
pub fn rewrite_role_mentions(message: &Message) -> Option<String> {
    rewrite(
        message.content.as_deref(),
        message.guild.is_some(),
        &message.role_mentions,
    )
}

/// Replace each known role-mention token in `content` with `@name`
///
/// Empty content is treated as absent. Outside a guild the content is
/// returned unchanged, as are tokens for roles missing from `role_mentions`.
pub fn rewrite(
    content: Option<&str>,
    in_guild: bool,
    role_mentions: &[RoleMention],
) -> Option<String> {
    let content = content.filter(|c| !c.is_empty())?;

    if !in_guild || role_mentions.is_empty() {
        return Some(content.to_string());
    }

    let transformations: HashMap<String, String> = role_mentions
        .iter()
        .map(|role| (role.token(), format!("@{}", role.name)))
        .collect();

    let alternation = transformations
        .keys()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");

    // Tokens are escaped literals, so the pattern is always valid.
    let Ok(pattern) = Regex::new(&alternation) else {
        return Some(content.to_string());
    };

    let result = pattern.replace_all(content, |caps: &Captures| {
        transformations.get(&caps[0]).cloned().unwrap_or_default()
    });

    Some(result.into_owned())
}
