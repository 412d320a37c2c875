//! Message id parsing for command arguments

const LINK_HOSTS: [&str; 6] = [
    "discord.com",
    "ptb.discord.com",
    "canary.discord.com",
    "discordapp.com",
    "ptb.discordapp.com",
    "canary.discordapp.com",
];

/// Parse whitespace-separated message ids or message links
///
/// Tokens that are neither, and zero ids, are skipped.
pub fn parse_message_ids(args: &str) -> Vec<u64> {
    args.split_whitespace()
        .filter_map(|token| token.parse::<u64>().ok().or_else(|| id_from_link(token)))
        .filter(|id| *id != 0)
        .collect()
}

/// `https://discord.com/channels/<guild|@me>/<channel>/<message>`, optionally in `<>`
fn id_from_link(token: &str) -> Option<u64> {
    let link = token.trim_start_matches('<').trim_end_matches('>');
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))?;
    let (host, path) = rest.split_once('/')?;
    if !LINK_HOSTS.contains(&host) {
        return None;
    }

    let mut parts = path.split('/');
    if parts.next()? != "channels" {
        return None;
    }
    let guild = parts.next()?;
    if guild != "@me" && guild.parse::<u64>().is_err() {
        return None;
    }
    parts.next()?.parse::<u64>().ok()?;
    let message_id = parts.next()?.parse().ok()?;

    parts.next().is_none().then_some(message_id)
}
