//! In-memory platform used by unit tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Author, Channel, Guild, GuildInfo, Message, Permissions, QuoteError};
use crate::ports::{Member, QuotePlatform};

#[derive(Default)]
pub(crate) struct FakePlatform {
    guilds: Vec<Guild>,
    owners: HashSet<u64>,
    bot_denied: HashSet<u64>,
    user_denied: HashSet<(u64, u64)>,
    cache: Vec<Message>,
    stored: HashMap<(u64, u64), Message>,
    broken_channels: HashSet<u64>,
    pub fetches: Mutex<Vec<(u64, u64)>>,
    pub calls: AtomicUsize,
}

impl FakePlatform {
    pub fn new(guilds: Vec<Guild>) -> Self {
        Self {
            guilds,
            ..Default::default()
        }
    }

    pub fn with_owner(mut self, user_id: u64) -> Self {
        self.owners.insert(user_id);
        self
    }

    pub fn deny_bot(mut self, channel_id: u64) -> Self {
        self.bot_denied.insert(channel_id);
        self
    }

    pub fn deny_user(mut self, channel_id: u64, user_id: u64) -> Self {
        self.user_denied.insert((channel_id, user_id));
        self
    }

    pub fn with_cached(mut self, message: Message) -> Self {
        self.cache.push(message);
        self
    }

    /// Make a message fetchable from its channel
    pub fn with_stored(mut self, message: Message) -> Self {
        self.stored.insert((message.channel.id, message.id), message);
        self
    }

    /// Fetches from this channel fail with a transport error
    pub fn with_broken_channel(mut self, channel_id: u64) -> Self {
        self.broken_channels.insert(channel_id);
        self
    }

    pub fn channel(&self, channel_id: u64) -> Channel {
        self.guilds
            .iter()
            .flat_map(|g| g.channels.iter())
            .find(|c| c.id == channel_id)
            .cloned()
            .unwrap_or_else(|| panic!("unknown channel {channel_id}"))
    }

    /// A text message posted in `channel_id`
    pub fn message(&self, id: u64, channel_id: u64) -> Message {
        let channel = self.channel(channel_id);
        let guild = self
            .guilds
            .iter()
            .find(|g| Some(g.id) == channel.guild_id)
            .map(|g| GuildInfo {
                id: g.id,
                name: g.name.clone(),
                icon_url: g.icon_url.clone(),
            });
        let mut msg = Message::new(
            id,
            Author::new(99, "author", "https://cdn.example/a.png"),
            channel,
            format!("https://discord.com/channels/0/{channel_id}/{id}"),
        )
        .with_content(format!("message {id}"));
        msg.guild = guild;
        msg
    }

    pub fn fetched(&self) -> Vec<(u64, u64)> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl QuotePlatform for FakePlatform {
    fn guilds(&self) -> Vec<Guild> {
        self.record_call();
        self.guilds.clone()
    }

    async fn permissions_for(&self, channel: &Channel, member: Member) -> Permissions {
        self.record_call();
        let denied = match member {
            Member::Bot => self.bot_denied.contains(&channel.id),
            Member::User(user_id) => self.user_denied.contains(&(channel.id, user_id)),
        };
        if denied {
            Permissions::VIEW_CHANNEL
        } else {
            Permissions::READ
        }
    }

    async fn is_owner(&self, user_id: u64) -> Result<bool, QuoteError> {
        self.record_call();
        Ok(self.owners.contains(&user_id))
    }

    fn cached_messages(&self, ids: &[u64]) -> Vec<Message> {
        self.record_call();
        self.cache
            .iter()
            .filter(|m| ids.contains(&m.id))
            .cloned()
            .collect()
    }

    async fn fetch_message(
        &self,
        channel: &Channel,
        message_id: u64,
    ) -> Result<Message, QuoteError> {
        self.record_call();
        self.fetches.lock().unwrap().push((channel.id, message_id));

        if self.broken_channels.contains(&channel.id) {
            return Err(QuoteError::Transport("connection reset".into()));
        }

        self.stored
            .get(&(channel.id, message_id))
            .cloned()
            .ok_or_else(|| QuoteError::http(404, "Unknown Message"))
    }
}
