//! Domain Services
//!
//! Mention cleanup, card rendering, channel eligibility and message lookup.

pub mod card;
pub mod eligibility;
pub mod mention;
pub mod message_ids;
pub mod resolver;

pub use card::render;
pub use eligibility::eligible_channels;
pub use mention::{rewrite, rewrite_role_mentions};
pub use message_ids::parse_message_ids;
pub use resolver::find_messages;
