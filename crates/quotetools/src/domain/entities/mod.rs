//! Domain Entities
//!
//! Plain data snapshots of platform objects:
//! - Message: a posted message with its author, mentions and attachments
//! - Channel: a conversation stream
//! - Guild: a community and its channels

mod channel;
mod guild;
mod message;

pub use channel::*;
pub use guild::*;
pub use message::*;
