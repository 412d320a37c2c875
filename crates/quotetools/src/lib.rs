//! Quotetools Domain Library
//!
//! Core types and operations behind a "quote a message elsewhere" bot command.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): platform-neutral data and logic
//!   - `entities/`: Message, Channel, Guild snapshots
//!   - `value_objects/`: Permissions, DisplayCard, RequestContext
//!   - `services/`: mention cleanup, card rendering, channel eligibility,
//!     message resolution, id parsing
//!   - `errors/`: QuoteError
//!
//! - **Ports** (`ports/`): the `QuotePlatform` trait a chat client implements
//!
//! - **Application** (`application/`): the `QuoteService` use case
//!
//! # Usage
//!
//! ```rust,ignore
//! use quotetools::{QuoteService, RequestContext};
//!
//! let service = QuoteService::new(platform);
//! let outcome = service.quote(&ctx, &[1234567890]).await?;
//! ```

pub mod application;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use application::{QuoteOutcome, QuoteService};
pub use domain::services::{
    eligible_channels, find_messages, parse_message_ids, render, rewrite_role_mentions,
};
pub use domain::{
    Attachment, Author, CardAuthor, CardField, CardFooter, Channel, ChannelKind, DisplayCard,
    Guild, GuildInfo, Message, Permissions, QuoteError, RequestContext, RoleMention,
};
pub use ports::{Member, QuotePlatform};
