//! Discord Integration for quotetools
//!
//! Implements the `QuotePlatform` port on serenity's cache and HTTP client and
//! provides a gateway handler for the `quote` text command.
//!
//! # Usage
//!
//! ```rust,ignore
//! use quotetools_discord::{DiscordConfig, QuoteHandler};
//!
//! let config = DiscordConfig::from_env()?;
//! let client = serenity::Client::builder(&config.token, QuoteHandler::intents())
//!     .event_handler(QuoteHandler::new(config))
//!     .await?;
//! ```

mod config;
pub mod convert;
mod embed;
mod handler;
mod platform;

pub use config::DiscordConfig;
pub use embed::card_to_embed;
pub use handler::QuoteHandler;
pub use platform::{map_error, member_from_partial, member_permissions, DiscordPlatform};
