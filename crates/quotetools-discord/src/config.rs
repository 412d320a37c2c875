//! Discord configuration

use quotetools::QuoteError;
use serde::{Deserialize, Serialize};

/// Configuration for the Discord quote integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Discord bot token
    pub token: String,
    /// Prefix of text commands, e.g. `!` for `!quote`
    pub command_prefix: String,
    /// Users treated as bot owners; empty means ask Discord for the application owner
    #[serde(default)]
    pub owner_ids: Vec<u64>,
    /// Whether to delete the invoking message after quoting
    #[serde(default)]
    pub delete_invocation: bool,
}

impl DiscordConfig {
    /// Create a new Discord configuration with just a token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the environment, reading `.env` if present
    ///
    /// - `DISCORD_TOKEN` (required)
    /// - `QUOTE_PREFIX`
    /// - `QUOTE_OWNER_IDS`: comma-separated user ids
    /// - `QUOTE_DELETE_INVOCATION`: `true`/`false`
    pub fn from_env() -> Result<Self, QuoteError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, QuoteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| QuoteError::Config("DISCORD_TOKEN is not set".into()))?;

        let mut config = Self::new(token.trim());

        if let Some(prefix) = lookup("QUOTE_PREFIX").filter(|p| !p.is_empty()) {
            config.command_prefix = prefix;
        }

        if let Some(owners) = lookup("QUOTE_OWNER_IDS") {
            config.owner_ids = owners
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<u64>().map_err(|e| {
                        QuoteError::Config(format!("Invalid owner id '{}': {}", s, e))
                    })
                })
                .collect::<Result<Vec<u64>, QuoteError>>()?;
        }

        if let Some(flag) = lookup("QUOTE_DELETE_INVOCATION") {
            config.delete_invocation = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => {
                    return Err(QuoteError::Config(format!(
                        "Invalid QUOTE_DELETE_INVOCATION value '{}'",
                        other
                    )))
                }
            };
        }

        Ok(config)
    }

    /// Set the command prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = prefix.into();
        self
    }

    /// Add a bot owner
    pub fn with_owner(mut self, user_id: u64) -> Self {
        self.owner_ids.push(user_id);
        self
    }

    /// Delete the invoking message after quoting
    pub fn with_delete_invocation(mut self, enable: bool) -> Self {
        self.delete_invocation = enable;
        self
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            command_prefix: "!".to_string(),
            owner_ids: Vec::new(),
            delete_invocation: false,
        }
    }
}
