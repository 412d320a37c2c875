//! DisplayCard - a rendered, platform-neutral rich embed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rich display card built from a quoted message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayCard {
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub color: Option<u32>,
    pub author: CardAuthor,
    pub footer: CardFooter,
    pub image: Option<String>,
    #[serde(default)]
    pub fields: Vec<CardField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAuthor {
    pub name: String,
    pub url: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFooter {
    pub text: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}
