//! Guestbook messages posted through the contact form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation state set by the admin surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Visible,
    Hidden,
    /// Unrecognized status; treated as visible.
    #[serde(other)]
    Other,
}

/// Admin reply attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reply {
    #[serde(deserialize_with = "super::lenient_string")]
    pub content: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    /// Unique within `messages`; derived from the creation time.
    #[serde(deserialize_with = "super::lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "super::lenient_string")]
    pub message: String,
    /// RFC 3339 timestamp.
    #[serde(deserialize_with = "super::lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "super::lenient_or_default")]
    pub status: MessageStatus,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::lenient_or_default"
    )]
    pub reply: Option<Reply>,
}

impl Message {
    pub fn is_visible(&self) -> bool {
        self.status != MessageStatus::Hidden
    }

    /// Parsed `date` in epoch milliseconds.
    pub fn timestamp_ms(&self) -> Option<i64> {
        parse_timestamp_ms(&self.date)
    }
}

/// Parses an RFC 3339 date or a bare epoch-millisecond integer.
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc).timestamp_millis());
    }
    trimmed.parse::<i64>().ok()
}

/// Formats epoch milliseconds the way stored message dates are written.
pub fn format_timestamp_ms(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .unwrap_or_default()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
