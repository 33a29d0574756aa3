//! Public contact form submission.
//!
//! # Responsibility
//! - Validate visitor input and append a visible message to `messages`.
//!
//! # Invariants
//! - Validation failures write nothing.
//! - Message ids stay unique within the stored sequence.
//! - Unknown fields on existing stored messages survive the append.

use crate::clock::Clock;
use crate::keys;
use crate::model::message::{format_timestamp_ms, Message, MessageStatus};
use crate::store::{KeyValueStore, StoreError, StoreJsonExt};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Success text shown after a message is stored.
pub const SUBMIT_SUCCESS_TEXT: &str = "留言发送成功！我们会尽快回复您。";

/// Raw contact form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ContactFormError {
    MissingName,
    MissingEmail,
    MissingMessage,
    InvalidEmail,
    Store(StoreError),
}

impl ContactFormError {
    /// Message shown inline next to the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingName => "请输入您的姓名",
            Self::MissingEmail => "请输入您的邮箱",
            Self::MissingMessage => "请输入留言内容",
            Self::InvalidEmail => "请输入正确的邮箱格式",
            Self::Store(_) => "留言保存失败，请稍后重试",
        }
    }
}

impl Display for ContactFormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            other => write!(f, "{}", other.user_message()),
        }
    }
}

impl Error for ContactFormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ContactFormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Validates the form and appends the message.
///
/// Fields are trimmed before validation and storage. Returns the stored message.
pub fn submit_message(
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    form: &ContactForm,
) -> Result<Message, ContactFormError> {
    let name = form.name.trim();
    let email = form.email.trim();
    let body = form.message.trim();

    if name.is_empty() {
        return Err(ContactFormError::MissingName);
    }
    if email.is_empty() {
        return Err(ContactFormError::MissingEmail);
    }
    if body.is_empty() {
        return Err(ContactFormError::MissingMessage);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ContactFormError::InvalidEmail);
    }

    let mut stored = existing_messages(store)?;
    let now_ms = clock.now_ms();
    let message = Message {
        id: unique_id(&stored, now_ms),
        name: name.to_string(),
        email: email.to_string(),
        message: body.to_string(),
        date: format_timestamp_ms(now_ms),
        status: MessageStatus::Visible,
        reply: None,
    };

    stored.push(serde_json::to_value(&message).map_err(StoreError::from)?);
    store.write_json(keys::MESSAGES, &stored)?;

    info!(
        "event=message_submit module=contact_service status=ok id={} total={}",
        message.id,
        stored.len()
    );
    Ok(message)
}

/// Raw stored messages; present but non-array data is an error, never an empty list.
fn existing_messages(store: &dyn KeyValueStore) -> Result<Vec<serde_json::Value>, StoreError> {
    let Some(raw) = store.get(keys::MESSAGES)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Array(items)) => Ok(items),
        _ => {
            warn!("event=message_submit module=contact_service status=error key=messages error=malformed");
            Err(StoreError::Malformed {
                key: keys::MESSAGES.to_string(),
            })
        }
    }
}

fn unique_id(stored: &[serde_json::Value], now_ms: i64) -> String {
    let taken: HashSet<String> = stored
        .iter()
        .filter_map(|value| value.get("id"))
        .map(|id| match id {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect();

    let mut candidate = now_ms;
    while taken.contains(&candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::{submit_message, ContactForm, ContactFormError};
    use crate::clock::ManualClock;
    use crate::keys;
    use crate::model::message::Message;
    use crate::store::{KeyValueStore, MemoryStore, StoreError, StoreJsonExt};

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn rejects_invalid_input_without_writing() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(1_000);

        let cases = [
            (form("  ", "a@b.co", "hi"), "请输入您的姓名"),
            (form("Ann", "", "hi"), "请输入您的邮箱"),
            (form("Ann", "a@b.co", " \n "), "请输入留言内容"),
            (form("Ann", "not-an-email", "hi"), "请输入正确的邮箱格式"),
            (form("Ann", "a b@c.co", "hi"), "请输入正确的邮箱格式"),
        ];
        for (input, expected) in cases {
            let err = submit_message(&store, &clock, &input).expect_err("input must be rejected");
            assert!(!matches!(err, ContactFormError::Store(_)));
            assert_eq!(err.user_message(), expected);
        }
        assert_eq!(store.get(keys::MESSAGES).unwrap(), None);
    }

    #[test]
    fn appends_trimmed_visible_message() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(1_715_349_900_000);

        let stored = submit_message(&store, &clock, &form(" Ann ", " ann@example.com ", " hello "))
            .expect("valid form is stored");

        assert_eq!(stored.id, "1715349900000");
        assert_eq!(stored.date, "2024-05-10T14:05:00.000Z");
        let messages: Vec<Message> = store.read_json(keys::MESSAGES).unwrap();
        assert_eq!(messages, vec![stored]);
        assert_eq!(messages[0].name, "Ann");
        assert_eq!(messages[0].message, "hello");
    }

    #[test]
    fn ids_stay_unique_within_same_millisecond() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(5_000);

        let first = submit_message(&store, &clock, &form("A", "a@b.co", "1")).unwrap();
        let second = submit_message(&store, &clock, &form("B", "b@b.co", "2")).unwrap();

        assert_eq!(first.id, "5000");
        assert_eq!(second.id, "5001");
    }

    #[test]
    fn preserves_admin_fields_on_existing_messages() {
        let store = MemoryStore::new();
        store
            .set(
                keys::MESSAGES,
                r#"[{"id":"1","name":"Old","status":"hidden","pinned":true}]"#,
            )
            .unwrap();
        let clock = ManualClock::new(9_000);

        submit_message(&store, &clock, &form("New", "n@b.co", "hey")).unwrap();

        let raw: Vec<serde_json::Value> = store.read_json(keys::MESSAGES).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0]["pinned"], serde_json::Value::Bool(true));
        assert_eq!(raw[1]["status"], "visible");
    }

    #[test]
    fn refuses_to_overwrite_unreadable_messages() {
        let clock = ManualClock::new(9_000);
        for existing in [r#"{"legacy":[{"id":"1","name":"old"}]}"#, "[{broken", "42"] {
            let store = MemoryStore::new();
            store.set(keys::MESSAGES, existing).unwrap();

            let err = submit_message(&store, &clock, &form("New", "n@b.co", "hey"))
                .expect_err("unreadable messages must not be replaced");

            assert!(matches!(
                err,
                ContactFormError::Store(StoreError::Malformed { .. })
            ));
            assert_eq!(err.user_message(), "留言保存失败，请稍后重试");
            assert_eq!(store.get(keys::MESSAGES).unwrap().as_deref(), Some(existing));
        }
    }
}
