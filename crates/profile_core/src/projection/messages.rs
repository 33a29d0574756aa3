//! Public guestbook listing.

use crate::date_format::format_stored_date;
use crate::keys;
use crate::model::message::Message;
use crate::store::{KeyValueStore, StoreJsonExt};
use chrono::TimeZone;
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyCard {
    pub content: String,
    pub date_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCard {
    pub id: String,
    pub name: String,
    pub date_text: String,
    pub body: String,
    pub reply: Option<ReplyCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagesView {
    Empty,
    List(Vec<MessageCard>),
}

pub fn project<Tz: TimeZone>(store: &dyn KeyValueStore, now_ms: i64, tz: &Tz) -> MessagesView
where
    Tz::Offset: std::fmt::Display,
{
    let messages: Vec<Message> = store.read_json_list(keys::MESSAGES).unwrap_or_default();
    let visible = visible_newest_first(messages);
    if visible.is_empty() {
        return MessagesView::Empty;
    }

    MessagesView::List(
        visible
            .into_iter()
            .map(|message| MessageCard {
                date_text: format_stored_date(&message.date, now_ms, tz),
                reply: message.reply.map(|reply| ReplyCard {
                    date_text: format_stored_date(&reply.date, now_ms, tz),
                    content: reply.content,
                }),
                id: message.id,
                name: message.name,
                body: message.message,
            })
            .collect(),
    )
}

/// Drops hidden messages and sorts the rest by date, newest first.
///
/// The sort is stable; unparseable dates sort last.
pub fn visible_newest_first(messages: Vec<Message>) -> Vec<Message> {
    let mut visible: Vec<Message> = messages.into_iter().filter(Message::is_visible).collect();
    visible.sort_by_key(|message| Reverse(message.timestamp_ms().unwrap_or(i64::MIN)));
    visible
}

#[cfg(test)]
mod tests {
    use super::{project, visible_newest_first, MessagesView};
    use crate::keys;
    use crate::model::message::{format_timestamp_ms, Message, MessageStatus, Reply};
    use crate::store::{KeyValueStore, MemoryStore, StoreJsonExt};
    use chrono::Utc;

    const NOW: i64 = 1_715_349_900_000;
    const HOUR: i64 = 60 * 60 * 1000;

    fn message(id: &str, at_ms: i64, status: MessageStatus) -> Message {
        Message {
            id: id.to_string(),
            name: format!("visitor {id}"),
            date: format_timestamp_ms(at_ms),
            status,
            ..Message::default()
        }
    }

    #[test]
    fn sorts_newest_first() {
        let sorted = visible_newest_first(vec![
            message("t-2", NOW - 2 * HOUR, MessageStatus::Visible),
            message("t", NOW, MessageStatus::Visible),
            message("t-1", NOW - HOUR, MessageStatus::Visible),
        ]);
        let ids: Vec<_> = sorted.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["t", "t-1", "t-2"]);
    }

    #[test]
    fn hidden_messages_are_filtered() {
        let sorted = visible_newest_first(vec![
            message("a", NOW, MessageStatus::Hidden),
            message("b", NOW, MessageStatus::Visible),
        ]);
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].id, "b");
    }

    #[test]
    fn empty_visible_set_is_empty_view() {
        let store = MemoryStore::new();
        store
            .write_json(keys::MESSAGES, &vec![message("a", NOW, MessageStatus::Hidden)])
            .unwrap();
        assert_eq!(project(&store, NOW, &Utc), MessagesView::Empty);
    }

    #[test]
    fn reply_gets_its_own_relative_date() {
        let store = MemoryStore::new();
        let mut item = message("a", NOW - 3 * 24 * HOUR, MessageStatus::Visible);
        item.reply = Some(Reply {
            content: "thanks".to_string(),
            date: format_timestamp_ms(NOW),
        });
        store.write_json(keys::MESSAGES, &vec![item]).unwrap();

        let MessagesView::List(cards) = project(&store, NOW, &Utc) else {
            panic!("expected a message list");
        };
        assert_eq!(cards[0].date_text, "3天前");
        let reply = cards[0].reply.as_ref().expect("reply card");
        assert_eq!(reply.date_text, "今天 14:05");
        assert_eq!(reply.content, "thanks");
    }

    #[test]
    fn loose_elements_still_render_next_to_valid_ones() {
        let store = MemoryStore::new();
        store
            .set(
                keys::MESSAGES,
                r#"[
                    {"id":1715349900000,"name":null,"message":"numeric id","date":"2024-05-10T14:00:00Z"},
                    {"id":"b","name":"Ann","message":"hi","date":"2024-05-10T13:00:00Z"},
                    "not a message"
                ]"#,
            )
            .unwrap();

        let MessagesView::List(cards) = project(&store, NOW, &Utc) else {
            panic!("expected a message list");
        };
        let ids: Vec<_> = cards.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, vec!["1715349900000", "b"]);
        assert_eq!(cards[0].name, "");
    }
}
