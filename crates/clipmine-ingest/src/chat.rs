//! Chat replay parsing.
//!
//! Walks the replay log shape (`events[] -> replayChatItemAction ->
//! actions[] -> addChatItemAction -> item -> liveChatTextMessageRenderer`)
//! and extracts one [`CommentRecord`] per text message. Events that carry no
//! text renderer (memberships, stickers, deletions) are passed over; items
//! with an unparseable timestamp are skipped with a log line.

use serde::Deserialize;
use tracing::debug;

use clipmine_models::CommentRecord;

use crate::error::IngestResult;

/// Parse a full chat replay document into time-sorted comment records.
pub fn parse_chat_log(json: &str) -> IngestResult<Vec<CommentRecord>> {
    let log: ChatLog = serde_json::from_str(json)?;

    let mut records = Vec::new();
    for event in log.events {
        let Some(replay) = event.replay_chat_item_action else {
            continue;
        };
        for action in replay.actions {
            let Some(add) = action.add_chat_item_action else {
                continue;
            };
            let Some(renderer) = add.item.live_chat_text_message_renderer else {
                continue;
            };
            match comment_from_renderer(renderer) {
                Some(record) => records.push(record),
                None => debug!("Skipping chat item with unparseable timestamp"),
            }
        }
    }

    records.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    Ok(records)
}

fn comment_from_renderer(renderer: TextMessageRenderer) -> Option<CommentRecord> {
    let usec: i64 = renderer.timestamp_usec.parse().ok()?;
    // Millisecond precision is enough for binning
    let timestamp = (usec / 1000) as f64 / 1000.0;

    let author = renderer
        .author_name
        .and_then(|a| a.simple_text)
        .unwrap_or_else(|| "Unknown".to_string());

    let text: String = renderer
        .message
        .map(|m| m.runs.into_iter().map(|r| r.text).collect())
        .unwrap_or_default();

    Some(CommentRecord {
        timestamp,
        author,
        text,
    })
}

#[derive(Debug, Deserialize)]
struct ChatLog {
    #[serde(default)]
    events: Vec<ChatEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatEvent {
    #[serde(default)]
    replay_chat_item_action: Option<ReplayChatItemAction>,
}

#[derive(Debug, Deserialize)]
struct ReplayChatItemAction {
    #[serde(default)]
    actions: Vec<ChatAction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatAction {
    #[serde(default)]
    add_chat_item_action: Option<AddChatItemAction>,
}

#[derive(Debug, Deserialize)]
struct AddChatItemAction {
    #[serde(default)]
    item: ChatItem,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatItem {
    #[serde(default)]
    live_chat_text_message_renderer: Option<TextMessageRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextMessageRenderer {
    #[serde(default)]
    timestamp_usec: String,

    #[serde(default)]
    author_name: Option<AuthorName>,

    #[serde(default)]
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorName {
    #[serde(default)]
    simple_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    runs: Vec<MessageRun>,
}

#[derive(Debug, Deserialize)]
struct MessageRun {
    #[serde(default)]
    text: String,
}
