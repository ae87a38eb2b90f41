//! Bot API data model and explicit wire decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CourierError;

/// Telegram chat id (numeric).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cursor into the remote update log: the last update id already consumed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Offset(pub i64);

impl Offset {
    /// Nothing consumed yet.
    pub const START: Offset = Offset(0);

    /// Value for the `offset` query parameter: the first id not yet seen.
    pub fn request_value(self) -> i64 {
        self.0.saturating_add(1)
    }
}

/// Generic Bot API response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotResponse<T> {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
}

/// One inbound event. Fields the bot does not use are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl Update {
    /// Text of the carried message, if any.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.text.as_deref())
    }

    pub fn chat_id(&self) -> Option<ChatId> {
        self.message.as_ref().map(Message::chat_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    /// Unix seconds.
    #[serde(default)]
    pub date: i64,
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Message {
    pub fn chat_id(&self) -> ChatId {
        ChatId(self.chat.id)
    }

    /// Send time, or `None` if `date` is out of range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// Chat type: "private", "group", "supergroup", or "channel".
    #[serde(default, rename = "type")]
    pub chat_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl User {
    /// `@username`, else full name, else first name.
    pub fn display_name(&self) -> String {
        if let Some(ref un) = self.username {
            format!("@{un}")
        } else if let Some(ref ln) = self.last_name {
            format!("{} {ln}", self.first_name)
        } else {
            self.first_name.clone()
        }
    }
}

/// Result of one `getUpdates` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBatch {
    pub ok: bool,
    #[serde(default)]
    pub result: Vec<Update>,
}

impl UpdateBatch {
    /// A successful batch with no updates.
    pub fn empty() -> Self {
        Self {
            ok: true,
            result: Vec::new(),
        }
    }

    pub fn new(result: Vec<Update>) -> Self {
        Self { ok: true, result }
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    pub fn len(&self) -> usize {
        self.result.len()
    }
}

/// An outbound reply chosen by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub chat_id: ChatId,
    pub text: String,
}

impl Reply {
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
        }
    }
}

/// Decode a raw `getUpdates` body.
///
/// `"ok": false` becomes [`CourierError::Api`]; a successful envelope
/// without `result` decodes as an empty batch.
pub fn decode_batch(bytes: &[u8]) -> Result<UpdateBatch, CourierError> {
    let resp: BotResponse<Vec<Update>> = serde_json::from_slice(bytes)?;
    if !resp.ok {
        return Err(CourierError::Api {
            code: resp.error_code,
            description: resp.description.unwrap_or_default(),
        });
    }
    Ok(UpdateBatch::new(resp.result.unwrap_or_default()))
}

/// Decode a single update object.
pub fn decode_update(bytes: &[u8]) -> Result<Update, CourierError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encode a batch in the `getUpdates` wire shape.
pub fn encode_batch(batch: &UpdateBatch) -> Result<Vec<u8>, CourierError> {
    Ok(serde_json::to_vec(batch)?)
}
