use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::model::Role;
mod payload;
pub use payload::*;

/// Built-in message type tags
pub mod kind {
    pub const TEXT: &str = "text";
    pub const CALLBACK_QUERY: &str = "callback_query";
    pub const BUTTON_CLICK: &str = "button_click";
    pub const MENU_SELECTION: &str = "menu_selection";
}

/// Payload of one envelope, keyed by its message type
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Text {
        text: Option<String>,
    },
    CallbackQuery {
        data: Option<String>,
    },
    ButtonClick {
        data: Option<JsonValue>,
    },
    MenuSelection {
        data: Option<JsonValue>,
    },
    /// Any type without a built-in variant, routed by its raw tag
    Other {
        kind: String,
        data: Option<JsonValue>,
    },
}

impl Message {
    /// Builds the payload for `message_type`, picking the built-in variant
    /// when the tag has one.
    ///
    /// `text` and `callback_query` require string (or absent) data.
    pub fn new(message_type: impl Into<String>, data: Option<JsonValue>) -> crate::Result<Self> {
        let message_type = message_type.into();
        let message = match message_type.as_str() {
            kind::TEXT => Message::Text {
                text: string_data(kind::TEXT, data)?,
            },
            kind::CALLBACK_QUERY => Message::CallbackQuery {
                data: string_data(kind::CALLBACK_QUERY, data)?,
            },
            kind::BUTTON_CLICK => Message::ButtonClick { data },
            kind::MENU_SELECTION => Message::MenuSelection { data },
            _ => Message::Other {
                kind: message_type,
                data,
            },
        };
        Ok(message)
    }

    /// The `message_type` this payload arrived with
    pub fn kind(&self) -> &str {
        match self {
            Message::Text { .. } => kind::TEXT,
            Message::CallbackQuery { .. } => kind::CALLBACK_QUERY,
            Message::ButtonClick { .. } => kind::BUTTON_CLICK,
            Message::MenuSelection { .. } => kind::MENU_SELECTION,
            Message::Other { kind, .. } => kind,
        }
    }

    /// Text body for text messages, including a hand-built
    /// [`Message::Other`] tagged `text`
    pub fn text(&self) -> Option<&str> {
        match self {
            Message::Text { text } => text.as_deref(),
            Message::Other {
                kind: tag,
                data: Some(JsonValue::String(text)),
            } if tag == kind::TEXT => Some(text),
            _ => None,
        }
    }

    /// `message_data` rendered for logs
    pub fn data_for_log(&self) -> String {
        match self {
            Message::Text { text: data } | Message::CallbackQuery { data } => {
                data.clone().unwrap_or_default()
            }
            Message::ButtonClick { data }
            | Message::MenuSelection { data }
            | Message::Other { data, .. } => {
                data.as_ref().map(JsonValue::to_string).unwrap_or_default()
            }
        }
    }

    /// Whether this is a text message carrying the start command
    pub fn is_start_command(&self) -> bool {
        self.text()
            .is_some_and(|text| text.starts_with(crate::consts::START_COMMAND))
    }
}

fn string_data(message_type: &str, data: Option<JsonValue>) -> crate::Result<Option<String>> {
    match data {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(other) => {
            tracing::debug!(message_type, data = %other, "non-string message_data");
            Err(crate::Error::invalid_envelope(format!(
                "message_data of `{}` must be a string",
                message_type
            )))
        }
    }
}

/// One inbound user event, validated and immutable
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub user_id: i64,
    pub message: Message,
    /// Seconds since the unix epoch
    pub timestamp: f64,
    pub metadata: Option<Map<String, JsonValue>>,
}

impl Envelope {
    pub fn new(user_id: i64, message: Message) -> Self {
        Self {
            user_id,
            message,
            timestamp: crate::utils::now_timestamp(),
            metadata: None,
        }
    }
    pub fn text(user_id: i64, text: impl Into<String>) -> Self {
        Self::new(
            user_id,
            Message::Text {
                text: Some(text.into()),
            },
        )
    }
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }
    pub fn with_metadata(mut self, metadata: Map<String, JsonValue>) -> Self {
        self.metadata = Some(metadata);
        self
    }
    pub fn message_type(&self) -> &str {
        self.message.kind()
    }
}

/// What the caller should do next
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Reply {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<Role>,
}

impl Reply {
    pub const ACTION_REPLY: &'static str = "reply";
    pub const ACTION_SEND_MESSAGE: &'static str = "send_message";

    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            data: None,
            user_role: None,
        }
    }
    /// `{"action": "reply", "data": {"text": text}}`
    pub fn reply(text: impl Into<String>) -> Self {
        Self::new(Self::ACTION_REPLY).with_text(text)
    }
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_data("text", JsonValue::String(text.into()))
    }
    pub fn with_data(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }
    pub fn with_role(mut self, role: Role) -> Self {
        self.user_role = Some(role);
        self
    }
    pub fn text(&self) -> Option<&str> {
        self.data.as_ref()?.get("text")?.as_str()
    }
}
