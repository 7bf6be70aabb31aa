use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::{Envelope, Message};

/// Envelope as it arrives on the wire
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WebhookPayload {
    pub user_id: i64,
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, JsonValue>>,
}

impl WebhookPayload {
    pub fn new(user_id: i64, message_type: impl Into<String>) -> Self {
        Self {
            user_id,
            message_type: message_type.into(),
            message_data: None,
            timestamp: None,
            metadata: None,
        }
    }
    pub fn data(mut self, data: impl Into<JsonValue>) -> Self {
        self.message_data = Some(data.into());
        self
    }

    /// Validates the payload shape for its message type.
    ///
    /// Unknown types are not an error here, they become [`Message::Other`] and
    /// are rejected by the dispatcher if nothing is registered for them.
    pub fn into_envelope(self) -> crate::Result<Envelope> {
        let message = Message::new(self.message_type, self.message_data)?;
        Ok(Envelope {
            user_id: self.user_id,
            message,
            timestamp: self.timestamp.unwrap_or_else(crate::utils::now_timestamp),
            metadata: self.metadata,
        })
    }
}
