use crate::{
    event::model::{Reply, WebhookPayload},
    model::{ChatMember, Role},
};

use super::Bot;

impl Bot {
    /// Validates and dispatches one wire payload
    pub async fn handle_payload(&self, payload: WebhookPayload) -> crate::Result<Reply> {
        let envelope = payload.into_envelope()?;
        self.dispatcher.dispatch(&envelope).await
    }

    pub async fn classify(&self, user_id: i64) -> Role {
        self.dispatcher.classifier().classify(user_id).await
    }

    /// Direct membership lookup, `None` without a bot token
    pub async fn get_chat_member(
        &self,
        chat_id: &str,
        user_id: i64,
    ) -> Option<crate::Result<ChatMember>> {
        let client = self.api_client.as_ref()?;
        Some(client.get_chat_member(chat_id, user_id).await)
    }
}
