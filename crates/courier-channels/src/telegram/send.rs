//! `sendMessage` and the MessageSender implementation.

use super::{snippet, TelegramBot};
use async_trait::async_trait;
use courier_core::{error::CourierError, message::ChatId, traits::MessageSender};
use tracing::debug;

#[async_trait]
impl MessageSender for TelegramBot {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), CourierError> {
        let query = [
            ("chat_id", chat_id.to_string()),
            ("parse_mode", self.config.parse_mode.clone()),
            ("text", text.to_string()),
        ];

        let resp = self
            .client
            .get(self.method_url("sendMessage"))
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                CourierError::Http(format!("telegram sendMessage failed: {}", e.without_url()))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(CourierError::Channel(format!(
                "telegram sendMessage got {status}: {}",
                snippet(&error_text)
            )));
        }

        debug!(chat_id = chat_id.0, "telegram message sent");
        Ok(())
    }
}
