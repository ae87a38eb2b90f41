//! `getUpdates` request and the UpdateSource implementation.

use super::{snippet, TelegramBot};
use async_trait::async_trait;
use courier_core::{
    error::CourierError,
    message::{decode_batch, Offset, UpdateBatch},
    traits::UpdateSource,
};

#[async_trait]
impl UpdateSource for TelegramBot {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn fetch_updates(&self, offset: Offset) -> Result<UpdateBatch, CourierError> {
        let allowed_updates = serde_json::to_string(&self.config.allowed_updates)?;
        let query = [
            ("offset", offset.request_value().to_string()),
            ("timeout", self.config.poll_timeout_secs.to_string()),
            ("allowed_updates", allowed_updates),
        ];

        let resp = self
            .client
            .get(self.method_url("getUpdates"))
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                CourierError::Http(format!("telegram getUpdates failed: {}", e.without_url()))
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| {
            CourierError::Http(format!("telegram getUpdates read failed: {}", e.without_url()))
        })?;

        if !status.is_success() {
            // Telegram reports errors in a JSON envelope; prefer its description.
            return Err(match decode_batch(&body) {
                Err(api @ CourierError::Api { .. }) => api,
                _ => CourierError::Http(format!(
                    "telegram getUpdates got {status}: {}",
                    snippet(&String::from_utf8_lossy(&body))
                )),
            });
        }

        decode_batch(&body)
    }
}
