//! Telegram Bot API channel.
//!
//! Uses long polling via `getUpdates` and `sendMessage` for responses.
//! Docs: <https://core.telegram.org/bots/api>

mod polling;
mod send;


use courier_core::{config::TelegramConfig, error::CourierError};
use std::time::Duration;

/// Telegram bot client. Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct TelegramBot {
    config: TelegramConfig,
    client: reqwest::Client,
    base_url: String,
}

impl TelegramBot {
    /// Create a new bot client from config.
    pub fn new(config: TelegramConfig) -> Result<Self, CourierError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CourierError::Config(format!("failed to build http client: {e}")))?;
        let base_url = config.bot_url();
        Ok(Self {
            config,
            client,
            base_url,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }
}

/// Shorten a response body for error messages.
fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
