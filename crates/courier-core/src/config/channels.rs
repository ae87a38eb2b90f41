use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Telegram bot config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Overridden by `TELEGRAM_BOT_TOKEN` when set.
    #[serde(default)]
    pub bot_token: String,
    /// Bot API base URL, without the `/bot<token>` suffix.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// `timeout` sent with `getUpdates`, in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: f64,
    /// Update categories requested from the server.
    #[serde(default = "default_allowed_updates")]
    pub allowed_updates: Vec<String>,
    /// `parse_mode` sent with `sendMessage`.
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,
    /// Whole-request timeout on the HTTP client. None = unbounded.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Allowed user ids. Empty = allow all.
    #[serde(default)]
    pub allowed_users: Vec<i64>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_url: default_api_url(),
            poll_timeout_secs: default_poll_timeout(),
            allowed_updates: default_allowed_updates(),
            parse_mode: default_parse_mode(),
            request_timeout_secs: None,
            allowed_users: Vec::new(),
        }
    }
}

impl TelegramConfig {
    /// Base URL for bot methods, e.g. `https://api.telegram.org/bot123:abc`.
    pub fn bot_url(&self) -> String {
        format!("{}/bot{}", self.api_url.trim_end_matches('/'), self.bot_token)
    }

    /// Token safe for logs: first 7 + `***` + last 4, or `***` when short.
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.bot_token.chars().collect();
        if chars.len() <= 11 {
            return "***".to_string();
        }
        let head: String = chars[..7].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}***{tail}")
    }
}
