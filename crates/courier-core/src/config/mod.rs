mod channels;
mod defaults;


pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CourierError;
use crate::message::Offset;
use defaults::*;

/// Environment variable that overrides `telegram.bot_token`.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Top-level Courier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Offset the update stream starts from. Not persisted between runs.
    #[serde(default)]
    pub initial_offset: i64,
    /// Reply to `/start`.
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            initial_offset: 0,
            greeting: default_greeting(),
        }
    }
}

impl Config {
    pub fn initial_offset(&self) -> Offset {
        Offset(self.bot.initial_offset)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.telegram.bot_token = token.trim().to_string();
        }
    }

    /// Fail fast on settings the bot cannot start with.
    pub fn validate(&self) -> Result<(), CourierError> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(CourierError::Config(format!(
                "bot_token is empty. Set it in config.toml or the {TOKEN_ENV} env var."
            )));
        }
        let timeout = self.telegram.poll_timeout_secs;
        if !timeout.is_finite() || timeout < 0.0 {
            return Err(CourierError::Config(format!(
                "poll_timeout_secs must be a non-negative number, got {timeout}"
            )));
        }
        if self.telegram.allowed_updates.is_empty() {
            return Err(CourierError::Config(
                "allowed_updates must not be empty; Telegram treats [] as every update type"
                    .to_string(),
            ));
        }
        if self.telegram.api_url.trim().is_empty() {
            return Err(CourierError::Config("api_url is empty".to_string()));
        }
        if self.bot.initial_offset < 0 {
            return Err(CourierError::Config(format!(
                "initial_offset must be >= 0, got {}",
                self.bot.initial_offset
            )));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file, then apply env overrides.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, CourierError> {
    let path = Path::new(path);
    let mut config = if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    } else {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CourierError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        parse(&content)?
    };

    config.apply_env_overrides();
    Ok(config)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, CourierError> {
    toml::from_str(content)
        .map_err(|e| CourierError::Config(format!("failed to parse config: {}", e)))
}
