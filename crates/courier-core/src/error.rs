use thiserror::Error;

/// Top-level error type for Courier.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Transport-level HTTP failure (connect, timeout, non-2xx, body read).
    #[error("http error: {0}")]
    Http(String),

    /// The Bot API answered with `"ok": false`.
    #[error("api error: {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
