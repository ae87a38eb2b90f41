//! Application handlers.

use async_trait::async_trait;
use courier_core::{
    message::{Reply, Update},
    traits::Handler,
};
use tracing::{debug, warn};

/// Echoes text messages back to their chat; `/start` gets a greeting.
pub struct EchoHandler {
    greeting: String,
    /// Empty = allow all.
    allowed_users: Vec<i64>,
}

impl EchoHandler {
    pub fn new(greeting: impl Into<String>, allowed_users: Vec<i64>) -> Self {
        Self {
            greeting: greeting.into(),
            allowed_users,
        }
    }

    fn is_allowed(&self, user_id: Option<i64>) -> bool {
        if self.allowed_users.is_empty() {
            return true;
        }
        user_id.is_some_and(|id| self.allowed_users.contains(&id))
    }
}

#[async_trait]
impl Handler for EchoHandler {
    async fn handle(&self, update: &Update) -> Option<Reply> {
        let msg = update.message.as_ref()?;
        let Some(text) = msg.text.as_deref() else {
            debug!(update_id = update.update_id, "skipping message without text");
            return None;
        };

        let user_id = msg.from.as_ref().map(|u| u.id);
        if !self.is_allowed(user_id) {
            warn!(
                update_id = update.update_id,
                user_id = ?user_id,
                "ignoring message from unauthorized user"
            );
            return None;
        }

        if is_command(text, "start") {
            return Some(Reply::new(msg.chat_id(), self.greeting.clone()));
        }

        Some(Reply::new(msg.chat_id(), text))
    }
}

/// `/name` or `/name@botname`, optionally followed by arguments.
fn is_command(text: &str, name: &str) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    let Some(cmd) = first.strip_prefix('/') else {
        return false;
    };
    cmd.split('@').next() == Some(name)
}
