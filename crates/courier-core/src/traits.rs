use crate::{
    error::CourierError,
    message::{ChatId, Offset, Reply, Update, UpdateBatch},
    offset::next_offset,
};
use async_trait::async_trait;
use futures_util::stream::{BoxStream, StreamExt};
use tracing::{debug, error};

/// Source of update batches, one request per poll cycle.
///
/// Implementors only provide [`fetch_updates`](UpdateSource::fetch_updates);
/// [`poll`](UpdateSource::poll) wraps it with offset tracking and failure
/// absorption.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    /// Fetch updates strictly newer than `offset`. May fail.
    async fn fetch_updates(&self, offset: Offset) -> Result<UpdateBatch, CourierError>;

    /// Run one poll cycle. Never fails: any fetch error is logged and
    /// turned into `(offset, empty batch)`.
    async fn poll(&self, offset: Offset) -> (Offset, UpdateBatch) {
        match self.fetch_updates(offset).await {
            Ok(batch) if !batch.ok => {
                error!(
                    source = self.name(),
                    offset = offset.0,
                    "failed to poll updates: response not ok"
                );
                (offset, UpdateBatch::empty())
            }
            Ok(batch) => {
                let next = next_offset(offset, &batch);
                if !batch.is_empty() {
                    debug!(
                        source = self.name(),
                        count = batch.len(),
                        offset = next.0,
                        "received updates"
                    );
                }
                (next, batch)
            }
            Err(e) => {
                error!(
                    source = self.name(),
                    offset = offset.0,
                    error = %e,
                    "failed to poll updates"
                );
                (offset, UpdateBatch::empty())
            }
        }
    }

    /// Endless, ordered stream of updates starting after `start`.
    fn stream_updates(&self, start: Offset) -> BoxStream<'_, Update> {
        crate::stream::stream_updates(self, start).boxed()
    }
}

/// Posts one outbound message.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send `text` to `chat_id`. Failures are returned, not swallowed.
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), CourierError>;

    /// Convenience for handler output.
    async fn send_reply(&self, reply: &Reply) -> Result<(), CourierError> {
        self.send_message(reply.chat_id, &reply.text).await
    }
}

/// Application logic: decide whether and how to answer an update.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, update: &Update) -> Option<Reply>;
}
