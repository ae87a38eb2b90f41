//! Process driver: pulls updates, dispatches them to the handler, sends replies.

use courier_core::{
    message::{Offset, Reply, Update},
    traits::{Handler, MessageSender, UpdateSource},
};
use futures_util::StreamExt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub struct Gateway {
    source: Arc<dyn UpdateSource>,
    sender: Arc<dyn MessageSender>,
    handler: Arc<dyn Handler>,
    start: Offset,
}

impl Gateway {
    pub fn new(
        source: Arc<dyn UpdateSource>,
        sender: Arc<dyn MessageSender>,
        handler: Arc<dyn Handler>,
        start: Offset,
    ) -> Self {
        Self {
            source,
            sender,
            handler,
            start,
        }
    }

    /// Run until Ctrl-C.
    pub async fn run(&self) -> anyhow::Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
            info!("Received shutdown signal");
        })
        .await
    }

    /// Run until `shutdown` resolves.
    ///
    /// Any in-flight poll is dropped; replies already queued are still sent,
    /// in order, before this returns.
    pub async fn run_until<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        info!(
            "Courier gateway running | source: {} | start offset: {}",
            self.source.name(),
            self.start.0
        );

        // Single sender task: replies go out in update order while the next
        // poll proceeds.
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let sends = tokio::spawn(deliver_replies(self.sender.clone(), reply_rx));

        let mut updates = self.source.stream_updates(self.start);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                next = updates.next() => match next {
                    Some(update) => self.dispatch(update, &reply_tx).await,
                    None => {
                        warn!("update stream ended");
                        break;
                    }
                },
                _ = &mut shutdown => break,
            }
        }

        drop(updates);
        drop(reply_tx);
        if let Err(e) = sends.await {
            warn!("reply sender task failed: {e}");
        }

        info!("Courier gateway stopped");
        Ok(())
    }

    /// Hand one update to the handler and queue its reply, if any.
    async fn dispatch(&self, update: Update, replies: &mpsc::UnboundedSender<(i64, Reply)>) {
        let update_id = update.update_id;
        let Some(reply) = self.handler.handle(&update).await else {
            return;
        };
        if replies.send((update_id, reply)).is_err() {
            warn!(update_id, "reply sender stopped, dropping reply");
        }
    }
}

/// Send queued replies one at a time, in the order they were queued.
async fn deliver_replies(
    sender: Arc<dyn MessageSender>,
    mut replies: mpsc::UnboundedReceiver<(i64, Reply)>,
) {
    while let Some((update_id, reply)) = replies.recv().await {
        if let Err(e) = sender.send_reply(&reply).await {
            warn!(
                update_id,
                chat_id = reply.chat_id.0,
                "failed to send reply: {e}"
            );
        }
    }
}
