//! Turns repeated poll cycles into one continuous stream of updates.

use futures_util::stream::{self, Stream, StreamExt};

use crate::{
    message::{Offset, Update, UpdateBatch},
    traits::UpdateSource,
};

/// Lazily poll `source` forever, starting after `start`, yielding
/// individual updates in ascending `update_id` order.
///
/// The next poll is issued only once every update of the current batch has
/// been pulled, so a slow consumer simply delays polling. Dropping the
/// stream abandons any in-flight request.
pub fn stream_updates<S>(source: &S, start: Offset) -> impl Stream<Item = Update> + Send + '_
where
    S: UpdateSource + ?Sized,
{
    stream::unfold(start, move |offset| async move {
        let (next, batch) = source.poll(offset).await;
        Some((stream::iter(deliverable(offset, batch)), next))
    })
    .flatten()
}

/// Updates of `batch` newer than `offset`, sorted and de-duplicated.
fn deliverable(offset: Offset, batch: UpdateBatch) -> Vec<Update> {
    let mut updates: Vec<Update> = batch
        .result
        .into_iter()
        .filter(|u| u.update_id > offset.0)
        .collect();
    updates.sort_by_key(|u| u.update_id);
    updates.dedup_by_key(|u| u.update_id);
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CourierError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted fetch results and records the offsets it was asked for.
    struct Scripted {
        script: Mutex<VecDeque<Result<UpdateBatch, CourierError>>>,
        seen: Mutex<Vec<Offset>>,
    }

    impl Scripted {
        fn new(script: Vec<Result<UpdateBatch, CourierError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<Offset> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UpdateSource for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_updates(&self, offset: Offset) -> Result<UpdateBatch, CourierError> {
            self.seen.lock().unwrap().push(offset);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(UpdateBatch::empty()))
        }
    }

    fn batch(ids: &[i64]) -> Result<UpdateBatch, CourierError> {
        Ok(UpdateBatch::new(
            ids.iter()
                .map(|&update_id| Update {
                    update_id,
                    message: None,
                })
                .collect(),
        ))
    }

    async fn take_ids<S: UpdateSource>(source: &S, start: Offset, n: usize) -> Vec<i64> {
        stream_updates(source, start)
            .take(n)
            .map(|u| u.update_id)
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_flattens_consecutive_batches_in_order() {
        let source = Scripted::new(vec![batch(&[1, 2]), batch(&[3])]);
        assert_eq!(take_ids(&source, Offset::START, 3).await, vec![1, 2, 3]);
        assert_eq!(source.seen(), vec![Offset(0), Offset(2)]);
    }

    #[tokio::test]
    async fn test_poll_absorbs_failures() {
        let source = Scripted::new(vec![Err(CourierError::Http("connection refused".into()))]);
        let (next, b) = source.poll(Offset(17)).await;
        assert_eq!(next, Offset(17));
        assert_eq!(b, UpdateBatch::empty());
    }

    #[tokio::test]
    async fn test_poll_treats_not_ok_batch_as_failure() {
        let mut not_ok = UpdateBatch::new(vec![Update {
            update_id: 99,
            message: None,
        }]);
        not_ok.ok = false;
        let source = Scripted::new(vec![Ok(not_ok)]);
        assert_eq!(source.poll(Offset(5)).await, (Offset(5), UpdateBatch::empty()));
    }

    #[tokio::test]
    async fn test_stream_survives_failed_cycles() {
        let source = Scripted::new(vec![
            batch(&[1]),
            Err(CourierError::Http("timeout".into())),
            Err(CourierError::Api {
                code: Some(502),
                description: "Bad Gateway".into(),
            }),
            batch(&[2, 3]),
        ]);
        assert_eq!(take_ids(&source, Offset::START, 3).await, vec![1, 2, 3]);
        assert_eq!(
            source.seen(),
            vec![Offset(0), Offset(1), Offset(1), Offset(1)]
        );
    }

    #[tokio::test]
    async fn test_unordered_batch_is_delivered_sorted() {
        let source = Scripted::new(vec![batch(&[3, 7, 5]), batch(&[8])]);
        assert_eq!(take_ids(&source, Offset::START, 4).await, vec![3, 5, 7, 8]);
        assert_eq!(source.seen(), vec![Offset(0), Offset(7)]);
    }

    #[tokio::test]
    async fn test_redelivered_updates_are_dropped() {
        let source = Scripted::new(vec![batch(&[1, 2]), batch(&[2, 2, 3]), batch(&[4])]);
        assert_eq!(take_ids(&source, Offset::START, 3).await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_offsets_used_are_non_decreasing() {
        let source = Scripted::new(vec![
            batch(&[4, 2]),
            batch(&[]),
            batch(&[1]),
            batch(&[9, 6]),
            Err(CourierError::Channel("boom".into())),
            batch(&[10]),
        ]);
        let ids = take_ids(&source, Offset::START, 5).await;
        assert_eq!(ids, vec![2, 4, 6, 9, 10]);
        let seen = source.seen();
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "offsets: {seen:?}");
    }

    #[tokio::test]
    async fn test_no_poll_until_pulled() {
        let source = Scripted::new(vec![batch(&[1, 2])]);
        {
            let mut s = Box::pin(stream_updates(&source, Offset::START));
            assert_eq!(s.next().await.map(|u| u.update_id), Some(1));
            assert_eq!(s.next().await.map(|u| u.update_id), Some(2));
        }
        assert_eq!(source.seen(), vec![Offset(0)]);
    }

    #[tokio::test]
    async fn test_trait_method_streams_from_start_offset() {
        let source = Scripted::new(vec![batch(&[41, 42, 43])]);
        let ids: Vec<i64> = source
            .stream_updates(Offset(41))
            .take(2)
            .map(|u| u.update_id)
            .collect()
            .await;
        assert_eq!(ids, vec![42, 43]);
    }
}
