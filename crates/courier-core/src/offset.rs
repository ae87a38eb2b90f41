//! Offset tracking across poll cycles.

use crate::message::{Offset, UpdateBatch};

/// Largest `update_id` in the batch, or `None` when it is empty.
///
/// Ids inside a batch are not guaranteed to be sorted, so this scans the
/// whole batch rather than taking the last element.
pub fn max_update_id(batch: &UpdateBatch) -> Option<i64> {
    batch.result.iter().map(|u| u.update_id).max()
}

/// Offset to use for the cycle after `batch` was received at `previous`.
///
/// Never moves backwards.
pub fn next_offset(previous: Offset, batch: &UpdateBatch) -> Offset {
    match max_update_id(batch) {
        Some(max) => previous.max(Offset(max)),
        None => previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Update;

    fn batch(ids: &[i64]) -> UpdateBatch {
        UpdateBatch::new(
            ids.iter()
                .map(|&update_id| Update {
                    update_id,
                    message: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_max_id_regardless_of_order() {
        assert_eq!(max_update_id(&batch(&[3, 7, 5])), Some(7));
        assert_eq!(next_offset(Offset(0), &batch(&[3, 7, 5])), Offset(7));
    }

    #[test]
    fn test_empty_batch_keeps_offset() {
        assert_eq!(max_update_id(&UpdateBatch::empty()), None);
        assert_eq!(next_offset(Offset(12), &UpdateBatch::empty()), Offset(12));
    }

    #[test]
    fn test_stale_ids_do_not_rewind() {
        assert_eq!(next_offset(Offset(20), &batch(&[4, 9])), Offset(20));
    }

    #[test]
    fn test_offsets_monotonic_over_many_cycles() {
        let batches = [
            batch(&[1, 2]),
            UpdateBatch::empty(),
            batch(&[5, 3]),
            batch(&[4]),
            UpdateBatch::empty(),
            batch(&[10, 8, 9]),
        ];
        let mut offset = Offset::START;
        let mut used = vec![offset];
        for b in &batches {
            offset = next_offset(offset, b);
            used.push(offset);
        }
        assert!(used.windows(2).all(|w| w[0] <= w[1]), "offsets: {used:?}");
        assert_eq!(offset, Offset(10));
    }
}
