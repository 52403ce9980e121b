//! Batch state machine for copying two item lists into two sinks.
//!
//! Nothing here knows about threads, timers or UI toolkits: a [`RenderJob`]
//! only answers "which slices go out in the next round". The async driver
//! decides how to wait between rounds and how to deliver each slice.

use super::schedule::BatchSchedule;
use crate::model::DiffSide;
use std::ops::Range;
use std::sync::Arc;

/// Which pair of sinks a job feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Content,
    Highlights,
}

/// Per-side progress through a source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCursor {
    next_index: usize,
    batch_size: usize,
}

impl BatchCursor {
    pub fn new(seed: usize) -> Self {
        Self {
            next_index: 0,
            batch_size: seed,
        }
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Whether every one of `len` items has been handed out.
    pub fn is_drained(&self, len: usize) -> bool {
        self.next_index >= len
    }

    /// Hand out the next slice (if any), then advance and grow.
    ///
    /// The cursor advances even when nothing is left so that both sides of
    /// a job stay on the same batch size.
    fn advance(&mut self, len: usize, growth: usize) -> Option<Range<usize>> {
        let end = self.next_index.saturating_add(self.batch_size).min(len);
        let batch = (self.next_index < len).then(|| self.next_index..end);
        self.next_index = end.max(self.next_index);
        self.batch_size = self.batch_size.saturating_mul(growth);
        batch
    }
}

/// The slices transferred in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// 1-based round number.
    pub number: usize,
    pub left: Option<Range<usize>>,
    pub right: Option<Range<usize>>,
}

impl Round {
    /// Non-empty batches of this round, left first.
    pub fn batches(&self) -> impl Iterator<Item = (DiffSide, Range<usize>)> + '_ {
        [(DiffSide::Left, &self.left), (DiffSide::Right, &self.right)]
            .into_iter()
            .filter_map(|(side, range)| range.clone().map(|r| (side, r)))
    }
}

/// A pair of ordered item lists being copied into a pair of sinks.
#[derive(Debug, Clone)]
pub struct RenderJob<T> {
    kind: JobKind,
    left_items: Arc<[T]>,
    right_items: Arc<[T]>,
    left: BatchCursor,
    right: BatchCursor,
    growth: usize,
    rounds: usize,
}

impl<T: Clone> RenderJob<T> {
    pub fn new(
        kind: JobKind,
        left_items: impl Into<Arc<[T]>>,
        right_items: impl Into<Arc<[T]>>,
        schedule: &BatchSchedule,
    ) -> Self {
        Self {
            kind,
            left_items: left_items.into(),
            right_items: right_items.into(),
            left: BatchCursor::new(schedule.seed()),
            right: BatchCursor::new(schedule.seed()),
            growth: schedule.growth(),
            rounds: 0,
        }
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    /// Number of rounds handed out so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Item count of one side.
    pub fn len(&self, side: DiffSide) -> usize {
        self.items(side).len()
    }

    /// Whether both sides have no items at all.
    pub fn is_empty(&self) -> bool {
        self.left_items.is_empty() && self.right_items.is_empty()
    }

    /// Cursor of one side.
    pub fn cursor(&self, side: DiffSide) -> &BatchCursor {
        match side {
            DiffSide::Left => &self.left,
            DiffSide::Right => &self.right,
        }
    }

    /// Whether both sides have been handed out completely.
    pub fn is_drained(&self) -> bool {
        self.left.is_drained(self.left_items.len()) && self.right.is_drained(self.right_items.len())
    }

    /// Compute the next round, or None once both sides are drained.
    pub fn next_round(&mut self) -> Option<Round> {
        if self.is_drained() {
            return None;
        }

        let left = self.left.advance(self.left_items.len(), self.growth);
        let right = self.right.advance(self.right_items.len(), self.growth);
        self.rounds += 1;

        Some(Round {
            number: self.rounds,
            left,
            right,
        })
    }

    /// Owned copy of a batch, ready to be shipped to the UI thread.
    pub fn batch(&self, side: DiffSide, range: Range<usize>) -> Vec<T> {
        self.items(side)[range].to_vec()
    }

    fn items(&self, side: DiffSide) -> &[T] {
        match side {
            DiffSide::Left => &self.left_items,
            DiffSide::Right => &self.right_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn make_job(left: usize, right: usize, schedule: BatchSchedule) -> RenderJob<usize> {
        RenderJob::new(
            JobKind::Content,
            (0..left).collect::<Vec<_>>(),
            (0..right).collect::<Vec<_>>(),
            &schedule,
        )
    }

    fn drain(job: &mut RenderJob<usize>) -> Vec<Round> {
        std::iter::from_fn(|| job.next_round()).collect()
    }

    #[test]
    fn test_three_items_seed_one() {
        let mut job = make_job(3, 0, BatchSchedule::CONTENT);

        assert_eq!(
            drain(&mut job),
            vec![
                Round {
                    number: 1,
                    left: Some(0..1),
                    right: None
                },
                Round {
                    number: 2,
                    left: Some(1..3),
                    right: None
                },
            ]
        );
        assert!(job.is_drained());
        assert_eq!(job.rounds(), 2);
    }

    #[test]
    fn test_content_batch_sizes_grow_by_five() {
        let mut job = make_job(1000, 1000, BatchSchedule::CONTENT);
        let sizes: Vec<usize> = drain(&mut job)
            .iter()
            .map(|r| r.left.as_ref().map_or(0, |r| r.len()))
            .collect();
        // 1 + 5 + 25 + 125 + 625 = 781, the remaining 219 go out in round 6
        assert_eq!(sizes, vec![1, 5, 25, 125, 625, 219]);
    }

    #[test]
    fn test_highlight_batch_sizes_start_at_five() {
        let mut job = make_job(200, 0, BatchSchedule::HIGHLIGHTS);
        let sizes: Vec<usize> = drain(&mut job)
            .iter()
            .filter_map(|r| r.left.as_ref().map(|r| r.len()))
            .collect();
        assert_eq!(sizes, vec![5, 25, 125, 45]);
    }

    #[test]
    fn test_uneven_sides_finish_independently() {
        let mut job = make_job(2, 40, BatchSchedule::CONTENT);
        let rounds = drain(&mut job);

        assert_eq!(rounds[0].left, Some(0..1));
        assert_eq!(rounds[1].left, Some(1..2));
        assert!(rounds[2..].iter().all(|r| r.left.is_none()));
        assert_eq!(rounds.last().and_then(|r| r.right.clone()).map(|r| r.end), Some(40));
    }

    #[test]
    fn test_empty_job_has_no_rounds() {
        let mut job = make_job(0, 0, BatchSchedule::CONTENT);
        assert!(job.is_empty());
        assert!(job.is_drained());
        assert_eq!(job.next_round(), None);
        assert_eq!(job.rounds(), 0);
    }

    #[test]
    fn test_ranges_cover_every_item_once_in_order() {
        for (left, right) in [(1, 1), (7, 3), (26, 0), (157, 156), (1000, 1)] {
            let mut job = make_job(left, right, BatchSchedule::CONTENT);
            let rounds = drain(&mut job);

            let mut seen_left = Vec::new();
            let mut seen_right = Vec::new();
            for round in &rounds {
                for (side, range) in round.batches() {
                    let batch = job.batch(side, range);
                    match side {
                        DiffSide::Left => seen_left.extend(batch),
                        DiffSide::Right => seen_right.extend(batch),
                    }
                }
            }

            assert_eq!(seen_left, (0..left).collect::<Vec<_>>());
            assert_eq!(seen_right, (0..right).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_round_count_is_logarithmic() {
        // seed 1, growth 5: after k rounds 1 + 5 + ... + 5^(k-1) items are out
        let mut job = make_job(3906, 0, BatchSchedule::CONTENT);
        assert_eq!(drain(&mut job).len(), 6);

        let mut job = make_job(3907, 0, BatchSchedule::CONTENT);
        assert_eq!(drain(&mut job).len(), 7);
    }

    #[test]
    fn test_growth_of_one_is_linear() {
        let schedule = BatchSchedule::new(2, 1, Duration::ZERO).unwrap();
        let mut job = make_job(5, 0, schedule);
        let ranges: Vec<_> = drain(&mut job).into_iter().filter_map(|r| r.left).collect();
        assert_eq!(ranges, vec![0..2, 2..4, 4..5]);
    }

    #[test]
    fn test_cursor_stays_within_bounds() {
        let mut job = make_job(4, 2, BatchSchedule::HIGHLIGHTS);
        job.next_round();
        assert_eq!(job.cursor(DiffSide::Left).next_index(), 4);
        assert_eq!(job.cursor(DiffSide::Right).next_index(), 2);
        assert_eq!(job.cursor(DiffSide::Left).batch_size(), 25);
    }
}
