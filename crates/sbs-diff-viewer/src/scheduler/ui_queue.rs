//! Priority-ordered queue of work that must run on the UI thread.
//!
//! Background tasks hold a [`UiDispatcher`] and post closures; the UI thread
//! owns the [`UiQueue`] and runs them against its state from its own loop
//! with [`UiQueue::pump`]. Higher priorities run first, equal priorities run
//! in posting order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;

/// Priority of a unit of UI work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Background population; runs after everything else that is pending.
    Low,
    Normal,
    /// Input and focus handling.
    High,
}

/// Errors when handing work to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The queue no longer exists.
    #[error("UI queue is closed")]
    Closed,
    /// The queue was dropped before the work got to run.
    #[error("UI queue was dropped before the work ran")]
    Dropped,
}

type UiWork<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

struct Scheduled<S> {
    priority: Priority,
    seq: u64,
    work: UiWork<S>,
}

impl<S> PartialEq for Scheduled<S> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<S> Eq for Scheduled<S> {}

impl<S> PartialOrd for Scheduled<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Scheduled<S> {
    // BinaryHeap pops the greatest item: highest priority, then oldest.
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Cloneable handle for posting work to a [`UiQueue`] from any thread.
pub struct UiDispatcher<S> {
    tx: Sender<Scheduled<S>>,
    seq: Arc<AtomicU64>,
}

impl<S> Clone for UiDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            seq: Arc::clone(&self.seq),
        }
    }
}

impl<S: 'static> UiDispatcher<S> {
    /// Post work without waiting for it.
    pub fn post<F>(&self, priority: Priority, work: F) -> Result<(), SchedulerError>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        let seq = self.seq.fetch_add(1, AtomicOrdering::Relaxed);
        self.tx
            .send(Scheduled {
                priority,
                seq,
                work: Box::new(work),
            })
            .map_err(|_| SchedulerError::Closed)
    }

    /// Post work and wait until the UI thread has run it.
    pub async fn run<F, R>(&self, priority: Priority, work: F) -> Result<R, SchedulerError>
    where
        F: FnOnce(&mut S) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        self.post(priority, move |state| {
            // The waiter may have given up; the work still counts as done.
            let _ = done_tx.send(work(state));
        })?;
        done_rx.await.map_err(|_| SchedulerError::Dropped)
    }
}

/// UI-thread side of the queue.
pub struct UiQueue<S> {
    rx: Receiver<Scheduled<S>>,
    dispatcher: UiDispatcher<S>,
    pending: BinaryHeap<Scheduled<S>>,
}

impl<S: 'static> Default for UiQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> UiQueue<S> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            rx,
            dispatcher: UiDispatcher {
                tx,
                seq: Arc::new(AtomicU64::new(0)),
            },
            pending: BinaryHeap::new(),
        }
    }

    /// Handle for background tasks.
    pub fn dispatcher(&self) -> UiDispatcher<S> {
        self.dispatcher.clone()
    }

    /// Number of units waiting to run.
    pub fn pending(&mut self) -> usize {
        self.collect();
        self.pending.len()
    }

    /// Run everything that is pending right now.
    ///
    /// Work posted while pumping waits for the next call.
    pub fn pump(&mut self, state: &mut S) -> usize {
        self.pump_budget(state, usize::MAX)
    }

    /// Run at most `budget` units, highest priority first.
    pub fn pump_budget(&mut self, state: &mut S, budget: usize) -> usize {
        self.collect();

        let mut ran = 0;
        while ran < budget {
            let Some(item) = self.pending.pop() else {
                break;
            };
            (item.work)(state);
            ran += 1;
        }

        if ran > 0 {
            log::trace!("UI queue ran {} unit(s), {} pending", ran, self.pending.len());
        }
        ran
    }

    fn collect(&mut self) {
        while let Ok(item) = self.rx.try_recv() {
            self.pending.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_higher_priority_runs_first() {
        let mut queue: UiQueue<Vec<&'static str>> = UiQueue::new();
        let dispatcher = queue.dispatcher();

        dispatcher.post(Priority::Low, |s| s.push("low")).unwrap();
        dispatcher.post(Priority::High, |s| s.push("high")).unwrap();
        dispatcher.post(Priority::Normal, |s| s.push("normal")).unwrap();

        let mut state = Vec::new();
        assert_eq!(queue.pump(&mut state), 3);
        assert_eq!(state, vec!["high", "normal", "low"]);
    }

    #[test]
    fn test_same_priority_is_fifo() {
        let mut queue: UiQueue<Vec<u32>> = UiQueue::new();
        let dispatcher = queue.dispatcher();
        for i in 0..10 {
            dispatcher.post(Priority::Low, move |s| s.push(i)).unwrap();
        }

        let mut state = Vec::new();
        queue.pump(&mut state);
        assert_eq!(state, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_pump_budget_leaves_rest_pending() {
        let mut queue: UiQueue<u32> = UiQueue::new();
        let dispatcher = queue.dispatcher();
        for _ in 0..5 {
            dispatcher.post(Priority::Normal, |s| *s += 1).unwrap();
        }

        let mut state = 0;
        assert_eq!(queue.pump_budget(&mut state, 2), 2);
        assert_eq!(state, 2);
        assert_eq!(queue.pending(), 3);
        assert_eq!(queue.pump(&mut state), 3);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_work_posted_while_pumping_waits() {
        let mut queue: UiQueue<Vec<u32>> = UiQueue::new();
        let dispatcher = queue.dispatcher();
        let inner = queue.dispatcher();
        dispatcher
            .post(Priority::Normal, move |s| {
                s.push(1);
                inner.post(Priority::High, |s| s.push(2)).unwrap();
            })
            .unwrap();

        let mut state = Vec::new();
        assert_eq!(queue.pump(&mut state), 1);
        assert_eq!(queue.pump(&mut state), 1);
        assert_eq!(state, vec![1, 2]);
    }

    #[test]
    fn test_post_after_queue_dropped() {
        let queue: UiQueue<u32> = UiQueue::new();
        let dispatcher = queue.dispatcher();
        drop(queue);
        assert_eq!(
            dispatcher.post(Priority::Low, |_| {}),
            Err(SchedulerError::Closed)
        );
    }

    #[tokio::test]
    async fn test_run_returns_result_from_ui_thread() {
        let mut queue: UiQueue<Vec<u32>> = UiQueue::new();
        let dispatcher = queue.dispatcher();

        let handle = tokio::spawn(async move {
            dispatcher
                .run(Priority::Low, |s: &mut Vec<u32>| {
                    s.push(7);
                    s.len()
                })
                .await
        });

        let mut state = Vec::new();
        while !handle.is_finished() {
            queue.pump(&mut state);
            tokio::task::yield_now().await;
        }

        assert_eq!(handle.await.unwrap(), Ok(1));
        assert_eq!(state, vec![7]);
    }

    #[tokio::test]
    async fn test_run_fails_when_queue_dropped_before_pump() {
        let mut queue: UiQueue<u32> = UiQueue::new();
        let dispatcher = queue.dispatcher();

        let handle = tokio::spawn(async move { dispatcher.run(Priority::Low, |_| ()).await });
        while queue.pending() == 0 {
            tokio::task::yield_now().await;
        }
        drop(queue);

        assert_eq!(handle.await.unwrap(), Err(SchedulerError::Dropped));
    }
}
