//! Async driver that feeds a [`RenderJob`] to the UI thread round by round.

use super::generation::GenerationToken;
use super::job::RenderJob;
use super::RenderError;
use crate::model::DiffSide;
use crate::scheduler::{Priority, UiDispatcher};
use crate::sink::DestinationSink;
use std::time::Duration;

/// Picks the sink a job appends to on the UI state.
pub type SinkSelector<S, T> = fn(&mut S, DiffSide) -> &mut DestinationSink<T>;

/// How a job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Every item reached its sink.
    Completed { rounds: usize },
    /// A newer render started; the job stopped appending.
    Superseded { rounds: usize },
}

impl JobOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, JobOutcome::Completed { .. })
    }
}

/// Pause between rounds. A zero delay still yields once to the runtime.
async fn pause(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}

/// Copy both sides of `job` into their sinks.
///
/// Each round pauses for `delay`, then posts one low-priority unit per
/// non-empty batch and waits for it to run before continuing. The token is
/// checked before every round and again on the UI thread right before the
/// sink is touched, so a superseded job never appends into a sink that a
/// newer render has cleared.
pub async fn drive<S, T>(
    mut job: RenderJob<T>,
    delay: Duration,
    token: GenerationToken,
    dispatcher: UiDispatcher<S>,
    select: SinkSelector<S, T>,
) -> Result<JobOutcome, RenderError>
where
    S: 'static,
    T: Clone + Send + Sync + 'static,
{
    let kind = job.kind();
    log::debug!(
        "{:?} job #{} started: {} left, {} right",
        kind,
        token.value(),
        job.len(DiffSide::Left),
        job.len(DiffSide::Right)
    );

    while !job.is_drained() {
        pause(delay).await;

        if !token.is_current() {
            log::debug!("{:?} job #{} superseded before round {}", kind, token.value(), job.rounds() + 1);
            return Ok(JobOutcome::Superseded {
                rounds: job.rounds(),
            });
        }

        let Some(round) = job.next_round() else {
            break;
        };

        for (side, range) in round.batches() {
            log::trace!(
                "{:?} job #{} round {}: {:?} {:?}",
                kind,
                token.value(),
                round.number,
                side,
                range
            );

            let batch = job.batch(side, range);
            let ui_token = token.clone();
            let applied = dispatcher
                .run(Priority::Low, move |state: &mut S| {
                    if !ui_token.is_current() {
                        return false;
                    }
                    select(state, side).append_batch(batch);
                    true
                })
                .await?;

            if !applied {
                log::debug!("{:?} job #{} superseded in round {}", kind, token.value(), round.number);
                return Ok(JobOutcome::Superseded {
                    rounds: job.rounds(),
                });
            }
        }
    }

    log::debug!("{:?} job #{} completed in {} round(s)", kind, token.value(), job.rounds());
    Ok(JobOutcome::Completed {
        rounds: job.rounds(),
    })
}
