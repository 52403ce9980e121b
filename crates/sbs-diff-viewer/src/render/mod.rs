//! Incremental population of the panes.
//!
//! A render starts two independent jobs, one for content blocks and one for
//! highlights. Each job copies its left and right lists into the matching
//! sinks in geometrically growing batches, pausing between rounds so the UI
//! thread keeps handling input while a large diff fills in.

mod driver;
mod generation;
mod job;
mod schedule;

pub use driver::{drive, JobOutcome, SinkSelector};
pub use generation::{Generation, GenerationToken};
pub use job::{BatchCursor, JobKind, RenderJob, Round};
pub use schedule::{BatchSchedule, RenderOptions, ScheduleError};

use crate::scheduler::SchedulerError;
use thiserror::Error;

/// Errors ending a render job early.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The UI queue went away while the job was running.
    #[error("render job lost its UI queue: {0}")]
    Scheduler(#[from] SchedulerError),

    /// The job task panicked or was aborted.
    #[error("render job did not finish: {0}")]
    Join(#[from] tokio::task::JoinError),
}
