//! Tunables for incremental population.

use std::time::Duration;
use thiserror::Error;

/// Rejected batch tunables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A zero seed would never make progress.
    #[error("batch seed must be at least 1")]
    ZeroSeed,
    /// A zero growth factor would collapse the batch size to zero.
    #[error("batch growth factor must be at least 1")]
    ZeroGrowth,
}

/// How a job splits its items into batches.
///
/// Round `n` (0-based) transfers up to `seed * growth^n` items per side and
/// is preceded by a pause of `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSchedule {
    seed: usize,
    growth: usize,
    delay: Duration,
}

impl BatchSchedule {
    /// Default schedule for content blocks: 1, 5, 25, ... every 1ms.
    pub const CONTENT: BatchSchedule = BatchSchedule {
        seed: 1,
        growth: 5,
        delay: Duration::from_millis(1),
    };

    /// Default schedule for highlights: 5, 25, 125, ... every 10ms.
    pub const HIGHLIGHTS: BatchSchedule = BatchSchedule {
        seed: 5,
        growth: 5,
        delay: Duration::from_millis(10),
    };

    /// Create a validated schedule.
    pub fn new(seed: usize, growth: usize, delay: Duration) -> Result<Self, ScheduleError> {
        if seed == 0 {
            return Err(ScheduleError::ZeroSeed);
        }
        if growth == 0 {
            return Err(ScheduleError::ZeroGrowth);
        }
        Ok(Self {
            seed,
            growth,
            delay,
        })
    }

    /// Same batch sizes with a different pause.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn seed(&self) -> usize {
        self.seed
    }

    pub fn growth(&self) -> usize {
        self.growth
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Schedules for the two jobs started per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub content: BatchSchedule,
    pub highlights: BatchSchedule,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            content: BatchSchedule::CONTENT,
            highlights: BatchSchedule::HIGHLIGHTS,
        }
    }
}

impl RenderOptions {
    /// Both default schedules without pauses between rounds.
    pub fn immediate() -> Self {
        Self {
            content: BatchSchedule::CONTENT.with_delay(Duration::ZERO),
            highlights: BatchSchedule::HIGHLIGHTS.with_delay(Duration::ZERO),
        }
    }
}
