//! Render generations used to retire superseded jobs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonically increasing render counter shared with running jobs.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    counter: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, retiring every outstanding token.
    pub fn advance(&self) -> GenerationToken {
        let value = self.counter.fetch_add(1, Ordering::AcqRel) + 1;
        GenerationToken {
            counter: Arc::clone(&self.counter),
            value,
        }
    }

    /// Token for the current generation without advancing.
    pub fn current(&self) -> GenerationToken {
        GenerationToken {
            counter: Arc::clone(&self.counter),
            value: self.counter.load(Ordering::Acquire),
        }
    }
}

/// A job's claim on the generation it was started in.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    counter: Arc<AtomicU64>,
    value: u64,
}

impl GenerationToken {
    pub fn value(&self) -> u64 {
        self.value
    }

    /// False once a newer generation has started.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.value
    }
}
