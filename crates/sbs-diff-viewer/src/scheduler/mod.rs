//! Cooperative UI-thread scheduling.

mod ui_queue;

pub use ui_queue::{Priority, SchedulerError, UiDispatcher, UiQueue};
