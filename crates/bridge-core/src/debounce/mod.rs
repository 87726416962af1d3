//! Per-key cancellable delayed actions.

mod scheduler;

pub use scheduler::DebounceScheduler;
