//! Cancellable delayed transitions on a host-driven clock.

mod queue;

pub use queue::{Timer, TimerId, TimerQueue};
