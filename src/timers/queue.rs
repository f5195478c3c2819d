//! Host-driven timer queue.
//!
//! The queue owns a virtual clock. It never sleeps or spawns; the host
//! advances time and the owner pops whatever became due. Every scheduled
//! timer gets a [`TimerId`] handle so it can be cancelled individually,
//! and the whole queue can be cancelled in one call.
//!
//! ```
//! use std::time::Duration;
//! use photo_pair::timers::TimerQueue;
//!
//! let mut queue = TimerQueue::new();
//! let early = queue.schedule(Duration::from_millis(100), "early");
//! queue.schedule(Duration::from_millis(300), "late");
//!
//! let target = queue.now() + Duration::from_millis(200);
//! let fired = queue.pop_due(target).unwrap();
//! assert_eq!(fired.id, early);
//! assert_eq!(fired.payload, "early");
//! assert!(queue.pop_due(target).is_none());
//!
//! queue.advance_to(target);
//! assert_eq!(queue.len(), 1);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl TimerId {
    /// Create a new timer ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// A timer that became due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer<T> {
    pub id: TimerId,
    /// Clock value at which the timer fired.
    pub deadline: Duration,
    pub payload: T,
}

/// Pending timers ordered by deadline, ties broken by scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), T>,
    deadlines: FxHashMap<TimerId, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
            deadlines: FxHashMap::default(),
        }
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Is this timer still waiting to fire?
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Schedule `payload` to fire `delay` after the current clock value.
    ///
    /// Deadlines saturate at `Duration::MAX`.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let deadline = self.now.saturating_add(delay);
        self.pending.insert((deadline, id), payload);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel one timer, returning its payload if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.pending.remove(&(deadline, id))
    }

    /// Cancel every pending timer. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        self.deadlines.clear();
        count
    }

    /// Remove the earliest timer due at or before `until`.
    ///
    /// The clock moves forward to the timer's deadline, so timers scheduled
    /// while handling it are measured from the moment it fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<Timer<T>> {
        let &(deadline, id) = self.pending.keys().next()?;
        if deadline > until {
            return None;
        }

        let payload = self.pending.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);

        Some(Timer {
            id,
            deadline,
            payload,
        })
    }

    /// Move the clock forward. The clock never runs backwards.
    pub fn advance_to(&mut self, target: Duration) {
        self.now = self.now.max(target);
    }
}
