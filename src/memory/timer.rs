//! Fire-and-forget delayed callbacks, tagged with the game generation that
//! scheduled them.

use std::time::{Duration, Instant};

/// Session token. Bumped on every (re)start so timers left over from a
/// replaced game can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled<T> {
    pub due: Instant,
    pub generation: Generation,
    pub task: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, generation: Generation, task: T) {
        self.pending.push(Scheduled {
            due: now + delay,
            generation,
            task,
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due time, if anything is pending.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    /// Timers due at the same instant keep scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<Scheduled<T>> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = pending;
        due.sort_by_key(|s| s.due);
        due
    }
}
