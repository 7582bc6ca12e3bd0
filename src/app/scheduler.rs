//! Virtual-time timer queue shared by every component of the engine.
//!
//! All delayed work (hover dwell, click idle windows, ambient ticks, effect
//! expiry, the confirmation delay) is armed here instead of being chained ad
//! hoc. Time is expressed in [`Millis`] since engine start and only moves when
//! the host stamps an event, which keeps every timing path deterministic under
//! test.
//!
//! Due timers drain in `(deadline, arming order)` order. A cancelled timer is
//! removed from the queue immediately and can never fire late.

use super::timers::Timer;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Milliseconds since the engine started.
pub type Millis = u64;

/// Handle to an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Ordered queue of pending timers.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Millis,
    next_id: u64,
    queue: BTreeMap<(Millis, TimerId), Timer>,
    deadlines: HashMap<TimerId, Millis>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Millis {
        self.now
    }

    /// Arms `timer` to fire `delay` after the current virtual time.
    pub fn after(&mut self, delay: Duration, timer: Timer) -> TimerId {
        let delay_ms = Millis::try_from(delay.as_millis()).unwrap_or(Millis::MAX);
        let due = self.now.saturating_add(delay_ms);
        let id = TimerId(self.next_id);
        self.next_id += 1;

        tracing::trace!(timer = ?timer, due, id = id.0, "timer armed");
        self.queue.insert((due, id), timer);
        self.deadlines.insert(id, due);
        id
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(due) = self.deadlines.remove(&id) else {
            return false;
        };
        let removed = self.queue.remove(&(due, id));
        tracing::trace!(id = id.0, due, "timer cancelled");
        removed.is_some()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to its deadline.
    ///
    /// Callers loop on this until it returns `None`, then call [`advance_to`](Self::advance_to).
    pub fn pop_due(&mut self, until: Millis) -> Option<(TimerId, Timer)> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > until {
            return None;
        }
        let timer = self.queue.remove(&(due, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(due);
        Some((id, timer))
    }

    /// Moves the clock forward. Time never runs backwards.
    pub fn advance_to(&mut self, now: Millis) {
        if now < self.now {
            tracing::debug!(now, clock = self.now, "ignoring clock regression");
            return;
        }
        self.now = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::timers::AmbientTimer;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_timers_drain_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        scheduler.after(ms(300), Timer::Ambient(AmbientTimer::Glitch));
        scheduler.after(ms(100), Timer::Ambient(AmbientTimer::Title));
        scheduler.after(ms(200), Timer::Ambient(AmbientTimer::Tint));

        let fired: Vec<Timer> = std::iter::from_fn(|| scheduler.pop_due(1_000).map(|(_, t)| t)).collect();
        assert_eq!(
            fired,
            vec![
                Timer::Ambient(AmbientTimer::Title),
                Timer::Ambient(AmbientTimer::Tint),
                Timer::Ambient(AmbientTimer::Glitch),
            ]
        );
        assert_eq!(scheduler.now(), 300);
    }

    #[test]
    fn test_ties_fire_in_arming_order() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.after(ms(50), Timer::Ambient(AmbientTimer::Tint));
        let second = scheduler.after(ms(50), Timer::Ambient(AmbientTimer::Title));
        assert_eq!(scheduler.pop_due(50).map(|(id, _)| id), Some(first));
        assert_eq!(scheduler.pop_due(50).map(|(id, _)| id), Some(second));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.after(ms(10), Timer::Ambient(AmbientTimer::Title));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.pop_due(100).is_none());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn test_timer_not_due_stays_queued() {
        let mut scheduler = Scheduler::new();
        scheduler.after(ms(500), Timer::Ambient(AmbientTimer::Title));
        assert!(scheduler.pop_due(499).is_none());
        assert_eq!(scheduler.next_deadline(), Some(500));
    }

    #[test]
    fn test_clock_never_regresses() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(1_000);
        scheduler.advance_to(400);
        assert_eq!(scheduler.now(), 1_000);
    }
}
