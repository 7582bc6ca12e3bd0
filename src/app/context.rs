//! Capability handle passed to handlers while they react to input or timers.
//!
//! A [`Context`] borrows the navigator, the scheduler, the random source and
//! the action buffer for the duration of one callback. Handlers never reach
//! into engine state any other way.

use super::navigation::Navigator;
use super::random::RandomSource;
use super::scheduler::{Millis, Scheduler, TimerId};
use super::timers::{HandlerTimer, Timer};
use super::Action;
use crate::domain::{Effect, Result, ViewId};
use std::time::Duration;

/// Borrowed view of the engine handed to one callback.
pub struct Context<'a> {
    slot: usize,
    nav: &'a mut Navigator,
    scheduler: &'a mut Scheduler,
    rng: &'a mut dyn RandomSource,
    actions: &'a mut Vec<Action>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        slot: usize,
        nav: &'a mut Navigator,
        scheduler: &'a mut Scheduler,
        rng: &'a mut dyn RandomSource,
        actions: &'a mut Vec<Action>,
    ) -> Self {
        Self {
            slot,
            nav,
            scheduler,
            rng,
            actions,
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    #[must_use]
    pub fn active_view(&self) -> &ViewId {
        self.nav.active()
    }

    #[must_use]
    pub fn is_at_entry(&self) -> bool {
        self.nav.is_at_entry()
    }

    /// Requests a transition.
    ///
    /// # Errors
    ///
    /// Propagates [`NarrativeError::UnknownView`](crate::domain::NarrativeError::UnknownView).
    pub fn go_to(&mut self, target: &ViewId) -> Result<()> {
        self.nav.go_to(target, self.actions)
    }

    /// Returns to the previous view; no-op on empty history.
    ///
    /// # Errors
    ///
    /// Propagates [`NarrativeError::UnknownView`](crate::domain::NarrativeError::UnknownView).
    pub fn go_back(&mut self) -> Result<bool> {
        self.nav.go_back(self.actions)
    }

    /// Arms a timer routed back to the calling handler.
    pub fn after(&mut self, delay: Duration, kind: HandlerTimer) -> TimerId {
        self.scheduler.after(
            delay,
            Timer::Handler {
                slot: self.slot,
                kind,
            },
        )
    }

    /// Arms an engine-level timer.
    pub fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerId {
        self.scheduler.after(delay, timer)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.scheduler.cancel(id)
    }

    /// Applies a transient effect and arms its removal.
    pub fn flash(&mut self, effect: Effect, duration: Duration) {
        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.actions.push(Action::ApplyEffect { effect, duration_ms });
        self.scheduler.after(duration, Timer::EffectEnd(effect));
    }

    pub fn emit(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.chance(p)
    }

    /// Picks one element uniformly; `None` for an empty slice.
    pub fn pick<'v, T>(&mut self, choices: &'v [T]) -> Option<&'v T> {
        if choices.is_empty() {
            return None;
        }
        choices.get(self.rng.index(choices.len()))
    }

    pub fn percent_between(&mut self, low: u8, high: u8) -> u8 {
        self.rng.percent_between(low, high)
    }
}
