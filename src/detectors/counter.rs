//! Repeated-click counters.

use super::{Context, Detector, Input};
use crate::app::scheduler::TimerId;
use crate::app::timers::HandlerTimer;
use crate::domain::{Result, ViewId};
use std::time::Duration;

/// Counts clicks and fires a transition at an exact threshold.
///
/// With an idle window, every click re-arms a fresh idle timer (cancelling the
/// previous one); if it fires before the next click, the count drops to zero.
/// Without one, the count only resets when the threshold is reached.
#[derive(Debug, Clone)]
pub struct ClickCounter {
    threshold: u32,
    idle: Option<Duration>,
    target: ViewId,
    count: u32,
    idle_timer: Option<TimerId>,
}

impl ClickCounter {
    #[must_use]
    pub fn with_idle_reset(threshold: u32, idle: Duration, target: ViewId) -> Self {
        Self::build(threshold, Some(idle), target)
    }

    /// Counter that never resets on idle; only reaching `threshold` clears it.
    #[must_use]
    pub fn without_idle_reset(threshold: u32, target: ViewId) -> Self {
        Self::build(threshold, None, target)
    }

    fn build(threshold: u32, idle: Option<Duration>, target: ViewId) -> Self {
        Self {
            threshold: threshold.max(1),
            idle,
            target,
            count: 0,
            idle_timer: None,
        }
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }
}

impl Detector for ClickCounter {
    fn observe(&mut self, _input: &Input, cx: &mut Context<'_>) -> Result<()> {
        if let Some(id) = self.idle_timer.take() {
            cx.cancel(id);
        }

        self.count += 1;
        if self.count >= self.threshold {
            self.count = 0;
            tracing::debug!(target_view = %self.target, "click threshold reached");
            return cx.go_to(&self.target);
        }

        if let Some(idle) = self.idle {
            self.idle_timer = Some(cx.after(idle, HandlerTimer::ClickIdle));
        }
        Ok(())
    }

    fn on_timer(&mut self, kind: HandlerTimer, id: TimerId, _cx: &mut Context<'_>) -> Result<()> {
        if kind == HandlerTimer::ClickIdle && self.idle_timer == Some(id) {
            self.idle_timer = None;
            self.count = 0;
        }
        Ok(())
    }
}
