//! Dwell timer on a single hover target.

use super::{Context, Detector, Input};
use crate::app::scheduler::TimerId;
use crate::app::timers::HandlerTimer;
use crate::domain::{Result, ViewId};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dwell {
    Idle,
    Armed(TimerId),
}

/// Fires a transition once the pointer has rested on the target for `dwell`.
///
/// Leaving cancels the timer; re-entering arms a fresh one with no credit
/// carried over. At most one timer is ever live.
#[derive(Debug, Clone)]
pub struct HoverDwell {
    dwell: Duration,
    target: ViewId,
    state: Dwell,
}

impl HoverDwell {
    #[must_use]
    pub const fn new(dwell: Duration, target: ViewId) -> Self {
        Self {
            dwell,
            target,
            state: Dwell::Idle,
        }
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        matches!(self.state, Dwell::Armed(_))
    }

    fn disarm(&mut self, cx: &mut Context<'_>) {
        if let Dwell::Armed(id) = std::mem::replace(&mut self.state, Dwell::Idle) {
            cx.cancel(id);
        }
    }
}

impl Detector for HoverDwell {
    fn observe(&mut self, input: &Input, cx: &mut Context<'_>) -> Result<()> {
        match input {
            Input::PointerEnter(_) => {
                self.disarm(cx);
                self.state = Dwell::Armed(cx.after(self.dwell, HandlerTimer::HoverDwell));
            }
            Input::PointerLeave(_) => self.disarm(cx),
            _ => {}
        }
        Ok(())
    }

    fn on_timer(&mut self, kind: HandlerTimer, id: TimerId, cx: &mut Context<'_>) -> Result<()> {
        if kind != HandlerTimer::HoverDwell || self.state != Dwell::Armed(id) {
            return Ok(());
        }
        self.state = Dwell::Idle;
        tracing::debug!(target_view = %self.target, "hover dwell elapsed");
        cx.go_to(&self.target)
    }
}
