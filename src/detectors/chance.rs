//! Periodic, probability-gated detour through a mystery view.

use super::{Context, Detector, Input};
use crate::app::scheduler::TimerId;
use crate::app::timers::HandlerTimer;
use crate::domain::{Result, ViewId};
use std::time::Duration;

pub const PERIOD: Duration = Duration::from_secs(60);
pub const DWELL: Duration = Duration::from_secs(3);

/// Every [`PERIOD`], away from the entry view, rolls `probability`; on a hit
/// it jumps to a random mystery view and returns via `go_back` after
/// [`DWELL`]. The return timer is never cancelled once armed.
#[derive(Debug, Clone)]
pub struct AmbientChance {
    probability: f64,
    period: Duration,
    dwell: Duration,
    mysteries: Vec<ViewId>,
}

impl AmbientChance {
    #[must_use]
    pub fn new(probability: f64, mysteries: Vec<ViewId>) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            period: PERIOD,
            dwell: DWELL,
            mysteries,
        }
    }

    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    fn roll(&self, cx: &mut Context<'_>) -> Result<()> {
        if cx.is_at_entry() || !cx.chance(self.probability) {
            return Ok(());
        }
        let Some(view) = cx.pick(&self.mysteries).cloned() else {
            return Ok(());
        };
        tracing::debug!(mystery = %view, "ambient detour");
        cx.go_to(&view)?;
        cx.after(self.dwell, HandlerTimer::ChanceReturn);
        Ok(())
    }
}

impl Detector for AmbientChance {
    fn start(&mut self, cx: &mut Context<'_>) -> Result<()> {
        cx.after(self.period, HandlerTimer::ChanceTick);
        Ok(())
    }

    fn observe(&mut self, _input: &Input, _cx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    fn on_timer(&mut self, kind: HandlerTimer, _id: TimerId, cx: &mut Context<'_>) -> Result<()> {
        match kind {
            HandlerTimer::ChanceTick => {
                cx.after(self.period, HandlerTimer::ChanceTick);
                self.roll(cx)
            }
            HandlerTimer::ChanceReturn => cx.go_back().map(|_| ()),
            _ => Ok(()),
        }
    }
}
