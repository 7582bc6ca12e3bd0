//! Ambient cosmetic tasks: title cycling, background tint drift, glitch flashes.
//!
//! Each task re-arms itself from its own deadline and never touches
//! navigation state. None of them can fail.

use super::random::RandomSource;
use super::scheduler::Scheduler;
use super::timers::{AmbientTimer, Timer};
use super::Action;
use crate::domain::{Effect, Tint};
use std::time::Duration;

pub const TITLE_PERIOD: Duration = Duration::from_secs(5);
pub const TINT_PERIOD: Duration = Duration::from_secs(5);
pub const GLITCH_PERIOD: Duration = Duration::from_secs(10);
pub const GLITCH_LENGTH: Duration = Duration::from_millis(300);

/// Tint phase is kept in tenths so it wraps exactly at 10.
const TINT_STEPS: u32 = 100;

#[derive(Debug, Clone)]
pub struct AmbientEffects {
    titles: Vec<String>,
    title_index: usize,
    tint_phase: u32,
    glitch_chance: f64,
}

impl AmbientEffects {
    #[must_use]
    pub fn new(titles: impl IntoIterator<Item = impl Into<String>>, glitch_chance: f64) -> Self {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
            title_index: 0,
            tint_phase: 0,
            glitch_chance: glitch_chance.clamp(0.0, 1.0),
        }
    }

    /// Arms the first occurrence of every task.
    pub fn start(&self, scheduler: &mut Scheduler) {
        scheduler.after(TITLE_PERIOD, Timer::Ambient(AmbientTimer::Title));
        scheduler.after(TINT_PERIOD, Timer::Ambient(AmbientTimer::Tint));
        scheduler.after(GLITCH_PERIOD, Timer::Ambient(AmbientTimer::Glitch));
    }

    /// Current tint phase in `[0, 10)`.
    #[must_use]
    pub fn tint_phase(&self) -> f64 {
        f64::from(self.tint_phase) / 10.0
    }

    pub fn on_timer(
        &mut self,
        task: AmbientTimer,
        scheduler: &mut Scheduler,
        rng: &mut dyn RandomSource,
        out: &mut Vec<Action>,
    ) {
        match task {
            AmbientTimer::Title => {
                scheduler.after(TITLE_PERIOD, Timer::Ambient(AmbientTimer::Title));
                if let Some(title) = self.titles.get(self.title_index) {
                    out.push(Action::SetTitle(title.clone()));
                    self.title_index = (self.title_index + 1) % self.titles.len();
                }
            }
            AmbientTimer::Tint => {
                scheduler.after(TINT_PERIOD, Timer::Ambient(AmbientTimer::Tint));
                self.tint_phase = (self.tint_phase + 1) % TINT_STEPS;
                let darkness = u8::try_from(self.tint_phase / 10).unwrap_or(u8::MAX);
                out.push(Action::SetTint(Tint::rgb(darkness, 0, 0)));
            }
            AmbientTimer::Glitch => {
                scheduler.after(GLITCH_PERIOD, Timer::Ambient(AmbientTimer::Glitch));
                if rng.chance(self.glitch_chance) {
                    tracing::trace!("ambient glitch");
                    out.push(Action::ApplyEffect {
                        effect: Effect::Glitch,
                        duration_ms: 300,
                    });
                    scheduler.after(GLITCH_LENGTH, Timer::EffectEnd(Effect::Glitch));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::random::ScriptedRandom;

    fn drive(
        effects: &mut AmbientEffects,
        scheduler: &mut Scheduler,
        rng: &mut ScriptedRandom,
        until: u64,
    ) -> Vec<Action> {
        let mut out = Vec::new();
        while let Some((_, timer)) = scheduler.pop_due(until) {
            match timer {
                Timer::Ambient(task) => effects.on_timer(task, scheduler, rng, &mut out),
                Timer::EffectEnd(effect) => out.push(Action::ClearEffect(effect)),
                _ => {}
            }
        }
        out
    }

    fn titles(actions: &[Action]) -> Vec<&str> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::SetTitle(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_titles_cycle_and_wrap() {
        let mut effects = AmbientEffects::new(["a", "b", "c"], 0.0);
        let mut scheduler = Scheduler::new();
        let mut rng = ScriptedRandom::new();
        effects.start(&mut scheduler);

        let out = drive(&mut effects, &mut scheduler, &mut rng, 20_000);
        assert_eq!(titles(&out), vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn test_tint_wraps_at_ten() {
        let mut effects = AmbientEffects::new(Vec::<String>::new(), 0.0);
        let mut scheduler = Scheduler::new();
        let mut rng = ScriptedRandom::new();
        effects.start(&mut scheduler);

        let out = drive(&mut effects, &mut scheduler, &mut rng, 100 * 5_000);
        let tints: Vec<Tint> = out
            .iter()
            .filter_map(|a| match a {
                Action::SetTint(t) => Some(*t),
                _ => None,
            })
            .collect();
        assert_eq!(tints.len(), 100);
        assert_eq!(tints[8], Tint::rgb(0, 0, 0));
        assert_eq!(tints[9], Tint::rgb(1, 0, 0));
        assert_eq!(tints[98], Tint::rgb(9, 0, 0));
        assert_eq!(tints[99], Tint::rgb(0, 0, 0));
        assert!(effects.tint_phase().abs() < f64::EPSILON);
    }

    #[test]
    fn test_glitch_flashes_only_on_hit() {
        let mut effects = AmbientEffects::new(Vec::<String>::new(), 0.05);
        let mut scheduler = Scheduler::new();
        let mut rng = ScriptedRandom::new().with_chances([false, true]);
        effects.start(&mut scheduler);

        let out = drive(&mut effects, &mut scheduler, &mut rng, 20_300);
        let glitches: Vec<&Action> = out
            .iter()
            .filter(|a| matches!(a, Action::ApplyEffect { .. } | Action::ClearEffect(_)))
            .collect();
        assert_eq!(
            glitches,
            vec![
                &Action::ApplyEffect { effect: Effect::Glitch, duration_ms: 300 },
                &Action::ClearEffect(Effect::Glitch),
            ]
        );
    }

    #[test]
    fn test_periodic_tasks_do_not_drift() {
        let mut effects = AmbientEffects::new(["x"], 0.0);
        let mut scheduler = Scheduler::new();
        let mut rng = ScriptedRandom::new();
        effects.start(&mut scheduler);

        drive(&mut effects, &mut scheduler, &mut rng, 5_000);
        scheduler.advance_to(7_321);
        assert_eq!(scheduler.next_deadline(), Some(10_000));
    }
}
