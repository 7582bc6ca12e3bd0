//! Overt links and buttons.
//!
//! These are ordinary rows of the registration table, the same as the covert
//! recognizers; they just fire on the first click.

use super::{Context, Detector, Input};
use crate::app::scheduler::TimerId;
use crate::app::timers::{HandlerTimer, Timer};
use crate::app::Action;
use crate::domain::{Effect, Result, Target, ViewId};
use std::time::Duration;

/// Number of question cards revealed on the questions view.
pub const QUESTION_COUNT: usize = 20;
/// Delay between two consecutive question cards.
pub const QUESTION_STAGGER: Duration = Duration::from_millis(100);
/// Delay before the support widget jumps to a new spot.
pub const WIDGET_DELAY: Duration = Duration::from_millis(100);
/// Length of the payment glitch, after which the void takes over.
pub const PAYMENT_GLITCH: Duration = Duration::from_millis(300);

/// Clears the question cards and schedules them to reappear one by one.
pub fn reveal_questions(cx: &mut Context<'_>) {
    cx.emit(Action::ClearQuestions);
    for index in 0..QUESTION_COUNT {
        let delay = QUESTION_STAGGER * u32::try_from(index).unwrap_or(u32::MAX);
        cx.schedule(delay, Timer::RevealQuestion(index));
    }
}

/// Plain link to a fixed view.
#[derive(Debug, Clone)]
pub struct NavigateLink {
    to: ViewId,
}

impl NavigateLink {
    #[must_use]
    pub const fn new(to: ViewId) -> Self {
        Self { to }
    }
}

impl Detector for NavigateLink {
    fn observe(&mut self, _input: &Input, cx: &mut Context<'_>) -> Result<()> {
        cx.go_to(&self.to)
    }
}

/// Link whose destination is drawn uniformly from `choices`.
#[derive(Debug, Clone)]
pub struct RandomLink {
    choices: Vec<ViewId>,
}

impl RandomLink {
    #[must_use]
    pub fn new(choices: Vec<ViewId>) -> Self {
        Self { choices }
    }
}

impl Detector for RandomLink {
    fn observe(&mut self, _input: &Input, cx: &mut Context<'_>) -> Result<()> {
        match cx.pick(&self.choices).cloned() {
            Some(view) => cx.go_to(&view),
            None => Ok(()),
        }
    }
}

/// "Take me back".
#[derive(Debug, Clone, Copy, Default)]
pub struct BackLink;

impl Detector for BackLink {
    fn observe(&mut self, _input: &Input, cx: &mut Context<'_>) -> Result<()> {
        cx.go_back().map(|_| ())
    }
}

/// Click-anywhere on the entry view, ignored until the view has been up for `delay`.
#[derive(Debug, Clone)]
pub struct EntryGate {
    to: ViewId,
    delay: Duration,
    unlock: Option<TimerId>,
    unlocked: bool,
}

impl EntryGate {
    #[must_use]
    pub const fn new(to: ViewId, delay: Duration) -> Self {
        Self {
            to,
            delay,
            unlock: None,
            unlocked: false,
        }
    }

    #[must_use]
    pub const fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}

impl Detector for EntryGate {
    fn start(&mut self, cx: &mut Context<'_>) -> Result<()> {
        self.unlock = Some(cx.after(self.delay, HandlerTimer::EntryUnlock));
        Ok(())
    }

    fn observe(&mut self, _input: &Input, cx: &mut Context<'_>) -> Result<()> {
        if !self.unlocked {
            tracing::trace!("entry click before unlock, ignored");
            return Ok(());
        }
        cx.go_to(&self.to)
    }

    fn on_timer(&mut self, kind: HandlerTimer, id: TimerId, _cx: &mut Context<'_>) -> Result<()> {
        if kind == HandlerTimer::EntryUnlock && self.unlock == Some(id) {
            self.unlock = None;
            self.unlocked = true;
        }
        Ok(())
    }
}

/// Opens the questions view and restarts the card reveal.
#[derive(Debug, Clone)]
pub struct SoulLink {
    to: ViewId,
}

impl SoulLink {
    #[must_use]
    pub const fn new(to: ViewId) -> Self {
        Self { to }
    }
}

impl Detector for SoulLink {
    fn observe(&mut self, _input: &Input, cx: &mut Context<'_>) -> Result<()> {
        cx.go_to(&self.to)?;
        reveal_questions(cx);
        Ok(())
    }
}

/// Opens the payment view and moves the support widget shortly after.
#[derive(Debug, Clone)]
pub struct YesLink {
    to: ViewId,
}

impl YesLink {
    #[must_use]
    pub const fn new(to: ViewId) -> Self {
        Self { to }
    }
}

impl Detector for YesLink {
    fn observe(&mut self, _input: &Input, cx: &mut Context<'_>) -> Result<()> {
        cx.go_to(&self.to)?;
        cx.schedule(WIDGET_DELAY, Timer::PlaceWidget);
        Ok(())
    }
}

/// Any payment amount: glitch, then the void.
#[derive(Debug, Clone)]
pub struct PaymentButton {
    to: ViewId,
}

impl PaymentButton {
    #[must_use]
    pub const fn new(to: ViewId) -> Self {
        Self { to }
    }
}

impl Detector for PaymentButton {
    fn observe(&mut self, input: &Input, cx: &mut Context<'_>) -> Result<()> {
        if let Input::Click {
            target: Some(Target::PaymentButton(amount)),
            ..
        } = input
        {
            tracing::debug!(amount, "payment chosen");
        }
        cx.flash(Effect::Glitch, PAYMENT_GLITCH);
        cx.schedule(PAYMENT_GLITCH, Timer::Navigate(self.to.clone()));
        Ok(())
    }
}

/// Flips a question card to its answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionCard;

impl Detector for QuestionCard {
    fn observe(&mut self, input: &Input, cx: &mut Context<'_>) -> Result<()> {
        if let Input::Click {
            target: Some(Target::Question(index)),
            ..
        } = input
        {
            cx.emit(Action::RevealAnswer { index: *index });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::random::ScriptedRandom;
    use crate::detectors::harness::{Harness, HOME, OTHER, PRIZE};

    fn click(target: Target) -> Input {
        Input::Click {
            target: Some(target),
            modifier: false,
        }
    }

    #[test]
    fn test_entry_gate_ignores_early_clicks() {
        let mut harness = Harness::new();
        let mut gate = EntryGate::new(PRIZE, Duration::from_secs(2));
        harness.start(&mut gate).unwrap();

        harness.feed(&mut gate, 1_999, click(Target::EntryPage)).unwrap();
        assert_eq!(harness.active(), &HOME);

        harness.feed(&mut gate, 2_000, click(Target::EntryPage)).unwrap();
        assert!(gate.is_unlocked());
        assert_eq!(harness.active(), &PRIZE);
    }

    #[test]
    fn test_random_link_uses_rng() {
        let mut harness = Harness::with_rng(ScriptedRandom::new().with_indices([1]));
        let mut link = RandomLink::new(vec![PRIZE, OTHER]);
        harness.feed(&mut link, 0, click(Target::ThatLink)).unwrap();
        assert_eq!(harness.active(), &OTHER);
    }

    #[test]
    fn test_back_link_on_empty_history_is_noop() {
        let mut harness = Harness::new();
        let mut back = BackLink;
        harness.feed(&mut back, 0, click(Target::DontLink)).unwrap();
        assert_eq!(harness.active(), &HOME);
        assert!(harness.actions.is_empty());
    }

    #[test]
    fn test_soul_link_schedules_staggered_reveal() {
        let mut harness = Harness::new();
        let mut soul = SoulLink::new(PRIZE);
        harness.feed(&mut soul, 0, click(Target::SoulLink)).unwrap();

        assert_eq!(harness.active(), &PRIZE);
        assert!(harness.actions.contains(&Action::ClearQuestions));
        assert_eq!(harness.scheduler.pending(), QUESTION_COUNT);

        let fired: Vec<_> = std::iter::from_fn(|| harness.scheduler.pop_due(u64::MAX)).collect();
        assert_eq!(fired.first().map(|(_, t)| t), Some(&Timer::RevealQuestion(0)));
        assert_eq!(fired.last().map(|(_, t)| t), Some(&Timer::RevealQuestion(19)));
        assert_eq!(harness.scheduler.now(), 1_900);
    }

    #[test]
    fn test_payment_glitches_then_navigates() {
        let mut harness = Harness::new();
        let mut pay = PaymentButton::new(OTHER);
        harness.feed(&mut pay, 0, click(Target::PaymentButton(5))).unwrap();

        assert_eq!(harness.active(), &HOME, "navigation waits for the glitch");
        assert_eq!(
            harness.actions,
            vec![Action::ApplyEffect { effect: Effect::Glitch, duration_ms: 300 }]
        );
        let fired: Vec<_> = std::iter::from_fn(|| harness.scheduler.pop_due(300).map(|(_, t)| t)).collect();
        assert_eq!(fired, vec![Timer::EffectEnd(Effect::Glitch), Timer::Navigate(OTHER)]);
    }

    #[test]
    fn test_question_card_reveals_its_answer() {
        let mut harness = Harness::new();
        let mut card = QuestionCard;
        harness.feed(&mut card, 0, click(Target::Question(7))).unwrap();
        assert_eq!(harness.actions, vec![Action::RevealAnswer { index: 7 }]);
    }
}
