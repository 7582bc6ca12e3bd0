//! The narrative engine aggregate.
//!
//! [`Engine`] owns everything that changes during a session: the navigator,
//! the scheduler, the registration table, the ambient effects, the submission
//! flow and the two text fields. It is built once, started once, and then
//! driven exclusively through [`handle_event`](super::handle_event).
//!
//! # Fault isolation
//!
//! Every handler call (registered detector, delayed transition, search,
//! submission) runs behind an isolation boundary. An `Err` is logged and
//! recorded as a [`Fault`]; the remaining handlers for the same event still
//! run, and actions produced before the failure are kept.

use super::catalog;
use super::context::Context;
use super::effects::AmbientEffects;
use super::navigation::{Navigator, ViewRegistry};
use super::random::RandomSource;
use super::scheduler::{Millis, Scheduler, TimerId};
use super::search;
use super::timers::Timer;
use super::Action;
use crate::detectors::{Input, InputKind, Registration};
use crate::domain::{Field, NarrativeError, Result, ViewId};
use crate::submission::{Completion, SubmissionFlow, SubmissionReply};
use std::fmt;

/// Slot used for engine-owned callbacks; never matches a registration.
const ENGINE_SLOT: usize = usize::MAX;

/// Tunables handed to the engine at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Probability of the periodic mystery detour.
    pub mystery_chance: f64,
    /// Probability of the periodic glitch flash.
    pub glitch_chance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mystery_chance: 0.02,
            glitch_chance: 0.05,
        }
    }
}

/// A handler error caught at the isolation boundary.
#[derive(Debug)]
pub struct Fault {
    pub handler: &'static str,
    pub error: NarrativeError,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.handler, self.error)
    }
}

fn isolate(faults: &mut Vec<Fault>, handler: &'static str, result: Result<()>) {
    if let Err(error) = result {
        tracing::error_span!("handler_fault", handler).in_scope(|| {
            tracing::error!(error = %error, programming_error = error.is_programming_error(), "handler failed");
        });
        faults.push(Fault { handler, error });
    }
}

pub struct Engine {
    nav: Navigator,
    scheduler: Scheduler,
    registrations: Vec<Registration>,
    ambient: AmbientEffects,
    submission: SubmissionFlow,
    search_text: String,
    email_text: String,
    rng: Box<dyn RandomSource>,
    cursor_hidden: bool,
    started: bool,
    faults: Vec<Fault>,
}

impl Engine {
    /// Engine over the built-in catalog and registration table.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::DuplicateView`] if the catalog is inconsistent.
    pub fn new(settings: Settings, rng: Box<dyn RandomSource>) -> Result<Self> {
        let registry = catalog::build_registry()?;
        let registrations = catalog::default_registrations(&settings);
        Self::from_parts(registry, catalog::ENTRY, registrations, settings, rng)
    }

    /// Engine over a caller-supplied registry and registration table.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::UnknownView`] if `entry` is not registered.
    pub fn from_parts(
        registry: ViewRegistry,
        entry: ViewId,
        registrations: Vec<Registration>,
        settings: Settings,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        Ok(Self {
            nav: Navigator::new(registry, entry)?,
            scheduler: Scheduler::new(),
            registrations,
            ambient: AmbientEffects::new(catalog::TITLES, settings.glitch_chance),
            submission: SubmissionFlow::new(catalog::FINAL, catalog::VOID),
            search_text: String::new(),
            email_text: String::new(),
            rng,
            cursor_hidden: false,
            started: false,
            faults: Vec::new(),
        })
    }

    /// Activates the entry view and arms every handler and ambient timer.
    ///
    /// Calling it again is a no-op.
    pub fn start(&mut self, now: Millis) -> Vec<Action> {
        let mut out = Vec::new();
        if self.started {
            return out;
        }
        self.started = true;
        self.scheduler.advance_to(now);

        tracing::info!(entry = %self.nav.entry(), handlers = self.registrations.len(), "engine starting");
        out.push(Action::SetActive {
            view: self.nav.entry().clone(),
            active: true,
        });

        for (slot, row) in self.registrations.iter_mut().enumerate() {
            let mut cx = Context::new(slot, &mut self.nav, &mut self.scheduler, self.rng.as_mut(), &mut out);
            let result = row.detector_mut().start(&mut cx);
            isolate(&mut self.faults, row.name(), result);
        }
        self.ambient.start(&mut self.scheduler);
        out
    }

    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub const fn active_view(&self) -> &ViewId {
        self.nav.active()
    }

    #[must_use]
    pub fn history(&self) -> &[ViewId] {
        self.nav.history()
    }

    #[must_use]
    pub const fn registry(&self) -> &ViewRegistry {
        self.nav.registry()
    }

    #[must_use]
    pub const fn now(&self) -> Millis {
        self.scheduler.now()
    }

    /// Deadline the host should wake the engine at.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.scheduler.next_deadline()
    }

    /// Drains the faults recorded since the last call.
    pub fn take_faults(&mut self) -> Vec<Fault> {
        std::mem::take(&mut self.faults)
    }

    /// The registration table in evaluation order, as `(name, input kind)`.
    pub fn registrations(&self) -> impl Iterator<Item = (&'static str, InputKind)> + '_ {
        self.registrations.iter().map(|row| (row.name(), row.kind()))
    }

    #[must_use]
    pub fn field_text(&self, field: Field) -> &str {
        match field {
            Field::Search => &self.search_text,
            Field::Email => &self.email_text,
        }
    }

    #[must_use]
    pub const fn cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    /// Direct transition, bypassing the handlers.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::UnknownView`] if `target` is not registered.
    pub fn go_to(&mut self, target: &ViewId) -> Result<Vec<Action>> {
        let mut out = Vec::new();
        self.nav.go_to(target, &mut out)?;
        Ok(out)
    }

    /// Direct return to the previous view; empty when history is empty.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::UnknownView`] if the recorded view no longer resolves.
    pub fn go_back(&mut self) -> Result<Vec<Action>> {
        let mut out = Vec::new();
        self.nav.go_back(&mut out)?;
        Ok(out)
    }

    /// Fires every timer due at or before `now`, in deadline order.
    pub(crate) fn run_timers(&mut self, now: Millis, out: &mut Vec<Action>) {
        while let Some((id, timer)) = self.scheduler.pop_due(now) {
            self.fire(id, timer, out);
        }
        self.scheduler.advance_to(now);
    }

    fn fire(&mut self, id: TimerId, timer: Timer, out: &mut Vec<Action>) {
        match timer {
            Timer::Handler { slot, kind } => {
                let Some(row) = self.registrations.get_mut(slot) else {
                    tracing::debug!(slot, "timer for unknown handler slot");
                    return;
                };
                let mut cx = Context::new(slot, &mut self.nav, &mut self.scheduler, self.rng.as_mut(), out);
                let result = row.detector_mut().on_timer(kind, id, &mut cx);
                isolate(&mut self.faults, row.name(), result);
            }
            Timer::Ambient(task) => {
                self.ambient.on_timer(task, &mut self.scheduler, self.rng.as_mut(), out);
            }
            Timer::EffectEnd(effect) => out.push(Action::ClearEffect(effect)),
            Timer::PlaceholderEnd(field) => out.push(Action::SetPlaceholder { field, text: None }),
            Timer::Navigate(view) => {
                let result = self.nav.go_to(&view, out);
                isolate(&mut self.faults, "delayed-navigation", result);
            }
            Timer::RevealQuestion(index) => {
                let left_pct = self.rng.percent_between(10, 90);
                let top_pct = self.rng.percent_between(10, 90);
                out.push(Action::ShowQuestion { index, left_pct, top_pct });
            }
            Timer::PlaceWidget => {
                let top_pct = self.rng.percent_between(10, 70);
                let left_pct = self.rng.percent_between(20, 80);
                out.push(Action::PlaceWidget { top_pct, left_pct });
            }
            Timer::SubmissionConfirmed => {
                let mut cx = Context::new(ENGINE_SLOT, &mut self.nav, &mut self.scheduler, self.rng.as_mut(), out);
                let result = self.submission.confirmed(id, &mut cx);
                isolate(&mut self.faults, "submission", result);
            }
        }
    }

    /// Offers `input` to every registration whose kind and predicate accept it.
    pub(crate) fn dispatch(&mut self, input: &Input, out: &mut Vec<Action>) {
        for (slot, row) in self.registrations.iter_mut().enumerate() {
            if !row.accepts(input) {
                continue;
            }
            tracing::trace!(handler = row.name(), "dispatching");
            let mut cx = Context::new(slot, &mut self.nav, &mut self.scheduler, self.rng.as_mut(), out);
            let result = row.detector_mut().observe(input, &mut cx);
            isolate(&mut self.faults, row.name(), result);
        }
    }

    /// Text field that keystrokes edit on the active view, if any.
    #[must_use]
    pub fn focused_field(&self) -> Option<Field> {
        let active = self.nav.active();
        if *active == catalog::SEARCH {
            Some(Field::Search)
        } else if *active == catalog::APPLY {
            Some(Field::Email)
        } else {
            None
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Search => &mut self.search_text,
            Field::Email => &mut self.email_text,
        }
    }

    /// Applies `edit` to the focused field and reports the new text.
    pub(crate) fn edit_field(&mut self, out: &mut Vec<Action>, edit: impl FnOnce(&mut String)) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let text = self.field_mut(field);
        edit(text);
        let text = text.clone();
        out.push(Action::SetFieldText { field, text });
    }

    /// Runs the current search query.
    pub(crate) fn search(&mut self, out: &mut Vec<Action>) {
        let mut cx = Context::new(ENGINE_SLOT, &mut self.nav, &mut self.scheduler, self.rng.as_mut(), out);
        let result = search::run_query(&mut self.search_text, &mut cx);
        isolate(&mut self.faults, "search", result);
    }

    /// Submits the email field.
    pub(crate) fn submit_email(&mut self, out: &mut Vec<Action>) {
        let mut cx = Context::new(ENGINE_SLOT, &mut self.nav, &mut self.scheduler, self.rng.as_mut(), out);
        match self.submission.submit(&self.email_text, &mut cx) {
            Ok(request_id) => tracing::debug!(request_id, "submission issued"),
            Err(NarrativeError::ValidationRejected(reason)) => {
                tracing::debug!(reason = %reason, "submission rejected locally");
            }
            Err(error) => isolate(&mut self.faults, "submission", Err(error)),
        }
    }

    /// Applies a reply from the submission capability.
    pub(crate) fn complete_submission(&mut self, reply: &SubmissionReply, out: &mut Vec<Action>) {
        let mut cx = Context::new(ENGINE_SLOT, &mut self.nav, &mut self.scheduler, self.rng.as_mut(), out);
        match self.submission.complete(reply, &mut cx) {
            Ok(Completion::Accepted) => {
                self.email_text.clear();
                out.push(Action::SetFieldText {
                    field: Field::Email,
                    text: String::new(),
                });
            }
            Ok(_) => {}
            Err(error) => isolate(&mut self.faults, "submission", Err(error)),
        }
    }

    /// Shows or hides the pointer for the active view; emits only on change.
    pub(crate) fn pointer_moved(&mut self, out: &mut Vec<Action>) {
        let hidden = catalog::CURSORLESS_VIEWS.contains(self.nav.active());
        if hidden != self.cursor_hidden {
            self.cursor_hidden = hidden;
            out.push(Action::SetCursorHidden(hidden));
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("active", self.nav.active())
            .field("history", &self.nav.history().len())
            .field("now", &self.scheduler.now())
            .field("pending_timers", &self.scheduler.pending())
            .field("handlers", &self.registrations.len())
            .field("faults", &self.faults.len())
            .finish_non_exhaustive()
    }
}
