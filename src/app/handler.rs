//! Event routing.
//!
//! Hosts stamp every event with the current time in milliseconds since the
//! engine started. [`handle_event`] first fires every timer due at or before
//! that instant, then routes the event itself:
//!
//! - keystrokes edit the focused field, then feed the key recognizers
//! - clicks trigger the submit button when they hit it, then feed every click row
//! - pointer enter/leave feed the hover rows; pointer moves update the cursor
//! - submission replies go to the submission flow
//!
//! Handling never fails; handler errors are recorded as faults on the engine.

use super::scheduler::Millis;
use super::state::Engine;
use super::Action;
use crate::detectors::Input;
use crate::domain::{Field, Target};
use crate::submission::SubmissionReply;

/// Host input, translated from whatever the host surface reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Time passed; nothing else happened.
    Tick,
    /// A character-producing keystroke.
    Key(char),
    Backspace,
    Enter,
    /// A click on `target`, or on nothing.
    Click {
        target: Option<Target>,
        modifier: bool,
    },
    PointerEnter(Target),
    PointerLeave(Target),
    PointerMove,
    SubmissionCompleted(SubmissionReply),
}

/// Processes one event at `now` and returns whether anything changed plus the
/// actions to execute, in order.
pub fn handle_event(engine: &mut Engine, now: Millis, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event = ?event, now).entered();

    let mut actions = Vec::new();
    engine.run_timers(now, &mut actions);

    match event {
        Event::Tick => {}
        Event::Key(c) => {
            engine.edit_field(&mut actions, |text| text.push(*c));
            engine.dispatch(&Input::Key(*c), &mut actions);
        }
        Event::Backspace => {
            engine.edit_field(&mut actions, |text| {
                text.pop();
            });
        }
        Event::Enter => match engine.focused_field() {
            Some(Field::Search) => engine.search(&mut actions),
            Some(Field::Email) => engine.submit_email(&mut actions),
            None => {}
        },
        Event::Click { target, modifier } => {
            if *target == Some(Target::SubmitEmail) {
                engine.submit_email(&mut actions);
            }
            engine.dispatch(
                &Input::Click {
                    target: *target,
                    modifier: *modifier,
                },
                &mut actions,
            );
        }
        Event::PointerEnter(target) => engine.dispatch(&Input::PointerEnter(*target), &mut actions),
        Event::PointerLeave(target) => engine.dispatch(&Input::PointerLeave(*target), &mut actions),
        Event::PointerMove => engine.pointer_moved(&mut actions),
        Event::SubmissionCompleted(reply) => engine.complete_submission(reply, &mut actions),
    }

    let should_render = !actions.is_empty();
    tracing::trace!(actions = actions.len(), active = %engine.active_view(), "event handled");
    (should_render, actions)
}
