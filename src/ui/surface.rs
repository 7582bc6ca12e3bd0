//! Render surface contract and action presentation.

use crate::app::Action;
use crate::domain::{Effect, Field, Tint, ViewId};
use crate::submission::SubmissionRequest;

/// Everything the engine can ask of a display.
///
/// All calls are synchronous and idempotent. Only the first five are
/// essential; the rest default to no-ops for surfaces without fields,
/// question cards, a support widget or a pointer.
pub trait RenderSurface {
    fn set_active(&mut self, view: &ViewId, active: bool);
    fn apply_transient_effect(&mut self, effect: Effect, duration_ms: u64);
    fn clear_effect(&mut self, effect: Effect);
    fn set_display_title(&mut self, title: &str);
    fn set_ambient_tint(&mut self, tint: Tint);

    fn set_field_text(&mut self, _field: Field, _text: &str) {}
    fn set_placeholder(&mut self, _field: Field, _text: Option<&str>) {}
    fn clear_questions(&mut self) {}
    fn show_question(&mut self, _index: usize, _left_pct: u8, _top_pct: u8) {}
    fn reveal_answer(&mut self, _index: usize) {}
    fn place_widget(&mut self, _top_pct: u8, _left_pct: u8) {}
    fn set_cursor_hidden(&mut self, _hidden: bool) {}
}

/// Applies one action to `surface`.
///
/// Returns the request for [`Action::Submit`], which is the host's business
/// rather than the surface's.
pub fn present<'a, S>(action: &'a Action, surface: &mut S) -> Option<&'a SubmissionRequest>
where
    S: RenderSurface + ?Sized,
{
    match action {
        Action::SetActive { view, active } => surface.set_active(view, *active),
        Action::ApplyEffect { effect, duration_ms } => surface.apply_transient_effect(*effect, *duration_ms),
        Action::ClearEffect(effect) => surface.clear_effect(*effect),
        Action::SetTitle(title) => surface.set_display_title(title),
        Action::SetTint(tint) => surface.set_ambient_tint(*tint),
        Action::SetFieldText { field, text } => surface.set_field_text(*field, text),
        Action::SetPlaceholder { field, text } => surface.set_placeholder(*field, text.as_deref()),
        Action::ClearQuestions => surface.clear_questions(),
        Action::ShowQuestion {
            index,
            left_pct,
            top_pct,
        } => surface.show_question(*index, *left_pct, *top_pct),
        Action::RevealAnswer { index } => surface.reveal_answer(*index),
        Action::PlaceWidget { top_pct, left_pct } => surface.place_widget(*top_pct, *left_pct),
        Action::SetCursorHidden(hidden) => surface.set_cursor_hidden(*hidden),
        Action::Submit(request) => return Some(request),
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the essential calls only.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl RenderSurface for Recorder {
        fn set_active(&mut self, view: &ViewId, active: bool) {
            self.calls.push(format!("active {view} {active}"));
        }
        fn apply_transient_effect(&mut self, effect: Effect, duration_ms: u64) {
            self.calls.push(format!("effect {effect:?} {duration_ms}"));
        }
        fn clear_effect(&mut self, effect: Effect) {
            self.calls.push(format!("clear {effect:?}"));
        }
        fn set_display_title(&mut self, title: &str) {
            self.calls.push(format!("title {title}"));
        }
        fn set_ambient_tint(&mut self, tint: Tint) {
            self.calls.push(format!("tint {}", tint.to_hex()));
        }
    }

    #[test]
    fn test_present_maps_actions_to_calls() {
        let mut surface = Recorder::default();
        let actions = [
            Action::SetActive { view: ViewId::from_static("void-page"), active: true },
            Action::ApplyEffect { effect: Effect::Glitch, duration_ms: 300 },
            Action::SetTint(Tint::rgb(1, 0, 0)),
            Action::ClearQuestions,
        ];
        for action in &actions {
            assert!(present(action, &mut surface).is_none());
        }
        assert_eq!(
            surface.calls,
            vec!["active void-page true", "effect Glitch 300", "tint #010000"]
        );
    }

    #[test]
    fn test_present_hands_submissions_back() {
        let mut surface = Recorder::default();
        let action = Action::Submit(SubmissionRequest::new(4, "a@b"));
        let request = present(&action, &mut surface).unwrap();
        assert_eq!(request.request_id, 4);
        assert!(surface.calls.is_empty());
    }
}
