//! Actions representing side effects to be executed by the host.
//!
//! The engine never touches the render surface or the network directly. Every
//! event it handles yields a `Vec<Action>` that the host executes in order:
//! surface mutations go to a [`RenderSurface`](crate::ui::RenderSurface), and
//! [`Action::Submit`] goes to the submission capability.
//!
//! # Example
//!
//! ```rust
//! use voidgate::app::Action;
//! use voidgate::domain::ViewId;
//!
//! let actions = vec![
//!     Action::SetActive { view: ViewId::from_static("entry-page"), active: false },
//!     Action::SetActive { view: ViewId::from_static("main-page"), active: true },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::domain::{Effect, Field, Tint, ViewId};
use crate::submission::SubmissionRequest;

/// Commands produced by the engine and executed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Toggle the "active" marker of one view.
    ///
    /// Navigation always emits a deactivation of the previous view followed by
    /// an activation of the next, so at most one view is active at a time.
    SetActive { view: ViewId, active: bool },

    /// Start a transient effect. Hosts that animate may use `duration_ms`; the
    /// engine also emits a matching [`Action::ClearEffect`] when it elapses.
    ApplyEffect { effect: Effect, duration_ms: u64 },

    /// End a transient effect.
    ClearEffect(Effect),

    /// Replace the display title.
    SetTitle(String),

    /// Replace the ambient background tint.
    SetTint(Tint),

    /// Replace the text of an input field.
    SetFieldText { field: Field, text: String },

    /// Show or clear a field placeholder.
    SetPlaceholder { field: Field, text: Option<String> },

    /// Remove every question card.
    ClearQuestions,

    /// Show a question card at a position given in percent of the surface.
    ShowQuestion { index: usize, left_pct: u8, top_pct: u8 },

    /// Replace a question card's text with its answer.
    RevealAnswer { index: usize },

    /// Move the floating support widget, in percent of the surface.
    PlaceWidget { top_pct: u8, left_pct: u8 },

    /// Hide or show the pointer.
    SetCursorHidden(bool),

    /// Send an email address to the submission capability.
    ///
    /// The outcome comes back later as
    /// [`Event::SubmissionCompleted`](crate::app::Event::SubmissionCompleted).
    Submit(SubmissionRequest),
}
