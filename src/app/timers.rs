//! Timer payloads routed by the engine when a deadline elapses.

use crate::domain::{Effect, Field, ViewId};

/// Timers owned by a registered handler; routed back to the handler in `slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerTimer {
    /// Entry view has been visible long enough to accept clicks.
    EntryUnlock,
    /// Pointer dwelled on a hover target for the full duration.
    HoverDwell,
    /// No follow-up click arrived within the idle window.
    ClickIdle,
    /// Periodic ambient-chance roll.
    ChanceTick,
    /// End of a mystery round trip.
    ChanceReturn,
}

/// Periodic cosmetic tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientTimer {
    Title,
    Tint,
    Glitch,
}

/// Everything the scheduler can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timer {
    Handler { slot: usize, kind: HandlerTimer },
    Ambient(AmbientTimer),
    /// Remove a transient effect.
    EffectEnd(Effect),
    /// Clear a field placeholder.
    PlaceholderEnd(Field),
    /// Delayed transition (payment glitch, matrix rain, confirmation hand-off).
    Navigate(ViewId),
    /// Show the question card with this index.
    RevealQuestion(usize),
    /// Move the floating support widget.
    PlaceWidget,
    /// Confirmation view has been shown long enough; continue to the terminal view.
    SubmissionConfirmed,
}
