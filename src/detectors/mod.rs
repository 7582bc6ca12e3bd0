//! Input recognizers and the registration table that wires them to inputs.
//!
//! Every listener in the experience, overt link or covert trigger, is one row
//! of a registration table: `{ input kind, predicate, handler }`. The engine
//! walks the table in declaration order for every input, calling each handler
//! whose kind and predicate accept it. Handlers are independent of each
//! other; the only thing they share is the [`Context`] capability to request
//! transitions and arm timers.
//!
//! # Recognizers
//!
//! - [`codeword`]: sliding text buffers matched against codewords
//! - [`morse`]: click-rhythm decoder (dot/dash by inter-click gap)
//! - [`hover`]: dwell timer on one hover target
//! - [`counter`]: click counters, with or without an idle window
//! - [`chance`]: periodic, probability-gated mystery round trip
//! - [`links`]: overt links and buttons
//!
//! # Example
//!
//! ```rust
//! use voidgate::detectors::{Input, InputKind, Registration};
//! use voidgate::detectors::counter::ClickCounter;
//! use voidgate::domain::{Target, ViewId};
//!
//! let row = Registration::new(
//!     "logo-triple-click",
//!     InputKind::Click,
//!     |input| matches!(input, Input::Click { target: Some(Target::Logo), .. }),
//!     ClickCounter::with_idle_reset(3, std::time::Duration::from_secs(1), ViewId::from_static("secret-2")),
//! );
//! assert_eq!(row.name(), "logo-triple-click");
//! ```

pub mod buffer;
pub mod chance;
pub mod codeword;
pub mod counter;
pub mod hover;
pub mod links;
pub mod morse;

pub use crate::app::context::Context;
pub use buffer::DetectorBuffer;

use crate::app::scheduler::TimerId;
use crate::app::timers::HandlerTimer;
use crate::domain::{Result, Target};
use std::fmt;

/// Raw input as seen by handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A character-producing keystroke.
    Key(char),
    /// A click, on a target or on empty surface.
    Click {
        target: Option<Target>,
        /// A modifier key was held during the click.
        modifier: bool,
    },
    PointerEnter(Target),
    PointerLeave(Target),
}

/// Coarse input stream a handler subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Key,
    Click,
    /// Pointer enter and leave.
    Pointer,
    /// No input stream; driven only by its own timers.
    Clock,
}

impl Input {
    #[must_use]
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Key(_) => InputKind::Key,
            Self::Click { .. } => InputKind::Click,
            Self::PointerEnter(_) | Self::PointerLeave(_) => InputKind::Pointer,
        }
    }
}

/// A recognizer or link handler.
pub trait Detector: fmt::Debug {
    /// Called once when the engine starts.
    ///
    /// # Errors
    ///
    /// Returns an error if initial wiring fails.
    fn start(&mut self, _cx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Called for every input accepted by the row's kind and predicate.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested transition fails.
    fn observe(&mut self, input: &Input, cx: &mut Context<'_>) -> Result<()>;

    /// Called when one of this handler's timers fires.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested transition fails.
    fn on_timer(&mut self, _kind: HandlerTimer, _id: TimerId, _cx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }
}

/// Predicate deciding whether a row sees an input.
pub type Predicate = fn(&Input) -> bool;

/// One row of the registration table.
pub struct Registration {
    name: &'static str,
    kind: InputKind,
    predicate: Predicate,
    detector: Box<dyn Detector>,
}

impl Registration {
    pub fn new(
        name: &'static str,
        kind: InputKind,
        predicate: Predicate,
        detector: impl Detector + 'static,
    ) -> Self {
        Self {
            name,
            kind,
            predicate,
            detector: Box::new(detector),
        }
    }

    /// Row driven only by its own timers.
    pub fn clock(name: &'static str, detector: impl Detector + 'static) -> Self {
        Self::new(name, InputKind::Clock, |_| false, detector)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> InputKind {
        self.kind
    }

    /// Whether this row handles `input`.
    #[must_use]
    pub fn accepts(&self, input: &Input) -> bool {
        self.kind == input.kind() && (self.predicate)(input)
    }

    pub fn detector_mut(&mut self) -> &mut dyn Detector {
        self.detector.as_mut()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("detector", &self.detector)
            .finish_non_exhaustive()
    }
}

/// Predicate accepting clicks on exactly `target`.
#[must_use]
pub fn clicked(input: &Input, target: Target) -> bool {
    matches!(input, Input::Click { target: Some(t), .. } if *t == target)
}

/// Predicate accepting pointer enter/leave on exactly `target`.
#[must_use]
pub fn pointed(input: &Input, target: Target) -> bool {
    matches!(input, Input::PointerEnter(t) | Input::PointerLeave(t) if *t == target)
}
