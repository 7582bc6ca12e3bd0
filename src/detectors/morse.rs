//! Click-rhythm decoder.
//!
//! The gap between consecutive clicks becomes a symbol: under
//! [`DOT_THRESHOLD`] a dot, otherwise a dash. A gap of [`IDLE_THRESHOLD`] or
//! more throws the sequence away and the click starts a new one. The very
//! first click has no predecessor and only seeds the timestamp.

use super::{Context, Detector, DetectorBuffer, Input};
use crate::app::scheduler::Millis;
use crate::domain::{Result, ViewId};
use std::fmt;

pub const DOT_THRESHOLD: Millis = 300;
pub const IDLE_THRESHOLD: Millis = 2_000;
pub const CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    /// Classifies an inter-click gap already known to be under the idle threshold.
    #[must_use]
    pub const fn from_gap(gap: Millis) -> Self {
        if gap < DOT_THRESHOLD {
            Self::Dot
        } else {
            Self::Dash
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dot => ".",
            Self::Dash => "-",
        })
    }
}

/// `... --- ...`
pub const SOS: [Symbol; 9] = {
    use Symbol::{Dash, Dot};
    [Dot, Dot, Dot, Dash, Dash, Dash, Dot, Dot, Dot]
};

#[derive(Debug, Clone)]
pub struct MorseDecoder {
    pattern: Vec<Symbol>,
    target: ViewId,
    symbols: DetectorBuffer<Symbol>,
    last_click: Option<Millis>,
}

impl MorseDecoder {
    #[must_use]
    pub fn new(pattern: &[Symbol], target: ViewId) -> Self {
        Self {
            pattern: pattern.to_vec(),
            target,
            symbols: DetectorBuffer::new(CAPACITY),
            last_click: None,
        }
    }

    /// Decoder for the distress signal.
    #[must_use]
    pub fn sos(target: ViewId) -> Self {
        Self::new(&SOS, target)
    }

    /// Symbols decoded so far, e.g. `"...-"`.
    #[must_use]
    pub fn decoded(&self) -> String {
        self.symbols.iter().map(ToString::to_string).collect()
    }
}

impl Detector for MorseDecoder {
    fn observe(&mut self, input: &Input, cx: &mut Context<'_>) -> Result<()> {
        if !matches!(input, Input::Click { .. }) {
            return Ok(());
        }
        let now = cx.now();
        let Some(previous) = self.last_click.replace(now) else {
            return Ok(());
        };

        let gap = now.saturating_sub(previous);
        if gap >= IDLE_THRESHOLD {
            self.symbols.clear();
            return Ok(());
        }

        self.symbols.push(Symbol::from_gap(gap));
        if self.symbols.matches_exactly(&self.pattern) {
            tracing::debug!(pattern = %self.decoded(), "click rhythm matched");
            self.symbols.clear();
            return cx.go_to(&self.target);
        }
        Ok(())
    }
}
