//! Keystroke codeword recognizer.
//!
//! Each matcher owns one sliding character window and an ordered list of
//! codewords. After every keystroke the codewords are tested in declaration
//! order; the first one found anywhere in the window wins, the window is
//! cleared, and the codeword's reaction runs.

use super::{Context, Detector, DetectorBuffer, Input};
use crate::domain::{Effect, Result, ViewId};
use std::time::Duration;

/// What a codeword does once recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    Navigate(ViewId),
    Effect { effect: Effect, duration: Duration },
}

/// A codeword and its reaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codeword {
    pub word: &'static str,
    pub reaction: Reaction,
}

impl Codeword {
    #[must_use]
    pub const fn navigate(word: &'static str, view: ViewId) -> Self {
        Self {
            word,
            reaction: Reaction::Navigate(view),
        }
    }

    #[must_use]
    pub const fn effect(word: &'static str, effect: Effect, duration: Duration) -> Self {
        Self {
            word,
            reaction: Reaction::Effect { effect, duration },
        }
    }
}

/// Sliding-window matcher over typed characters.
#[derive(Debug, Clone)]
pub struct CodewordMatcher {
    buffer: DetectorBuffer<char>,
    words: Vec<Codeword>,
}

impl CodewordMatcher {
    #[must_use]
    pub fn new(capacity: usize, words: Vec<Codeword>) -> Self {
        Self {
            buffer: DetectorBuffer::new(capacity),
            words,
        }
    }

    #[must_use]
    pub fn buffered(&self) -> String {
        self.buffer.text()
    }
}

impl Detector for CodewordMatcher {
    fn observe(&mut self, input: &Input, cx: &mut Context<'_>) -> Result<()> {
        let Input::Key(c) = input else {
            return Ok(());
        };
        self.buffer.push(*c);

        let Some(hit) = self.words.iter().find(|w| self.buffer.contains_word(w.word)) else {
            return Ok(());
        };

        tracing::debug!(word = hit.word, "codeword recognized");
        self.buffer.clear();
        match &hit.reaction {
            Reaction::Navigate(view) => cx.go_to(view),
            Reaction::Effect { effect, duration } => {
                cx.flash(*effect, *duration);
                Ok(())
            }
        }
    }
}
