//! ANSI terminal implementation of [`RenderSurface`].
//!
//! [`TerminalSurface`] accumulates the state the engine pushes into it and
//! lays out the active view on demand. Every frame also rebuilds a hit map so
//! the host can translate a mouse position back into a [`Target`].
//!
//! # Layout
//!
//! Blocks are stacked one per row, centred both ways. Question cards and a
//! placed support widget are positioned absolutely, in percent of the pane.
//! Effects are applied to the finished frame:
//!
//! - `Glitch`: glyph noise on every drawn segment
//! - `Invert`: reverse video
//! - `Rotate`: rows and columns mirrored
//! - `MatrixRain`: falling characters in empty rows
//! - `ErrorFlash`: red underline on the email field

use super::helpers::{centered_column, clip, corrupt, mirror, percent_of, position_cursor};
use super::surface::RenderSurface;
use super::theme::Theme;
use crate::app::catalog::{ANSWERS, QUESTIONS};
use crate::app::ViewRegistry;
use crate::domain::{Block, Effect, Field, Target, Tint, ViewId};
use std::collections::{BTreeMap, BTreeSet};

const INPUT_WIDTH: usize = 28;
const WIDGET_LABEL: &str = "( support the void )";
const RAIN: [char; 12] = ['0', '1', ' ', 'h', 'e', 'l', '.', 'c', 'o', 'm', '-', '↓'];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FieldState {
    text: String,
    placeholder: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Card {
    left_pct: u8,
    top_pct: u8,
    answered: bool,
}

/// A clickable span of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub row: usize,
    pub start: usize,
    pub end: usize,
    pub target: Target,
}

#[derive(Debug, Clone)]
struct Segment {
    col: usize,
    text: String,
    style: String,
    target: Option<Target>,
}

#[derive(Debug)]
pub struct TerminalSurface {
    theme: Theme,
    active: Option<ViewId>,
    effects: BTreeSet<Effect>,
    title: String,
    tint: Tint,
    search: FieldState,
    email: FieldState,
    questions: BTreeMap<usize, Card>,
    widget: Option<(u8, u8)>,
    cursor_hidden: bool,
    hits: Vec<Hit>,
    backdrop: Option<Target>,
}

impl TerminalSurface {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            active: None,
            effects: BTreeSet::new(),
            title: String::new(),
            tint: Tint::default(),
            search: FieldState::default(),
            email: FieldState::default(),
            questions: BTreeMap::new(),
            widget: None,
            cursor_hidden: false,
            hits: Vec::new(),
            backdrop: None,
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&ViewId> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }

    #[must_use]
    pub const fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    /// Hit map of the last rendered frame.
    #[must_use]
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// Target under `(row, col)` in the last rendered frame, falling back to
    /// the view's backdrop.
    #[must_use]
    pub fn hit_test(&self, row: usize, col: usize) -> Option<Target> {
        self.hits
            .iter()
            .find(|hit| hit.row == row && (hit.start..hit.end).contains(&col))
            .map(|hit| hit.target)
            .or(self.backdrop)
    }

    fn field(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Search => &mut self.search,
            Field::Email => &mut self.email,
        }
    }

    /// Lays out the active view into an ANSI frame of `rows` x `cols`.
    pub fn render(&mut self, registry: &ViewRegistry, rows: usize, cols: usize) -> String {
        self.hits.clear();
        self.backdrop = None;
        if rows == 0 || cols == 0 {
            return String::new();
        }
        let mut grid: Vec<Vec<Segment>> = vec![Vec::new(); rows];

        if let Some(surface) = self.active.as_ref().and_then(|id| registry.resolve(id).ok()) {
            self.backdrop = surface.backdrop;
            let lines: Vec<Segment> = surface
                .blocks
                .iter()
                .filter_map(|block| self.block_segment(block, cols))
                .collect();

            let top = rows.saturating_sub(lines.len()) / 2;
            for (offset, segment) in lines.into_iter().enumerate() {
                if let Some(row) = grid.get_mut(top + offset) {
                    row.push(segment);
                }
            }
            if surface.blocks.contains(&Block::QuestionField) {
                self.place_cards(&mut grid, rows, cols);
            }
            if surface.blocks.contains(&Block::PaymentWidget) {
                if let Some((top_pct, left_pct)) = self.widget {
                    let row = percent_of(top_pct, rows);
                    let col = percent_of(left_pct, cols).saturating_sub(WIDGET_LABEL.len() / 2);
                    grid[row].push(Segment {
                        col,
                        text: WIDGET_LABEL.to_string(),
                        style: Theme::fg(&self.theme.colors.hotspot),
                        target: None,
                    });
                }
            }
        }

        if self.has_effect(Effect::MatrixRain) {
            self.rain(&mut grid, cols);
        }
        if self.has_effect(Effect::Glitch) {
            for segment in grid.iter_mut().flatten() {
                segment.text = corrupt(&segment.text, 3);
            }
        }
        if self.has_effect(Effect::Rotate) {
            grid.reverse();
            for segment in grid.iter_mut().flatten() {
                let len = segment.text.chars().count();
                segment.col = cols.saturating_sub(segment.col + len);
                segment.text = mirror(&segment.text);
            }
        }

        self.compose(grid, cols)
    }

    /// One stacked row for `block`, or `None` for absolutely-placed blocks.
    fn block_segment(&self, block: &Block, cols: usize) -> Option<Segment> {
        let colors = &self.theme.colors;
        let (text, style, target) = match block {
            Block::Heading(text) => ((*text).to_string(), format!("{}{}", Theme::bold(), Theme::fg(&colors.heading)), None),
            Block::Text(text) => ((*text).to_string(), Theme::fg(&colors.text), None),
            Block::Whisper(text) => ((*text).to_string(), format!("{}{}", Theme::dim(), Theme::fg(&colors.whisper)), None),
            Block::Link { label, target } => (
                (*label).to_string(),
                format!("{}{}", Theme::underline(), Theme::fg(&colors.link)),
                Some(*target),
            ),
            Block::Hotspot { label, target } => ((*label).to_string(), Theme::fg(&colors.hotspot), Some(*target)),
            Block::Input(field) => self.input_segment(*field),
            Block::Blank => (String::new(), String::new(), None),
            Block::PaymentWidget if self.widget.is_none() => {
                (WIDGET_LABEL.to_string(), Theme::fg(&colors.hotspot), None)
            }
            Block::PaymentWidget | Block::QuestionField => return None,
        };
        let text = clip(&text, cols);
        Some(Segment {
            col: centered_column(text.chars().count(), cols),
            text,
            style,
            target,
        })
    }

    fn input_segment(&self, field: Field) -> (String, String, Option<Target>) {
        let colors = &self.theme.colors;
        let state = match field {
            Field::Search => &self.search,
            Field::Email => &self.email,
        };
        let underline = if field == Field::Email && self.has_effect(Effect::ErrorFlash) {
            &colors.error
        } else {
            &colors.underline
        };

        let (shown, color) = match (&state.placeholder, state.text.is_empty()) {
            (Some(placeholder), true) => (placeholder.as_str(), &colors.placeholder),
            _ => (state.text.as_str(), &colors.input),
        };
        // Long input scrolls: keep the tail visible.
        let skip = shown.chars().count().saturating_sub(INPUT_WIDTH);
        let shown: String = shown.chars().skip(skip).collect();
        let text = format!("{shown:<width$}", width = INPUT_WIDTH);
        let style = format!(
            "{}{}{}",
            Theme::underline(),
            Theme::underline_color(underline),
            Theme::fg(color)
        );
        (text, style, None)
    }

    fn place_cards(&self, grid: &mut [Vec<Segment>], rows: usize, cols: usize) {
        let colors = &self.theme.colors;
        for (&index, card) in &self.questions {
            let (text, color) = if card.answered {
                (ANSWERS.get(index), &colors.answer)
            } else {
                (QUESTIONS.get(index), &colors.text)
            };
            let Some(text) = text else { continue };
            let text = clip(text, cols);
            let len = text.chars().count();
            let row = percent_of(card.top_pct, rows);
            let col = percent_of(card.left_pct, cols).min(cols.saturating_sub(len));
            grid[row].push(Segment {
                col,
                text,
                style: Theme::fg(color),
                target: Some(Target::Question(index)),
            });
        }
    }

    fn rain(&self, grid: &mut [Vec<Segment>], cols: usize) {
        let style = Theme::fg(&self.theme.colors.matrix);
        for (row, segments) in grid.iter_mut().enumerate() {
            if !segments.is_empty() {
                continue;
            }
            for k in 0..(cols / 12).max(1) {
                let col = (row * 7 + k * 13) % cols;
                segments.push(Segment {
                    col,
                    text: RAIN[(row + k) % RAIN.len()].to_string(),
                    style: style.clone(),
                    target: None,
                });
            }
        }
    }

    /// Writes the grid row by row and records the hit map.
    fn compose(&mut self, grid: Vec<Vec<Segment>>, cols: usize) -> String {
        let mut out = String::new();
        out.push_str(if self.cursor_hidden { "\u{1b}[?25l" } else { "\u{1b}[?25h" });
        let base = format!(
            "{}{}",
            Theme::bg_tint(self.tint),
            if self.has_effect(Effect::Invert) { Theme::reverse() } else { "" }
        );

        for (row, mut segments) in grid.into_iter().enumerate() {
            position_cursor(&mut out, row + 1, 1);
            out.push_str(&base);
            segments.sort_by_key(|segment| segment.col);

            let mut cursor = 0;
            for segment in segments {
                let start = segment.col.max(cursor);
                if start >= cols {
                    break;
                }
                let text = clip(&segment.text, cols - start);
                let len = text.chars().count();
                out.push_str(&" ".repeat(start - cursor));
                out.push_str(&segment.style);
                out.push_str(&text);
                out.push_str(Theme::reset());
                out.push_str(&base);
                if let Some(target) = segment.target {
                    self.hits.push(Hit {
                        row,
                        start,
                        end: start + len,
                        target,
                    });
                }
                cursor = start + len;
            }
            out.push_str(&" ".repeat(cols.saturating_sub(cursor)));
            out.push_str(Theme::reset());
        }
        out
    }
}

impl RenderSurface for TerminalSurface {
    fn set_active(&mut self, view: &ViewId, active: bool) {
        if active {
            self.active = Some(view.clone());
        } else if self.active.as_ref() == Some(view) {
            self.active = None;
        }
    }

    fn apply_transient_effect(&mut self, effect: Effect, _duration_ms: u64) {
        self.effects.insert(effect);
    }

    fn clear_effect(&mut self, effect: Effect) {
        self.effects.remove(&effect);
    }

    fn set_display_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    fn set_ambient_tint(&mut self, tint: Tint) {
        self.tint = tint;
    }

    fn set_field_text(&mut self, field: Field, text: &str) {
        text.clone_into(&mut self.field(field).text);
    }

    fn set_placeholder(&mut self, field: Field, text: Option<&str>) {
        self.field(field).placeholder = text.map(str::to_string);
    }

    fn clear_questions(&mut self) {
        self.questions.clear();
    }

    fn show_question(&mut self, index: usize, left_pct: u8, top_pct: u8) {
        self.questions.insert(
            index,
            Card {
                left_pct,
                top_pct,
                answered: false,
            },
        );
    }

    fn reveal_answer(&mut self, index: usize) {
        if let Some(card) = self.questions.get_mut(&index) {
            card.answered = true;
        }
    }

    fn place_widget(&mut self, top_pct: u8, left_pct: u8) {
        self.widget = Some((top_pct, left_pct));
    }

    fn set_cursor_hidden(&mut self, hidden: bool) {
        self.cursor_hidden = hidden;
    }
}
