//! Small text-layout helpers shared by the renderer.
//!
//! Widths are measured in `char`s; the catalog only uses single-width text.

use std::fmt::Write;

/// Appends a cursor move to `(row, col)`, both 1-indexed.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Column (0-indexed) at which `len` characters sit centred in `cols`.
#[must_use]
pub const fn centered_column(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}

/// Cuts `text` to at most `max` characters.
#[must_use]
pub fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Row or column (0-indexed) for a percentage of `extent`, kept inside it.
#[must_use]
pub fn percent_of(pct: u8, extent: usize) -> usize {
    let raw = usize::from(pct.min(100)) * extent / 100;
    raw.min(extent.saturating_sub(1))
}

/// Deterministic noise for the glitch effect: swaps every `stride`-th
/// non-space character for a block glyph.
#[must_use]
pub fn corrupt(text: &str, stride: usize) -> String {
    const NOISE: [char; 4] = ['░', '▒', '▓', '█'];
    let stride = stride.max(1);
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            if c != ' ' && i % stride == 0 {
                NOISE[i % NOISE.len()]
            } else {
                c
            }
        })
        .collect()
}

/// Reverses a line character by character, for the upside-down effect.
#[must_use]
pub fn mirror(text: &str) -> String {
    text.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_column() {
        assert_eq!(centered_column(4, 10), 3);
        assert_eq!(centered_column(20, 10), 0);
    }

    #[test]
    fn test_percent_of_stays_in_bounds() {
        assert_eq!(percent_of(50, 80), 40);
        assert_eq!(percent_of(100, 80), 79);
        assert_eq!(percent_of(10, 0), 0);
    }

    #[test]
    fn test_corrupt_keeps_length_and_spaces() {
        let noisy = corrupt("a b c d", 2);
        assert_eq!(noisy.chars().count(), 7);
        assert_eq!(noisy.chars().nth(1), Some(' '));
        assert_ne!(noisy, "a b c d");
    }

    #[test]
    fn test_clip_and_mirror() {
        assert_eq!(clip("void", 2), "vo");
        assert_eq!(mirror("void"), "diov");
    }
}
