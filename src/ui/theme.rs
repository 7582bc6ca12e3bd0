//! Palette loading and ANSI escape sequence generation.
//!
//! The built-in palette is `themes/void.toml`. A custom palette can be loaded
//! from any TOML file with the same shape:
//!
//! ```toml
//! name = "my-void"
//!
//! [colors]
//! text = "#b3b3b3"
//! heading = "#ffffff"
//! whisper = "#3a3a3a"
//! link = "#ffffff"
//! hotspot = "#8c8c8c"
//! input = "#ffffff"
//! placeholder = "#555555"
//! underline = "#ffffff"
//! error = "#ff0000"
//! answer = "#999999"
//! matrix = "#00ff00"
//! ```
//!
//! The background is never part of the palette; it follows the ambient tint.

use crate::domain::{NarrativeError, Result, Tint};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUILTIN: &str = include_str!("../../themes/void.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colours (`"#rrggbb"`) for each kind of block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub text: String,
    pub heading: String,
    /// Barely-visible text.
    pub whisper: String,
    pub link: String,
    pub hotspot: String,
    pub input: String,
    pub placeholder: String,
    /// Input underline in its resting state.
    pub underline: String,
    /// Input underline during the error cue.
    pub error: String,
    /// Question cards that show their answer.
    pub answer: String,
    pub matrix: String,
}

impl Theme {
    /// The built-in `void` palette.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::Config`] if the bundled TOML does not parse.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN)
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::Io`] if the file cannot be read and
    /// [`NarrativeError::Config`] if it does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    fn parse(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| NarrativeError::Config(format!("invalid theme: {e}")))
    }

    /// White-on-black palette used when nothing else loads.
    #[must_use]
    pub fn monochrome() -> Self {
        let white = || "#ffffff".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                text: white(),
                heading: white(),
                whisper: "#444444".to_string(),
                link: white(),
                hotspot: white(),
                input: white(),
                placeholder: "#666666".to_string(),
                underline: white(),
                error: "#ff0000".to_string(),
                answer: "#999999".to_string(),
                matrix: "#00ff00".to_string(),
            },
        }
    }

    /// Parses `#rrggbb`; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Underline colour, independent of the text colour.
    #[must_use]
    pub fn underline_color(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[58;2;{r};{g};{b}m")
    }

    /// Background escape for the ambient tint.
    #[must_use]
    pub fn bg_tint(tint: Tint) -> String {
        format!("\u{001b}[48;2;{};{};{}m", tint.r, tint.g, tint.b)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Swaps foreground and background.
    #[must_use]
    pub const fn reverse() -> &'static str {
        "\u{001b}[7m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "built-in palette failed to parse, using monochrome");
            Self::monochrome()
        })
    }
}
