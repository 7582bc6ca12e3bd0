//! Voidgate: a Zellij plugin hosting a covert-trigger narrative.
//!
//! The visitor browses a handful of terse pages. A few links are overt; most
//! of the experience hides behind covert triggers: typed codewords, a morse
//! rhythm clicked on empty space, a logo clicked three times, a warning
//! shift-clicked five times, a logo hovered for ten seconds, and a small
//! chance every minute of being pulled somewhere else for a moment.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Engine
//! │  - Event routing, virtual-time scheduler            │
//! │  - Navigation state machine                         │
//! │  - Ambient effects, search box                      │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Detectors     │   │ Submission    │   │ UI Layer      │
//! │ (detectors/)  │   │ (submission/) │   │ (ui/)         │
//! │ - Codewords   │   │ - Validation  │   │ - Surface API │
//! │ - Morse, hover│   │ - HTTP reply  │   │ - ANSI layout │
//! │ - Counters    │   │ - Masking     │   │ - Theming     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Views, targets, effects, errors (domain/)        │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - OpenTelemetry tracing (observability/)           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is pure: it never reads a clock, never sleeps and never touches
//! the network. The host stamps each event with the current time and carries
//! out the [`Action`]s it returns, including HTTP submissions whose results
//! come back as events.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/voidgate.wasm" {
//!         submit_url "https://example.com/api/submit-email"
//!         mystery_chance "0.02"
//!         glitch_chance "0.05"
//!         seed "1995"
//!         theme_file "~/.config/voidgate/red.toml"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use voidgate::{handle_event, initialize, Config, Event};
//!
//! let config = Config { seed: Some(7), ..Config::default() };
//! let mut engine = initialize(&config)?;
//! engine.start(0);
//!
//! for c in "hell".chars() {
//!     handle_event(&mut engine, 10, &Event::Key(c));
//! }
//! assert_eq!(engine.active_view().as_str(), "access-page");
//! # Ok::<(), voidgate::NarrativeError>(())
//! ```

pub mod app;
pub mod detectors;
pub mod domain;
pub mod infrastructure;
pub mod submission;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Engine, Event, Settings};
pub use domain::{NarrativeError, Result};
pub use ui::{TerminalSurface, Theme};

use app::random::{RandomSource, StdRandom};
use std::collections::BTreeMap;

pub const DEFAULT_SUBMIT_URL: &str = "http://localhost:3000/api/submit-email";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Endpoint receiving `POST { "email": ... }`.
    pub submit_url: String,

    /// Probability of a mystery detour per minute, in `[0, 1]`.
    pub mystery_chance: f64,

    /// Probability of a glitch flash every ten seconds, in `[0, 1]`.
    pub glitch_chance: f64,

    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,

    /// Path to a custom TOML palette. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing level. Options: `trace`, `debug`, `info`, `warn`, `error`.
    /// Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            submit_url: DEFAULT_SUBMIT_URL.to_string(),
            mystery_chance: settings.mystery_chance,
            glitch_chance: settings.glitch_chance,
            seed: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unparsable values fall back to their defaults; probabilities are
    /// clamped into `[0, 1]`.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use voidgate::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("mystery_chance".to_string(), "4".to_string());
    /// map.insert("seed".to_string(), "not a number".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.mystery_chance, 1.0);
    /// assert_eq!(config.seed, None);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let probability = |key: &str, default: f64| {
            config
                .get(key)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|p| !p.is_nan())
                .map_or(default, |p| p.clamp(0.0, 1.0))
        };

        Self {
            submit_url: config
                .get("submit_url")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.submit_url),
            mystery_chance: probability("mystery_chance", defaults.mystery_chance),
            glitch_chance: probability("glitch_chance", defaults.glitch_chance),
            seed: config.get("seed").and_then(|s| s.trim().parse().ok()),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            mystery_chance: self.mystery_chance,
            glitch_chance: self.glitch_chance,
        }
    }

    /// The configured palette, or the built-in one if none is set or it
    /// fails to load.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(Theme::default, |file| {
            let path = infrastructure::expand_tilde(file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        })
    }

    fn random_source(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(StdRandom::seeded(seed)),
            None => Box::new(StdRandom::from_entropy()),
        }
    }
}

/// Builds an engine with the built-in catalog and the configured settings.
///
/// The engine is not started; call [`Engine::start`] once the host is ready
/// to receive actions.
///
/// # Errors
///
/// Returns a programming error if the built-in catalog is inconsistent.
pub fn initialize(config: &Config) -> Result<Engine> {
    tracing::debug!(seeded = config.seed.is_some(), "initializing voidgate");
    Engine::new(config.settings(), config.random_source())
}
