//! Terminal presentation of the engine's actions.
//!
//! The engine never draws anything itself. It emits [`Action`](crate::app::Action)s;
//! [`present`] applies each one to a [`RenderSurface`], and the host asks the
//! [`TerminalSurface`] for a frame whenever Zellij wants one:
//!
//! ```text
//! Event → handle_event → [Action] → present → TerminalSurface → render → ANSI
//! ```
//!
//! # Modules
//!
//! - [`surface`]: The render surface contract and action dispatch
//! - [`renderer`]: ANSI layout, effects and hit testing
//! - [`helpers`]: Shared layout utilities
//! - [`theme`]: Palette loading and escape sequences

pub mod helpers;
pub mod renderer;
pub mod surface;
pub mod theme;

pub use renderer::{Hit, TerminalSurface};
pub use surface::{present, RenderSurface};
pub use theme::Theme;
