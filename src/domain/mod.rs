//! Domain layer: views, interactive targets, effects and errors.
//!
//! These types carry no behaviour beyond small helpers and are independent of
//! Zellij and of the engine. Every other layer speaks in them.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`view`]: View identifiers and page layouts
//! - [`target`]: Clickable targets, text fields, transient effects, tint

pub mod error;
pub mod target;
pub mod view;

pub use error::{NarrativeError, Result};
pub use target::{Effect, Field, Target, Tint};
pub use view::{Block, Surface, View, ViewId};
