//! Application layer: the engine, its scheduler, and event routing.
//!
//! ```text
//! host event ─▶ handle_event ─▶ due timers ─▶ registration table ─▶ Navigator
//!                                   │                                  │
//!                                   └──── ambient effects ──────┐      │
//!                                                               ▼      ▼
//!                                                           Vec<Action> ─▶ host
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands returned to the host
//! - [`catalog`]: Built-in views and the registration table
//! - [`context`]: Capability handle given to handlers
//! - [`effects`]: Title, tint and glitch tasks
//! - [`handler`]: Event routing
//! - [`navigation`]: View registry and navigation controller
//! - [`random`]: Injectable randomness
//! - [`scheduler`]: Virtual-time timer queue
//! - [`search`]: Search box queries
//! - [`state`]: The engine aggregate
//! - [`timers`]: Timer payloads
//!
//! # Example
//!
//! ```rust
//! use voidgate::app::{handle_event, Engine, Event, Settings};
//! use voidgate::app::random::StdRandom;
//!
//! let mut engine = Engine::new(Settings::default(), Box::new(StdRandom::seeded(1)))?;
//! engine.start(0);
//! let (_render, actions) = handle_event(&mut engine, 2_500, &Event::Click {
//!     target: Some(voidgate::domain::Target::EntryPage),
//!     modifier: false,
//! });
//! assert!(!actions.is_empty());
//! assert_eq!(engine.active_view().as_str(), "main-page");
//! # Ok::<(), voidgate::NarrativeError>(())
//! ```

pub mod actions;
pub mod catalog;
pub mod context;
pub mod effects;
pub mod handler;
pub mod navigation;
pub mod random;
pub mod scheduler;
pub mod search;
pub mod state;
pub mod timers;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use navigation::{Navigator, ViewRegistry};
pub use scheduler::{Millis, Scheduler};
pub use state::{Engine, Fault, Settings};
