//! `voyago` - navigation core for a trip-tracking app.
//!
//! Routes, their flat token codec, and the navigator that turns intents into
//! back stack operations. The `shell` module hosts a navigator over text
//! input, standing in for the mobile UI.

pub mod cli;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod route;
pub mod shell;

pub use config::Config;
pub use navigation::{BackStack, Intent, Navigator, Resolution, StackOp};
pub use route::{Route, RouteError, TripId, TripMode};
