//! Layoutsmith Application
//!
//! The command-line shell around the core editor: replaying recorded input
//! into a stored session, exporting it, and resetting it.

mod app;
pub mod replay;
mod shortcuts;

pub use app::{App, AppConfig, CliError};
pub use replay::{EditorCommand, ReplayEvent, ReplaySummary};
pub use shortcuts::{Shortcut, ShortcutRegistry};
