//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the nithan
//! binary. The terminal stands in for the browser front end: status and
//! progress are printed as lines, and a story "plays" by printing its scenes
//! and exporting its media.

mod auth;
mod commands;
mod context;
mod generate;
mod render;
mod repl;

pub use auth::{handle_login, handle_logout, handle_whoami};
pub use commands::{Cli, Commands, GenerateArgs};
pub use context::Context;
pub use generate::run_generate;
pub use render::{dashboard, progress_line, setup_notice, story_listing, voices_listing};
pub use repl::{ReplCommand, run_studio};
