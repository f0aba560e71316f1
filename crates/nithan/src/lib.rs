//! Nithan - illustrated, narrated Thai bedtime stories.
//!
//! Nithan turns a one-line story idea into a short illustrated story: a
//! generated script, one illustration per scene and narrated audio, played
//! back scene by scene with Thai or English subtitles.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nithan::{Action, Capabilities, NithanConfig, StoryMode, Studio};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NithanConfig::load()?;
//!     let mut studio = Studio::from_config(&Capabilities::from_env(), &config)?;
//!
//!     studio.dispatch(Action::SetPrompt("มังกรน้อยกลัวความมืด".into()));
//!     studio.dispatch(Action::SetMode(StoryMode::Medium));
//!     studio.generate().await;
//!
//!     if let Some(story) = studio.state().current_story() {
//!         println!("{}: {} scenes", story.title, story.scenes.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry span export to stdout
//!
//! # Architecture
//!
//! Nithan is organized as a workspace with focused crates:
//!
//! - `nithan_error` - Error types
//! - `nithan_core` - Story model and narration decoding
//! - `nithan_interface` - `StoryBackend` and `KeyValueStore` traits
//! - `nithan_config` - Layered configuration and startup capabilities
//! - `nithan_models` - Gemini implementation of `StoryBackend`
//! - `nithan_story` - Orchestrator, studio state and session history
//! - `nithan_storage` - Token store, data URLs and story export
//! - `nithan_auth` - Sign-in session
//!
//! This crate re-exports everything for convenience and hosts the `nithan`
//! command-line front end.

pub use nithan_auth::*;
pub use nithan_config::*;
pub use nithan_core::*;
pub use nithan_error::*;
pub use nithan_interface::*;
pub use nithan_models::*;
pub use nithan_storage::*;
pub use nithan_story::*;

pub mod cli;

// OpenTelemetry observability module
#[cfg(feature = "observability")]
pub mod observability;
