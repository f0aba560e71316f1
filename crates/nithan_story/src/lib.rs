//! Story generation for the Nithan story studio.
//!
//! This crate turns a prompt into a finished story and keeps the studio's
//! application state:
//!
//! - [`StoryOrchestrator`]: script, then image + narration per scene, with
//!   progress events and cooperative cancellation
//! - [`StudioState`] and [`update`]: the application state and its single
//!   transition function over the closed [`Action`] set
//! - [`SessionHistory`]: newest-first list of finished stories for replay
//! - [`Studio`]: runs the orchestrator while feeding its events through the
//!   reducer
//!
//! # Example
//!
//! ```no_run
//! use nithan_config::{Capabilities, NithanConfig};
//! use nithan_story::{Action, Studio};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NithanConfig::load()?;
//! let mut studio = Studio::from_config(&Capabilities::from_env(), &config)?;
//!
//! studio.dispatch(Action::SetPrompt("กระต่ายน้อยผจญภัยในเมืองขนม".into()));
//! let state = studio.generate().await;
//! println!("{state}: {}", studio.state().status());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod history;
pub mod messages;
mod orchestrator;
mod state;
mod studio;

pub use history::{DashboardSummary, SessionHistory};
pub use orchestrator::{EventSink, GenerationOutcome, StoryOrchestrator};
pub use state::{Action, AppState, DraftForm, StudioState, View, scene_progress, update};
pub use studio::{CancelHandle, Studio};
