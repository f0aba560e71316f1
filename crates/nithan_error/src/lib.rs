//! Error types for the Nithan story studio.
//!
//! This crate provides the error types shared by every Nithan crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use nithan_error::{NithanResult, HttpError};
//!
//! fn fetch_script() -> NithanResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_script() {
//!     Ok(script) => println!("Got: {}", script),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audio;
mod auth;
mod builder;
mod config;
mod error;
mod gemini;
mod http;
mod json;
mod storage;
mod story;

pub use audio::{AudioError, AudioErrorKind};
pub use auth::{AuthError, AuthErrorKind};
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{NithanError, NithanErrorKind, NithanResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
pub use story::{StoryError, StoryErrorKind};
