//! Configuration for the Nithan story studio.
//!
//! Two kinds of settings live here:
//! - [`NithanConfig`]: model names, audio layout and session storage, loaded
//!   from TOML with user overrides layered over bundled defaults.
//! - [`Capabilities`]: secrets read from the environment once at startup.
//!   They gate whether generation and sign-in are offered at all.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capabilities;
mod config;

pub use capabilities::Capabilities;
pub use config::{AudioConfig, GeminiConfig, NithanConfig, SessionConfig};
