//! Trait definitions for the Nithan story studio.
//!
//! This crate holds the seams the rest of the workspace is written against:
//! [`StoryBackend`] for the generative service and [`KeyValueStore`] for the
//! small amount of state kept between runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{KeyValueStore, StoryBackend};
