//! Core data types for the Nithan story studio.
//!
//! This crate provides the story model shared by the generation client, the
//! orchestrator and the front ends, plus the narration audio decoder.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audio;
mod config;
mod media;
mod scene;
mod user;

pub use audio::{AudioBuffer, AudioContext, DEFAULT_SAMPLE_RATE, decode_audio_data};
pub use config::{
    StoryConfig, StoryConfigBuilder, StoryMode, SubtitleLang, VoiceGender, VoiceTone,
};
pub use media::{GeneratedSceneMedia, HistoryItem};
pub use scene::{Scene, StoryData};
pub use user::UserProfile;
