//! Generative service client for Nithan.
//!
//! [`GeminiClient`] implements [`StoryBackend`](nithan_interface::StoryBackend)
//! against the Gemini REST API: structured-output story scripts, scene
//! illustrations and prebuilt-voice narration.
//!
//! # Example
//!
//! ```no_run
//! use nithan_config::{Capabilities, NithanConfig};
//! use nithan_core::StoryMode;
//! use nithan_interface::StoryBackend;
//! use nithan_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NithanConfig::load()?;
//! let client = GeminiClient::from_capabilities(&Capabilities::from_env(), config.gemini)?;
//! let story = client
//!     .generate_story_script("กระต่ายน้อยผจญภัยในเมืองขนม", StoryMode::Short)
//!     .await?;
//! println!("{}: {} scenes", story.title, story.scenes.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod voice;

pub use gemini::{
    Candidate, Content, GeminiClient, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, InlineData, Part, PrebuiltVoiceConfig, SpeechConfig, VoiceConfig,
    chapter_plan, strip_code_fences,
};
pub use voice::{map_voice_config, voice_table};
