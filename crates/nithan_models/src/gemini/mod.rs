//! Gemini REST API integration.

mod client;
mod dto;
mod parse;
mod prompts;

pub use client::GeminiClient;
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part, PrebuiltVoiceConfig, SpeechConfig, VoiceConfig,
};
pub use parse::strip_code_fences;
pub use prompts::chapter_plan;
