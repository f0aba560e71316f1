//! Trait definitions for generation backends and local state.

use async_trait::async_trait;
use nithan_core::{StoryData, StoryMode};
use nithan_error::NithanResult;

/// A generative service able to produce everything a story needs.
///
/// Every operation resolves with complete data or fails; partial or
/// streamed responses are not modeled. Implementations must not retry.
#[async_trait]
pub trait StoryBackend: Send + Sync {
    /// Writes a script for short and medium stories in a single request.
    ///
    /// The returned story has no config attached.
    async fn generate_story_script(&self, prompt: &str, mode: StoryMode)
    -> NithanResult<StoryData>;

    /// Writes a script for long and mega-long stories.
    ///
    /// Implementations may split the work across several requests, but the
    /// scenes come back as one ordered sequence.
    async fn generate_long_story_script(
        &self,
        prompt: &str,
        mode: StoryMode,
    ) -> NithanResult<StoryData>;

    /// Draws one scene illustration, returned as a `data:` URL.
    async fn generate_scene_image(&self, image_prompt: &str) -> NithanResult<String>;

    /// Narrates `text` with the prebuilt voice `voice_name`.
    ///
    /// Returns base64-encoded 16-bit little-endian PCM.
    async fn generate_scene_audio(&self, text: &str, voice_name: &str) -> NithanResult<String>;

    /// Provider name (e.g., "gemini", "mock").
    fn provider_name(&self) -> &'static str;
}

/// String key/value storage that outlives the process.
///
/// Used for the identity token only.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value, `None` when the key is absent.
    fn get(&self, key: &str) -> NithanResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> NithanResult<()>;

    /// Removes a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> NithanResult<()>;
}
