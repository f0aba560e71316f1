//! Generated media and completed-story records.

use crate::{AudioBuffer, Scene, StoryData};
use nithan_error::{NithanResult, StoryError, StoryErrorKind};
use std::time::Duration;

/// Illustration and narration for one scene.
///
/// Paired with its [`Scene`] by index.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSceneMedia {
    /// Illustration as a `data:` URL
    pub image_url: String,
    /// Decoded narration
    pub audio: AudioBuffer,
    /// Narration text (Thai)
    pub text: String,
    /// Narration text (English)
    pub text_en: String,
    /// Visual effect hint
    pub visual_effect: String,
    /// Sound effect hint
    pub sound_effect: String,
}

impl GeneratedSceneMedia {
    /// Builds the media record for `scene`, copying its text and effect hints.
    pub fn from_scene(scene: &Scene, image_url: String, audio: AudioBuffer) -> Self {
        Self {
            image_url,
            audio,
            text: scene.story_text.clone(),
            text_en: scene.english_translation.clone(),
            visual_effect: scene.visual_effect.clone(),
            sound_effect: scene.sound_effect.clone(),
        }
    }
}

/// A completed generation: the script and its aligned media.
///
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    story_data: StoryData,
    media: Vec<GeneratedSceneMedia>,
}

impl HistoryItem {
    /// Pairs a script with its media.
    ///
    /// # Errors
    ///
    /// Fails unless there is exactly one media item per scene and each item
    /// carries its scene's narration text.
    pub fn new(story_data: StoryData, media: Vec<GeneratedSceneMedia>) -> NithanResult<Self> {
        if media.len() != story_data.scenes.len() {
            return Err(StoryError::new(StoryErrorKind::MediaMismatch {
                expected: story_data.scenes.len(),
                actual: media.len(),
            })
            .into());
        }
        if let Some(index) = story_data
            .scenes
            .iter()
            .zip(&media)
            .position(|(scene, item)| scene.story_text != item.text)
        {
            return Err(StoryError::new(StoryErrorKind::SceneTextMismatch(index)).into());
        }
        Ok(Self { story_data, media })
    }

    /// The script.
    pub fn story_data(&self) -> &StoryData {
        &self.story_data
    }

    /// Media in scene order.
    pub fn media(&self) -> &[GeneratedSceneMedia] {
        &self.media
    }

    /// Total narration length.
    pub fn total_duration(&self) -> Duration {
        self.media.iter().map(|m| m.audio.duration()).sum()
    }

    /// Splits the record back into its parts.
    pub fn into_parts(self) -> (StoryData, Vec<GeneratedSceneMedia>) {
        (self.story_data, self.media)
    }
}
