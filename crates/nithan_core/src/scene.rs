//! Script types produced by the script-generation step.

use crate::StoryConfig;
use serde::{Deserialize, Serialize};

/// One narrative beat with its narration, illustration prompt and effects.
///
/// Field names on the wire are camelCase (`storyText`, `englishTranslation`,
/// ...), matching the structured-output schema sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Narration text in Thai
    pub story_text: String,
    /// English translation of the narration
    #[serde(default)]
    pub english_translation: String,
    /// Prompt for the scene illustration
    pub image_prompt: String,
    /// Visual effect hint for the player (e.g. "zoom-in")
    #[serde(default)]
    pub visual_effect: String,
    /// Sound effect hint for the player (e.g. "birds")
    #[serde(default)]
    pub sound_effect: String,
}

/// A generated script: title plus ordered scenes.
///
/// Scene order is playback order. The config is attached once, after the
/// script comes back from the model.
///
/// # Examples
///
/// ```
/// use nithan_core::{Scene, StoryConfig, StoryData};
///
/// let story = StoryData::new("กระต่ายน้อย", vec![Scene {
///     story_text: "กาลครั้งหนึ่ง".into(),
///     english_translation: "Once upon a time".into(),
///     image_prompt: "a small rabbit in a candy town".into(),
///     visual_effect: "zoom-in".into(),
///     sound_effect: "birds".into(),
/// }]);
///
/// assert!(story.config.is_none());
/// let story = story.with_config(StoryConfig::default());
/// assert!(story.config.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoryData {
    /// Story title
    pub title: String,
    /// Scenes in playback order
    pub scenes: Vec<Scene>,
    /// Options the story was generated with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<StoryConfig>,
}

impl StoryData {
    /// Creates a script without a config attached.
    pub fn new(title: impl Into<String>, scenes: Vec<Scene>) -> Self {
        Self {
            title: title.into(),
            scenes,
            config: None,
        }
    }

    /// Attaches the generation config.
    pub fn with_config(mut self, config: StoryConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Whether the script has a non-blank title and at least one scene.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.scenes.is_empty()
    }
}
