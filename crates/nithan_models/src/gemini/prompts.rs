//! Prompt templates and structured-output schemas.

use nithan_core::StoryMode;
use serde::Deserialize;
use serde_json::{Value, json};
use std::ops::RangeInclusive;

pub(crate) const STORYTELLER_INSTRUCTION: &str = "You are a Thai children's storyteller. \
Write warm, imaginative, age-appropriate stories in natural Thai. \
Every scene has Thai narration (storyText), a faithful English translation \
(englishTranslation), an English illustration prompt (imagePrompt) that repeats \
the main characters' appearance so illustrations stay consistent, a visual effect \
(visualEffect: one of zoom-in, zoom-out, pan-left, pan-right, fade, none) and an \
ambient sound effect (soundEffect: one of birds, rain, wind, waves, forest, city, \
magic, night, none).";

/// Chapter layout for the long-narrative path: chapter count and scenes per chapter.
///
/// The product of the two stays inside the mode's scene range.
///
/// ```
/// use nithan_core::StoryMode;
/// use nithan_models::chapter_plan;
///
/// let (chapters, per_chapter) = chapter_plan(StoryMode::MegaLong);
/// let range = StoryMode::MegaLong.scene_range();
/// assert!(chapters * per_chapter.start() >= *range.start());
/// assert!(chapters * per_chapter.end() <= *range.end());
/// ```
pub fn chapter_plan(mode: StoryMode) -> (usize, RangeInclusive<usize>) {
    match mode {
        StoryMode::Short | StoryMode::Medium => (1, mode.scene_range()),
        StoryMode::Long => (4, 3..=4),
        StoryMode::MegaLong => (8, 4..=5),
    }
}

pub(crate) fn script_prompt(prompt: &str, mode: StoryMode) -> String {
    let range = mode.scene_range();
    format!(
        "Write a complete bedtime story for this idea: {prompt}\n\n\
         Length: {label}. Use between {min} and {max} scenes. \
         Each scene's storyText is two to four short sentences.\n\
         Return JSON with a Thai title and the ordered scenes.",
        label = mode.label(),
        min = range.start(),
        max = range.end(),
    )
}

pub(crate) fn outline_prompt(prompt: &str, mode: StoryMode) -> String {
    let (chapters, _) = chapter_plan(mode);
    format!(
        "Plan a long story for this idea: {prompt}\n\n\
         Format: {label}. Divide it into exactly {chapters} chapters with a clear \
         beginning, rising adventure and a gentle ending. \
         Return JSON with a Thai title, a one-paragraph English description of the \
         main characters' appearance, and for each chapter a short heading and a \
         two-sentence summary.",
        label = mode.label(),
    )
}

pub(crate) fn chapter_prompt(
    prompt: &str,
    outline: &StoryOutline,
    index: usize,
    scenes: &RangeInclusive<usize>,
) -> String {
    let mut plan = String::new();
    for (i, chapter) in outline.chapters.iter().enumerate() {
        let marker = if i == index { " <= write this one" } else { "" };
        plan.push_str(&format!(
            "{}. {}: {}{}\n",
            i + 1,
            chapter.heading,
            chapter.summary,
            marker
        ));
    }
    format!(
        "Story idea: {prompt}\n\
         Title: {title}\n\
         Characters: {characters}\n\n\
         Chapter plan:\n{plan}\n\
         Write chapter {number} of {total} as between {min} and {max} scenes. \
         Continue directly from the previous chapter; do not recap it. \
         Return JSON with the ordered scenes only.",
        title = outline.title,
        characters = outline.characters,
        number = index + 1,
        total = outline.chapters.len(),
        min = scenes.start(),
        max = scenes.end(),
    )
}

pub(crate) fn illustration_prompt(image_prompt: &str) -> String {
    format!(
        "Children's storybook illustration, soft watercolor, bright friendly colors, \
         16:9 composition, no text or lettering. {image_prompt}"
    )
}

/// Planned outline of a long story.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StoryOutline {
    pub title: String,
    #[serde(default)]
    pub characters: String,
    #[serde(default)]
    pub chapters: Vec<ChapterOutline>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChapterOutline {
    pub heading: String,
    pub summary: String,
}

fn scene_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "storyText": { "type": "STRING" },
            "englishTranslation": { "type": "STRING" },
            "imagePrompt": { "type": "STRING" },
            "visualEffect": { "type": "STRING" },
            "soundEffect": { "type": "STRING" }
        },
        "required": ["storyText", "englishTranslation", "imagePrompt", "visualEffect", "soundEffect"],
        "propertyOrdering": ["storyText", "englishTranslation", "imagePrompt", "visualEffect", "soundEffect"]
    })
}

pub(crate) fn script_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "scenes": { "type": "ARRAY", "items": scene_schema() }
        },
        "required": ["title", "scenes"],
        "propertyOrdering": ["title", "scenes"]
    })
}

pub(crate) fn chapter_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "scenes": { "type": "ARRAY", "items": scene_schema() }
        },
        "required": ["scenes"]
    })
}

pub(crate) fn outline_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "characters": { "type": "STRING" },
            "chapters": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "heading": { "type": "STRING" },
                        "summary": { "type": "STRING" }
                    },
                    "required": ["heading", "summary"]
                }
            }
        },
        "required": ["title", "characters", "chapters"],
        "propertyOrdering": ["title", "characters", "chapters"]
    })
}
