//! Story configuration chosen in the creation form.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Coarse length/format selector.
///
/// The mode drives which script-generation strategy is used and how many
/// scenes the script should contain.
///
/// # Examples
///
/// ```
/// use nithan_core::StoryMode;
///
/// let mode: StoryMode = "mega_long".parse().unwrap();
/// assert!(mode.is_long());
/// assert_eq!(mode.to_string(), "mega_long");
/// assert!(!StoryMode::Medium.is_long());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StoryMode {
    /// Shorts, about 40 seconds
    #[default]
    Short,
    /// About one minute
    Medium,
    /// Podcast, about five minutes
    Long,
    /// Audiobook, about thirty minutes
    MegaLong,
}

impl StoryMode {
    /// Whether this mode uses the long-narrative script path.
    pub fn is_long(self) -> bool {
        matches!(self, StoryMode::Long | StoryMode::MegaLong)
    }

    /// Number of scenes the script for this mode should contain.
    ///
    /// ```
    /// use nithan_core::StoryMode;
    ///
    /// assert!(StoryMode::MegaLong.scene_range().start() > StoryMode::Long.scene_range().end());
    /// ```
    pub fn scene_range(self) -> RangeInclusive<usize> {
        match self {
            StoryMode::Short => 4..=6,
            StoryMode::Medium => 6..=8,
            StoryMode::Long => 12..=16,
            StoryMode::MegaLong => 30..=40,
        }
    }

    /// Label shown in the duration selector.
    pub fn label(self) -> &'static str {
        match self {
            StoryMode::Short => "Shorts (40s)",
            StoryMode::Medium => "Medium (1m)",
            StoryMode::Long => "Podcast (5m)",
            StoryMode::MegaLong => "Audiobook (30m)",
        }
    }
}

/// Narrator gender.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VoiceGender {
    /// Male narrator
    Male,
    /// Female narrator
    #[default]
    Female,
}

/// Narration tone.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VoiceTone {
    /// Gentle bedtime delivery
    #[default]
    Soft,
    /// Excited, lively delivery
    Energetic,
    /// Low, resonant delivery
    Deep,
    /// Newsreader-style delivery
    Formal,
}

/// Subtitle language.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubtitleLang {
    /// Thai narration text
    #[default]
    Th,
    /// English translation
    En,
}

/// Options a story was generated with.
///
/// Immutable once attached to a [`StoryData`](crate::StoryData).
///
/// # Examples
///
/// ```
/// use nithan_core::{StoryConfig, StoryMode, VoiceTone};
///
/// let config = StoryConfig::builder()
///     .duration(StoryMode::Long)
///     .voice_tone(VoiceTone::Deep)
///     .bgm_enabled(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(*config.duration(), StoryMode::Long);
/// assert!(!*config.bgm_enabled());
/// assert!(*config.default_show_subtitles()); // default
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[serde(rename_all = "camelCase")]
#[builder(default)]
pub struct StoryConfig {
    /// Duration mode
    duration: StoryMode,
    /// Narrator gender
    voice_gender: VoiceGender,
    /// Narration tone
    voice_tone: VoiceTone,
    /// Whether background music plays under narration
    bgm_enabled: bool,
    /// Whether subtitles start visible
    default_show_subtitles: bool,
    /// Initial subtitle language
    default_subtitle_lang: SubtitleLang,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            duration: StoryMode::default(),
            voice_gender: VoiceGender::default(),
            voice_tone: VoiceTone::default(),
            bgm_enabled: true,
            default_show_subtitles: true,
            default_subtitle_lang: SubtitleLang::default(),
        }
    }
}

impl StoryConfig {
    /// Creates a new config builder.
    pub fn builder() -> StoryConfigBuilder {
        StoryConfigBuilder::default()
    }
}
