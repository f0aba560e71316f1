//! Narrator voice selection.

use nithan_core::{VoiceGender, VoiceTone};
use strum::IntoEnumIterator;

/// Maps a narrator gender and tone to a Gemini prebuilt voice.
///
/// The mapping is fixed; callers never build voice names themselves.
///
/// ```
/// use nithan_core::{VoiceGender, VoiceTone};
/// use nithan_models::map_voice_config;
///
/// assert_eq!(map_voice_config(VoiceGender::Female, VoiceTone::Soft), "Kore");
/// assert_eq!(map_voice_config(VoiceGender::Male, VoiceTone::Deep), "Charon");
/// ```
pub fn map_voice_config(gender: VoiceGender, tone: VoiceTone) -> &'static str {
    match (gender, tone) {
        (VoiceGender::Male, VoiceTone::Soft) => "Puck",
        (VoiceGender::Male, VoiceTone::Energetic) => "Fenrir",
        (VoiceGender::Male, VoiceTone::Deep) => "Charon",
        (VoiceGender::Male, VoiceTone::Formal) => "Orus",
        (VoiceGender::Female, VoiceTone::Soft) => "Kore",
        (VoiceGender::Female, VoiceTone::Energetic) => "Zephyr",
        (VoiceGender::Female, VoiceTone::Deep) => "Leda",
        (VoiceGender::Female, VoiceTone::Formal) => "Aoede",
    }
}

/// Every (gender, tone, voice) combination, gender-major.
pub fn voice_table() -> Vec<(VoiceGender, VoiceTone, &'static str)> {
    VoiceGender::iter()
        .flat_map(|gender| {
            VoiceTone::iter().map(move |tone| (gender, tone, map_voice_config(gender, tone)))
        })
        .collect()
}
