use nithan_core::{VoiceGender, VoiceTone};
use nithan_models::{map_voice_config, voice_table};
use std::collections::HashSet;

#[test]
fn every_combination_has_a_distinct_voice() {
    let table = voice_table();
    assert_eq!(table.len(), 8);

    let voices: HashSet<_> = table.iter().map(|(_, _, voice)| *voice).collect();
    assert_eq!(voices.len(), 8);
}

#[test]
fn mapping_is_deterministic() {
    for (gender, tone, voice) in voice_table() {
        assert_eq!(map_voice_config(gender, tone), voice);
    }
}

#[test]
fn known_voices() {
    assert_eq!(map_voice_config(VoiceGender::Female, VoiceTone::Soft), "Kore");
    assert_eq!(map_voice_config(VoiceGender::Female, VoiceTone::Energetic), "Zephyr");
    assert_eq!(map_voice_config(VoiceGender::Male, VoiceTone::Soft), "Puck");
    assert_eq!(map_voice_config(VoiceGender::Male, VoiceTone::Formal), "Orus");
}

#[test]
fn table_is_gender_major() {
    let table = voice_table();
    assert!(table[..4].iter().all(|(g, _, _)| *g == VoiceGender::Male));
    assert!(table[4..].iter().all(|(g, _, _)| *g == VoiceGender::Female));
}
