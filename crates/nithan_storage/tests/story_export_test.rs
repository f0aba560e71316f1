use nithan_core::{
    AudioBuffer, GeneratedSceneMedia, HistoryItem, Scene, StoryConfig, StoryData, SubtitleLang,
};
use nithan_storage::{StoryExporter, render_srt};

fn scene(text: &str, text_en: &str) -> Scene {
    Scene {
        story_text: text.to_string(),
        english_translation: text_en.to_string(),
        image_prompt: "a rabbit".to_string(),
        visual_effect: "zoom-in".to_string(),
        sound_effect: "birds".to_string(),
    }
}

fn item() -> HistoryItem {
    let story = StoryData::new("กระต่ายน้อย", vec![scene("หนึ่ง", "One"), scene("สอง", "")])
        .with_config(StoryConfig::default());
    let durations = [36_000usize, 24_000 * 61 + 12];
    let media = story
        .scenes
        .iter()
        .zip(durations)
        .map(|(s, samples)| {
            GeneratedSceneMedia::from_scene(
                s,
                "data:image/png;base64,iVBORw0KGgo=".to_string(),
                AudioBuffer {
                    sample_rate: 24_000,
                    channels: 1,
                    samples: vec![0; samples],
                },
            )
        })
        .collect();
    HistoryItem::new(story, media).unwrap()
}

#[test]
fn test_srt_cues_follow_narration_length() {
    let srt = render_srt(&item(), SubtitleLang::Th);
    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:01,500\nหนึ่ง\n\n\
         2\n00:00:01,500 --> 00:01:02,500\nสอง\n\n"
    );
}

#[test]
fn test_english_srt_falls_back_to_thai() {
    let srt = render_srt(&item(), SubtitleLang::En);
    assert!(srt.contains("\nOne\n"));
    assert!(srt.contains("\nสอง\n"));
}

#[tokio::test]
async fn test_export_writes_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("story");

    let summary = StoryExporter::new(&out).export(&item()).await.unwrap();

    let names: Vec<String> = summary
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "story.json",
            "scene_01.png",
            "scene_01.wav",
            "scene_02.png",
            "scene_02.wav",
            "subtitles.th.srt",
            "subtitles.en.srt",
        ]
    );

    let manifest: serde_json::Value =
        serde_json::from_slice(&std::fs::read(out.join("story.json")).unwrap()).unwrap();
    assert_eq!(manifest["title"], "กระต่ายน้อย");
    assert_eq!(manifest["scenes"][0]["storyText"], "หนึ่ง");
    assert_eq!(manifest["config"]["duration"], "short");

    let wav = std::fs::read(out.join("scene_01.wav")).unwrap();
    assert_eq!(wav.len(), 44 + 36_000 * 2);
    let png = std::fs::read(out.join("scene_01.png")).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[tokio::test]
async fn test_export_rejects_non_data_url_image() {
    let story = StoryData::new("t", vec![scene("a", "A")]);
    let media = vec![GeneratedSceneMedia::from_scene(
        &story.scenes[0],
        "https://example.com/a.png".to_string(),
        AudioBuffer {
            sample_rate: 24_000,
            channels: 1,
            samples: vec![0; 10],
        },
    )];
    let item = HistoryItem::new(story, media).unwrap();

    let dir = tempfile::tempdir().unwrap();
    assert!(StoryExporter::new(dir.path()).export(&item).await.is_err());
}
