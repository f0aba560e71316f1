//! Tests for the generation pipeline.

mod test_utils;

use nithan_core::{StoryConfig, StoryData, StoryMode, VoiceGender, VoiceTone};
use nithan_error::{GeminiErrorKind, NithanErrorKind, StoryErrorKind};
use nithan_story::{Action, GenerationOutcome, StoryOrchestrator};
use test_utils::{CLIP_SAMPLES, MockBackend, MockBehavior, MockCall, audio_context, story};
use tokio_util::sync::CancellationToken;

fn orchestrator(backend: &MockBackend) -> StoryOrchestrator<MockBackend> {
    StoryOrchestrator::new(backend.clone(), audio_context())
}

fn config(mode: StoryMode) -> StoryConfig {
    StoryConfig::builder().duration(mode).build().unwrap()
}

#[tokio::test]
async fn test_completed_story_is_aligned() {
    let backend = MockBackend::new_success(5);
    let mut events = Vec::new();

    let outcome = orchestrator(&backend)
        .generate(
            "rabbit",
            config(StoryMode::Short),
            &CancellationToken::new(),
            &mut events,
        )
        .await;

    let item = match outcome {
        GenerationOutcome::Completed(item) => item,
        other => panic!("expected a completed story, got {other:?}"),
    };
    let story = item.story_data();
    assert_eq!(story.config, Some(config(StoryMode::Short)));
    assert_eq!(item.media().len(), 5);
    for (scene, media) in story.scenes.iter().zip(item.media()) {
        assert_eq!(media.text, scene.story_text);
        assert_eq!(media.text_en, scene.english_translation);
        assert!(media.image_url.starts_with("data:image/png;base64,"));
        assert_eq!(media.audio.samples.len(), CLIP_SAMPLES);
        assert_eq!(media.audio.sample_rate, 24_000);
    }
    assert_eq!(backend.script_calls(), 1);
    assert_eq!(backend.long_script_calls(), 0);
    assert_eq!(backend.image_calls(), 5);
    assert_eq!(backend.audio_calls(), 5);
}

#[tokio::test]
async fn test_events_follow_scene_order() {
    let backend = MockBackend::new_success(3);
    let mut events = Vec::new();

    orchestrator(&backend)
        .generate(
            "rabbit",
            config(StoryMode::Short),
            &CancellationToken::new(),
            &mut events,
        )
        .await;

    assert_eq!(events.len(), 2 + 2 * 3);
    assert_eq!(
        events[0],
        Action::GenerationStarted {
            mode: StoryMode::Short
        }
    );
    assert_eq!(
        events[1],
        Action::ScriptReady {
            title: "กระต่ายน้อยผจญภัย".into()
        }
    );
    for scene in 1..=3 {
        match &events[2 * scene] {
            Action::SceneStarted {
                index,
                total,
                preview,
            } => {
                assert_eq!((*index, *total), (scene, 3));
                assert_eq!(preview.chars().count(), 20);
            }
            other => panic!("expected scene start, got {other:?}"),
        }
        assert_eq!(
            events[2 * scene + 1],
            Action::SceneCompleted {
                completed: scene,
                total: 3
            }
        );
    }
}

#[tokio::test]
async fn test_long_modes_use_the_chaptered_script() {
    let backend = MockBackend::new_success(3);

    let outcome = orchestrator(&backend)
        .generate(
            "dragon",
            config(StoryMode::MegaLong),
            &CancellationToken::new(),
            &mut Vec::new(),
        )
        .await;

    // Scene count outside the mode's range is tolerated.
    assert!(matches!(outcome, GenerationOutcome::Completed(_)));
    assert_eq!(backend.long_script_calls(), 1);
    assert_eq!(backend.script_calls(), 0);
}

#[tokio::test]
async fn test_empty_prompt_makes_no_requests() {
    let backend = MockBackend::new_success(3);
    let mut events = Vec::new();

    let outcome = orchestrator(&backend)
        .generate(
            "  \n ",
            config(StoryMode::Short),
            &CancellationToken::new(),
            &mut events,
        )
        .await;

    assert!(matches!(outcome, GenerationOutcome::Rejected));
    assert_eq!(backend.total_calls(), 0);
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_cancel_before_start() {
    let backend = MockBackend::new_success(3);
    let token = CancellationToken::new();
    token.cancel();
    let mut events = Vec::new();

    let outcome = orchestrator(&backend)
        .generate("rabbit", config(StoryMode::Short), &token, &mut events)
        .await;

    assert!(matches!(outcome, GenerationOutcome::Cancelled));
    assert_eq!(backend.total_calls(), 0);
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_cancel_mid_run_stops_before_next_scene() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    let backend = MockBackend::new_success(4).on_call(move |call| {
        if call == MockCall::Image(1) {
            trigger.cancel();
        }
    });
    let mut events = Vec::new();

    let outcome = orchestrator(&backend)
        .generate("rabbit", config(StoryMode::Short), &token, &mut events)
        .await;

    assert!(matches!(outcome, GenerationOutcome::Cancelled));
    // Scene 2's requests finish in the background; scene 3 never starts.
    assert_eq!(backend.image_calls(), 2);
    assert_eq!(backend.audio_calls(), 2);
    assert!(events.contains(&Action::SceneCompleted {
        completed: 1,
        total: 4
    }));
    assert!(!events.contains(&Action::SceneCompleted {
        completed: 2,
        total: 4
    }));
}

#[tokio::test]
async fn test_cancel_after_script_skips_media() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    let backend = MockBackend::new_success(4).on_call(move |call| {
        if call == MockCall::Script {
            trigger.cancel();
        }
    });

    let outcome = orchestrator(&backend)
        .generate("rabbit", config(StoryMode::Medium), &token, &mut Vec::new())
        .await;

    assert!(matches!(outcome, GenerationOutcome::Cancelled));
    assert_eq!(backend.image_calls(), 0);
    assert_eq!(backend.audio_calls(), 0);
}

#[tokio::test]
async fn test_failure_during_cancel_counts_as_cancelled() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    let backend = MockBackend::new_with_behavior(story(3), MockBehavior::FailImageAt(1))
        .on_call(move |call| {
            if call == MockCall::Image(1) {
                trigger.cancel();
            }
        });

    let outcome = orchestrator(&backend)
        .generate("rabbit", config(StoryMode::Short), &token, &mut Vec::new())
        .await;

    assert!(matches!(outcome, GenerationOutcome::Cancelled));
}

#[tokio::test]
async fn test_media_failure_fails_the_whole_run() {
    let backend = MockBackend::new_with_behavior(story(4), MockBehavior::FailImageAt(2));
    let mut events = Vec::new();

    let outcome = orchestrator(&backend)
        .generate(
            "rabbit",
            config(StoryMode::Short),
            &CancellationToken::new(),
            &mut events,
        )
        .await;

    let err = match outcome {
        GenerationOutcome::Failed(err) => err,
        other => panic!("expected failure, got {other:?}"),
    };
    match err.kind() {
        NithanErrorKind::Gemini(e) => assert!(matches!(
            e.kind,
            GeminiErrorKind::MissingInlineData { .. }
        )),
        other => panic!("expected gemini error, got {other}"),
    }
    // No scene after the failing one is attempted.
    assert_eq!(backend.image_calls(), 3);
    assert!(!events.contains(&Action::SceneCompleted {
        completed: 3,
        total: 4
    }));
}

#[tokio::test]
async fn test_audio_failure_fails_the_run() {
    let backend = MockBackend::new_with_behavior(story(2), MockBehavior::FailAudioAt(0));

    let outcome = orchestrator(&backend)
        .generate(
            "rabbit",
            config(StoryMode::Short),
            &CancellationToken::new(),
            &mut Vec::new(),
        )
        .await;

    assert!(matches!(outcome, GenerationOutcome::Failed(_)));
    assert_eq!(backend.image_calls(), 1);
}

#[tokio::test]
async fn test_undecodable_narration_is_an_audio_error() {
    let backend = MockBackend::new_with_behavior(story(2), MockBehavior::GarbledAudio);

    let outcome = orchestrator(&backend)
        .generate(
            "rabbit",
            config(StoryMode::Short),
            &CancellationToken::new(),
            &mut Vec::new(),
        )
        .await;

    let err = match outcome {
        GenerationOutcome::Failed(err) => err,
        other => panic!("expected failure, got {other:?}"),
    };
    assert!(matches!(err.kind(), NithanErrorKind::Audio(_)));
}

#[tokio::test]
async fn test_script_failure_makes_no_media_requests() {
    let backend = MockBackend::new_with_behavior(
        story(3),
        MockBehavior::FailScript(GeminiErrorKind::HttpError {
            status_code: 503,
            message: "overloaded".into(),
        }),
    );

    let outcome = orchestrator(&backend)
        .generate(
            "rabbit",
            config(StoryMode::Short),
            &CancellationToken::new(),
            &mut Vec::new(),
        )
        .await;

    assert!(matches!(outcome, GenerationOutcome::Failed(_)));
    assert_eq!(backend.image_calls() + backend.audio_calls(), 0);
}

#[tokio::test]
async fn test_empty_scripts_are_rejected() {
    for (script, expect_title) in [
        (StoryData::new("  ", story(2).scenes), true),
        (StoryData::new("Rabbit", Vec::new()), false),
    ] {
        let backend = MockBackend::new_with_behavior(script, MockBehavior::Succeed);
        let outcome = orchestrator(&backend)
            .generate(
                "rabbit",
                config(StoryMode::Short),
                &CancellationToken::new(),
                &mut Vec::new(),
            )
            .await;

        let err = match outcome {
            GenerationOutcome::Failed(err) => err,
            other => panic!("expected failure, got {other:?}"),
        };
        let NithanErrorKind::Story(e) = err.kind() else {
            panic!("expected story error, got {}", err);
        };
        if expect_title {
            assert_eq!(e.kind, StoryErrorKind::EmptyTitle);
        } else {
            assert_eq!(e.kind, StoryErrorKind::NoScenes("Rabbit".into()));
        }
        assert_eq!(backend.image_calls(), 0);
    }
}

#[tokio::test]
async fn test_scene_image_and_audio_run_concurrently() {
    let backend = MockBackend::new_success(3);

    orchestrator(&backend)
        .generate(
            "rabbit",
            config(StoryMode::Short),
            &CancellationToken::new(),
            &mut Vec::new(),
        )
        .await;

    // Image and narration overlap, but scenes never do.
    assert_eq!(backend.max_in_flight(), 2);
}

#[tokio::test]
async fn test_narration_uses_the_mapped_voice() {
    let backend = MockBackend::new_success(2);
    let config = StoryConfig::builder()
        .voice_gender(VoiceGender::Male)
        .voice_tone(VoiceTone::Energetic)
        .build()
        .unwrap();

    orchestrator(&backend)
        .generate("rabbit", config, &CancellationToken::new(), &mut Vec::new())
        .await;

    assert_eq!(backend.voices(), vec!["Fenrir", "Fenrir"]);
}
