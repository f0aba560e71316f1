use nithan_core::{StoryMode, SubtitleLang, VoiceGender, VoiceTone};
use nithan_story::messages::{STATUS_ERROR, scene_status, script_status};
use nithan_story::{Action, AppState, DraftForm, StudioState, View, scene_progress, update};

fn generating_media(total: usize) -> StudioState {
    let mut state = StudioState::new();
    update(&mut state, Action::SetPrompt("rabbit".into()));
    assert!(update(
        &mut state,
        Action::GenerationStarted {
            mode: StoryMode::Short
        }
    ));
    assert!(update(
        &mut state,
        Action::ScriptReady {
            title: "Rabbit".into()
        }
    ));
    assert!(update(
        &mut state,
        Action::SceneStarted {
            index: 1,
            total,
            preview: "กาลครั้งหนึ่ง".into()
        }
    ));
    state
}

#[test]
fn test_generation_start_sets_script_status() {
    let mut state = StudioState::new();
    update(
        &mut state,
        Action::GenerationStarted {
            mode: StoryMode::MegaLong,
        },
    );

    assert_eq!(*state.app_state(), AppState::GeneratingScript);
    assert_eq!(*state.progress(), 10.0);
    assert_eq!(state.status(), script_status(StoryMode::MegaLong));
}

#[test]
fn test_scene_events_update_status_and_progress() {
    let mut state = generating_media(4);
    assert_eq!(state.status(), &scene_status(1, 4, "กาลครั้งหนึ่ง"));
    assert_eq!(*state.progress(), 20.0);

    update(
        &mut state,
        Action::SceneCompleted {
            completed: 2,
            total: 4,
        },
    );
    assert_eq!(*state.progress(), 60.0);

    // A stale, smaller value never moves progress backwards.
    update(
        &mut state,
        Action::SceneCompleted {
            completed: 1,
            total: 4,
        },
    );
    assert_eq!(*state.progress(), 60.0);
}

#[test]
fn test_form_is_frozen_while_generating() {
    let mut state = generating_media(3);
    let before = state.form().clone();

    assert!(!update(&mut state, Action::SetPrompt("other".into())));
    assert!(!update(&mut state, Action::SetMode(StoryMode::Long)));
    assert!(!update(&mut state, Action::SetLogo(Some("data:,".into()))));
    assert_eq!(state.form(), &before);

    // Navigation stays available.
    assert!(update(&mut state, Action::ShowView(View::Dashboard)));
    assert_eq!(*state.view(), View::Dashboard);
}

#[test]
fn test_second_start_is_ignored_while_generating() {
    let mut state = generating_media(3);
    assert!(!update(
        &mut state,
        Action::GenerationStarted {
            mode: StoryMode::Short
        }
    ));
    assert_eq!(*state.app_state(), AppState::GeneratingMedia);
}

#[test]
fn test_events_after_cancel_are_ignored() {
    let mut state = generating_media(3);
    assert!(update(&mut state, Action::Cancel));
    assert_eq!(*state.app_state(), AppState::Idle);
    assert_eq!(*state.progress(), 0.0);

    assert!(!update(
        &mut state,
        Action::SceneCompleted {
            completed: 2,
            total: 3
        }
    ));
    assert!(!update(
        &mut state,
        Action::GenerationFailed {
            reason: "late".into()
        }
    ));
    assert_eq!(*state.app_state(), AppState::Idle);
    assert!(state.last_error().is_none());
}

#[test]
fn test_script_ready_requires_a_running_script() {
    let mut state = StudioState::new();
    assert!(!update(
        &mut state,
        Action::ScriptReady {
            title: "Rabbit".into()
        }
    ));
    assert_eq!(state, StudioState::new());
}

#[test]
fn test_failure_and_reset() {
    let mut state = generating_media(3);
    assert!(update(
        &mut state,
        Action::GenerationFailed {
            reason: "HTTP 500".into()
        }
    ));
    assert_eq!(*state.app_state(), AppState::Error);
    assert_eq!(state.status(), STATUS_ERROR);
    assert_eq!(*state.progress(), 0.0);

    assert!(update(&mut state, Action::Reset));
    assert_eq!(*state.app_state(), AppState::Idle);
    assert!(state.status().is_empty());
    // Reset from idle is a no-op.
    assert!(!update(&mut state, Action::Reset));
}

#[test]
fn test_cancel_outside_generation_is_ignored() {
    let mut state = StudioState::new();
    assert!(!update(&mut state, Action::Cancel));
    assert!(!update(&mut state, Action::PlayFromHistory(0)));
}

#[test]
fn test_scene_progress_bounds() {
    assert_eq!(scene_progress(0, 5), 20.0);
    assert_eq!(scene_progress(5, 5), 100.0);
    assert_eq!(scene_progress(0, 0), 20.0);
    let steps: Vec<f64> = (0..=7).map(|i| scene_progress(i, 7)).collect();
    assert!(steps.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_form_snapshot_becomes_story_config() {
    let mut state = StudioState::new();
    update(&mut state, Action::SetMode(StoryMode::Long));
    update(&mut state, Action::SetVoiceGender(VoiceGender::Male));
    update(&mut state, Action::SetVoiceTone(VoiceTone::Deep));
    update(&mut state, Action::SetBgm(false));
    update(&mut state, Action::SetShowSubtitles(false));
    update(&mut state, Action::SetSubtitleLang(SubtitleLang::En));

    let config = state.form().to_config().unwrap();
    assert_eq!(*config.duration(), StoryMode::Long);
    assert_eq!(*config.voice_gender(), VoiceGender::Male);
    assert_eq!(*config.voice_tone(), VoiceTone::Deep);
    assert!(!*config.bgm_enabled());
    assert!(!*config.default_show_subtitles());
    assert_eq!(*config.default_subtitle_lang(), SubtitleLang::En);
}

#[test]
fn test_default_form_matches_default_config() {
    let form = DraftForm::default();
    assert!(form.prompt.is_empty());
    assert!(form.logo.is_none());
    assert_eq!(form.to_config().unwrap(), Default::default());
}
