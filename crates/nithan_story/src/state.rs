//! Application state and its transition function.
//!
//! Every change to [`StudioState`] goes through [`update`], driven by the
//! closed [`Action`] set. Generation events are applied only when the state
//! machine can accept them:
//!
//! ```text
//! Idle ──GenerationStarted──▶ GeneratingScript ──ScriptReady──▶ GeneratingMedia ──GenerationCompleted──▶ Ready
//!   ▲                                │                                │
//!   │◀────────────Cancel─────────────┴────────────────────────────────┤
//!   │                                                                 │
//!   └──────Reset────── Error ◀──────────GenerationFailed──────────────┘
//! ```
//!
//! An event arriving in any other state is ignored, so results that land after
//! a cancellation never revive the run.

use crate::SessionHistory;
use crate::messages;
use derive_getters::Getters;
use nithan_core::{
    GeneratedSceneMedia, HistoryItem, StoryConfig, StoryData, StoryMode, SubtitleLang,
    VoiceGender, VoiceTone,
};
use nithan_error::{BuilderError, BuilderErrorKind, NithanResult};
use tracing::debug;

/// Progress reserved for script generation.
const SCRIPT_PROGRESS: f64 = 20.0;

/// Where the studio is in the generation lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum AppState {
    /// Waiting for input
    #[default]
    Idle,
    /// Script request in flight
    GeneratingScript,
    /// Scene media being generated
    GeneratingMedia,
    /// A story is loaded for playback
    Ready,
    /// The last generation failed
    Error,
}

impl AppState {
    /// Whether a generation is in progress.
    pub fn is_generating(self) -> bool {
        matches!(self, AppState::GeneratingScript | AppState::GeneratingMedia)
    }
}

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum View {
    /// Creation form and player
    #[default]
    Create,
    /// Session history overview
    Dashboard,
}

/// The creation form as the user is filling it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftForm {
    /// Story idea
    pub prompt: String,
    /// Duration mode
    pub mode: StoryMode,
    /// Narrator gender
    pub voice_gender: VoiceGender,
    /// Narration tone
    pub voice_tone: VoiceTone,
    /// Background music
    pub bgm_enabled: bool,
    /// Subtitles visible by default
    pub show_subtitles: bool,
    /// Default subtitle language
    pub subtitle_lang: SubtitleLang,
    /// Uploaded logo as a `data:` URL
    pub logo: Option<String>,
}

impl Default for DraftForm {
    fn default() -> Self {
        let config = StoryConfig::default();
        Self {
            prompt: String::new(),
            mode: *config.duration(),
            voice_gender: *config.voice_gender(),
            voice_tone: *config.voice_tone(),
            bgm_enabled: *config.bgm_enabled(),
            show_subtitles: *config.default_show_subtitles(),
            subtitle_lang: *config.default_subtitle_lang(),
            logo: None,
        }
    }
}

impl DraftForm {
    /// Snapshot of the form's generation options.
    pub fn to_config(&self) -> NithanResult<StoryConfig> {
        StoryConfig::builder()
            .duration(self.mode)
            .voice_gender(self.voice_gender)
            .voice_tone(self.voice_tone)
            .bgm_enabled(self.bgm_enabled)
            .default_show_subtitles(self.show_subtitles)
            .default_subtitle_lang(self.subtitle_lang)
            .build()
            .map_err(|e| {
                BuilderError::new(BuilderErrorKind::InvalidField {
                    field: "story_config".to_string(),
                    reason: e.to_string(),
                })
                .into()
            })
    }
}

/// Everything the front end renders.
#[derive(Debug, Clone, Default, PartialEq, Getters)]
pub struct StudioState {
    /// Creation form
    form: DraftForm,
    /// Lifecycle state
    app_state: AppState,
    /// Status line
    status: String,
    /// Progress, 0 to 100
    progress: f64,
    /// Story loaded for playback
    current_story: Option<StoryData>,
    /// Media of the loaded story, aligned with its scenes
    current_media: Vec<GeneratedSceneMedia>,
    /// Finished stories this session
    history: SessionHistory,
    /// Active screen
    view: View,
    /// Technical detail of the last failure, for logs
    last_error: Option<String>,
}

impl StudioState {
    /// Fresh state with an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_run(&mut self) {
        self.progress = 0.0;
        self.status.clear();
        self.current_story = None;
        self.current_media.clear();
    }

    fn load(&mut self, item: &HistoryItem) {
        self.current_story = Some(item.story_data().clone());
        self.current_media = item.media().to_vec();
    }
}

/// Every transition the studio knows.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Edit the prompt
    SetPrompt(String),
    /// Choose a duration mode
    SetMode(StoryMode),
    /// Choose the narrator gender
    SetVoiceGender(VoiceGender),
    /// Choose the narration tone
    SetVoiceTone(VoiceTone),
    /// Toggle background music
    SetBgm(bool),
    /// Toggle default subtitles
    SetShowSubtitles(bool),
    /// Choose the default subtitle language
    SetSubtitleLang(SubtitleLang),
    /// Attach or clear the logo (`data:` URL)
    SetLogo(Option<String>),
    /// Script request issued
    GenerationStarted {
        /// Mode being generated
        mode: StoryMode,
    },
    /// Script received
    ScriptReady {
        /// Story title
        title: String,
    },
    /// Scene requests issued
    SceneStarted {
        /// 1-based scene number
        index: usize,
        /// Scene count
        total: usize,
        /// Start of the scene's narration
        preview: String,
    },
    /// Scene media received and decoded
    SceneCompleted {
        /// Scenes finished so far
        completed: usize,
        /// Scene count
        total: usize,
    },
    /// Every scene finished
    GenerationCompleted(HistoryItem),
    /// The run failed
    GenerationFailed {
        /// Technical description, not shown to the user
        reason: String,
    },
    /// User cancelled the run
    Cancel,
    /// Back to the empty form after an error or playback
    Reset,
    /// Load a history item for playback
    PlayFromHistory(usize),
    /// Switch screens
    ShowView(View),
}

/// Progress after `completed` of `total` scenes.
///
/// Script generation accounts for the first 20%, scenes share the rest.
///
/// ```
/// use nithan_story::scene_progress;
///
/// assert!((scene_progress(1, 3) - 46.67).abs() < 0.01);
/// assert_eq!(scene_progress(3, 3), 100.0);
/// ```
pub fn scene_progress(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return SCRIPT_PROGRESS;
    }
    SCRIPT_PROGRESS + (completed as f64 / total as f64) * (100.0 - SCRIPT_PROGRESS)
}

/// Applies `action` to `state`.
///
/// Returns `false` when the action is not valid in the current state and was
/// ignored.
pub fn update(state: &mut StudioState, action: Action) -> bool {
    let current = state.app_state;
    match action {
        Action::SetPrompt(_)
        | Action::SetMode(_)
        | Action::SetVoiceGender(_)
        | Action::SetVoiceTone(_)
        | Action::SetBgm(_)
        | Action::SetShowSubtitles(_)
        | Action::SetSubtitleLang(_)
        | Action::SetLogo(_)
            if current.is_generating() =>
        {
            debug!(state = %current, "Ignoring form edit during generation");
            false
        }
        Action::SetPrompt(prompt) => {
            state.form.prompt = prompt;
            true
        }
        Action::SetMode(mode) => {
            state.form.mode = mode;
            true
        }
        Action::SetVoiceGender(gender) => {
            state.form.voice_gender = gender;
            true
        }
        Action::SetVoiceTone(tone) => {
            state.form.voice_tone = tone;
            true
        }
        Action::SetBgm(enabled) => {
            state.form.bgm_enabled = enabled;
            true
        }
        Action::SetShowSubtitles(show) => {
            state.form.show_subtitles = show;
            true
        }
        Action::SetSubtitleLang(lang) => {
            state.form.subtitle_lang = lang;
            true
        }
        Action::SetLogo(logo) => {
            state.form.logo = logo;
            true
        }
        Action::GenerationStarted { mode } if !current.is_generating() => {
            state.clear_run();
            state.app_state = AppState::GeneratingScript;
            state.view = View::Create;
            state.last_error = None;
            state.progress = 10.0;
            state.status = messages::script_status(mode).to_string();
            true
        }
        Action::ScriptReady { title } if current == AppState::GeneratingScript => {
            state.app_state = AppState::GeneratingMedia;
            state.progress = SCRIPT_PROGRESS;
            state.status = messages::script_ready_status(&title);
            true
        }
        Action::SceneStarted {
            index,
            total,
            preview,
        } if current == AppState::GeneratingMedia => {
            state.status = messages::scene_status(index, total, &preview);
            true
        }
        Action::SceneCompleted { completed, total } if current == AppState::GeneratingMedia => {
            state.progress = state.progress.max(scene_progress(completed, total));
            true
        }
        Action::GenerationCompleted(item) if current == AppState::GeneratingMedia => {
            state.load(&item);
            state.history.push(item);
            state.app_state = AppState::Ready;
            state.progress = 100.0;
            state.status = messages::STATUS_DONE.to_string();
            true
        }
        Action::GenerationFailed { reason } if current.is_generating() => {
            state.clear_run();
            state.app_state = AppState::Error;
            state.status = messages::STATUS_ERROR.to_string();
            state.last_error = Some(reason);
            true
        }
        Action::Cancel if current.is_generating() => {
            state.clear_run();
            state.app_state = AppState::Idle;
            true
        }
        Action::Reset if matches!(current, AppState::Error | AppState::Ready) => {
            state.clear_run();
            state.app_state = AppState::Idle;
            state.last_error = None;
            true
        }
        Action::PlayFromHistory(index) if !current.is_generating() => {
            match state.history.get(index).cloned() {
                Some(item) => {
                    state.load(&item);
                    state.app_state = AppState::Ready;
                    state.view = View::Create;
                    state.progress = 100.0;
                    state.status.clear();
                    true
                }
                None => false,
            }
        }
        Action::ShowView(view) => {
            state.view = view;
            true
        }
        other => {
            debug!(state = %current, action = action_name(&other), "Ignoring action");
            false
        }
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::SetPrompt(_) => "set_prompt",
        Action::SetMode(_) => "set_mode",
        Action::SetVoiceGender(_) => "set_voice_gender",
        Action::SetVoiceTone(_) => "set_voice_tone",
        Action::SetBgm(_) => "set_bgm",
        Action::SetShowSubtitles(_) => "set_show_subtitles",
        Action::SetSubtitleLang(_) => "set_subtitle_lang",
        Action::SetLogo(_) => "set_logo",
        Action::GenerationStarted { .. } => "generation_started",
        Action::ScriptReady { .. } => "script_ready",
        Action::SceneStarted { .. } => "scene_started",
        Action::SceneCompleted { .. } => "scene_completed",
        Action::GenerationCompleted(_) => "generation_completed",
        Action::GenerationFailed { .. } => "generation_failed",
        Action::Cancel => "cancel",
        Action::Reset => "reset",
        Action::PlayFromHistory(_) => "play_from_history",
        Action::ShowView(_) => "show_view",
    }
}
