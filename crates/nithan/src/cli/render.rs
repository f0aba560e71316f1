//! Plain-text rendering of studio state for the terminal.

use nithan_core::{HistoryItem, StoryConfig, SubtitleLang};
use nithan_error::{AuthErrorKind, GeminiErrorKind, NithanError, NithanErrorKind};
use nithan_models::voice_table;
use nithan_story::{SessionHistory, StudioState};
use std::fmt::Write as _;
use std::time::Duration;

/// One status line: progress and the current message.
///
/// ```
/// use nithan::cli::progress_line;
/// use nithan::{Action, StoryMode, StudioState, update};
///
/// let mut state = StudioState::new();
/// update(&mut state, Action::GenerationStarted { mode: StoryMode::Short });
/// assert_eq!(progress_line(&state), "[ 10%] กำลังแต่งนิทาน...");
/// ```
pub fn progress_line(state: &StudioState) -> String {
    format!("[{:>3.0}%] {}", state.progress(), state.status())
}

/// The story as a scene-by-scene listing.
///
/// Subtitles follow the options the story was generated with.
pub fn story_listing(item: &HistoryItem) -> String {
    let story = item.story_data();
    let config = story.config.unwrap_or_default();
    let mut out = String::new();

    let _ = writeln!(out, "{}", story.title);
    let _ = writeln!(
        out,
        "{} scenes, {} of narration, {}",
        item.media().len(),
        clock(item.total_duration()),
        options(&config)
    );
    for (i, media) in item.media().iter().enumerate() {
        let _ = writeln!(out);
        let _ = write!(
            out,
            "Scene {}/{} ({})",
            i + 1,
            item.media().len(),
            clock(media.audio.duration())
        );
        let effects: Vec<&str> = [media.visual_effect.as_str(), media.sound_effect.as_str()]
            .into_iter()
            .filter(|e| !e.is_empty())
            .collect();
        if !effects.is_empty() {
            let _ = write!(out, " [{}]", effects.join(", "));
        }
        let _ = writeln!(out);
        if *config.default_show_subtitles() {
            let line = match config.default_subtitle_lang() {
                SubtitleLang::En if !media.text_en.is_empty() => &media.text_en,
                _ => &media.text,
            };
            let _ = writeln!(out, "  {}", line);
        }
    }
    out
}

/// The narrator voice table.
pub fn voices_listing() -> String {
    let mut out = format!("{:<8} {:<10} {}\n", "gender", "tone", "voice");
    for (gender, tone, voice) in voice_table() {
        let _ = writeln!(out, "{:<8} {:<10} {}", gender.to_string(), tone.to_string(), voice);
    }
    out
}

/// Session totals followed by the history, newest first and numbered from 1.
pub fn dashboard(history: &SessionHistory) -> String {
    let mut out = format!("{}\n", history.summary());
    for (i, item) in history.iter().enumerate() {
        let story = item.story_data();
        let mode = story
            .config
            .map(|c| c.duration().label())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>3}. {} ({}, {} scenes, {})",
            i + 1,
            story.title,
            mode,
            item.media().len(),
            clock(item.total_duration())
        );
    }
    out
}

/// What to tell the user when `err` means the app is not set up.
pub fn setup_notice(err: &NithanError) -> Option<&'static str> {
    match err.kind() {
        NithanErrorKind::Gemini(e) if e.kind == GeminiErrorKind::MissingApiKey => Some(
            "Story generation is not configured. Set API_KEY (or GEMINI_API_KEY) in the environment or a .env file.",
        ),
        NithanErrorKind::Auth(e) if e.kind == AuthErrorKind::LoginUnavailable => Some(
            "Sign-in is not configured. Set GOOGLE_CLIENT_ID in the environment or a .env file.",
        ),
        NithanErrorKind::Auth(e) if e.kind == AuthErrorKind::NotAuthenticated => {
            Some("Please sign in first: nithan login --credential <TOKEN>")
        }
        _ => None,
    }
}

fn options(config: &StoryConfig) -> String {
    format!(
        "{} voice, {} tone, music {}",
        config.voice_gender(),
        config.voice_tone(),
        if *config.bgm_enabled() { "on" } else { "off" }
    )
}

fn clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
