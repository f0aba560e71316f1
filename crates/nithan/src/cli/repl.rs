//! Interactive studio session.

use super::generate::{export, generate_interruptible};
use super::{Context, dashboard, progress_line, story_listing};
use nithan_core::{StoryMode, SubtitleLang, VoiceGender, VoiceTone};
use nithan_error::{NithanResult, StorageError, StorageErrorKind, StoryError, StoryErrorKind};
use nithan_interface::StoryBackend;
use nithan_storage::DataUrl;
use nithan_story::{Action, AppState, Studio, View};
use std::io::Write as _;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument, warn};

const HELP: &str = "\
prompt TEXT         set the story idea
mode MODE           short | medium | long | mega_long
voice GENDER        female | male
tone TONE           soft | energetic | deep | formal
bgm on|off          background music
subtitles on|off    subtitles shown by default
lang th|en          default subtitle language
logo PATH|none      brand the story with an image
generate            generate a story from the form (Ctrl-C cancels)
history             list this session's stories
play N              replay story N from the history
export N DIR        write story N to DIR
dashboard           session totals
create              back to the creation form
reset               clear an error or the loaded story
quit                leave the studio";

/// One line of studio input.
///
/// ```
/// use nithan::cli::ReplCommand;
/// use nithan::StoryMode;
///
/// assert_eq!(
///     "mode long".parse::<ReplCommand>(),
///     Ok(ReplCommand::Mode(StoryMode::Long))
/// );
/// assert_eq!("play 2".parse::<ReplCommand>(), Ok(ReplCommand::Play(1)));
/// assert!("play 0".parse::<ReplCommand>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Set the story idea
    Prompt(String),
    /// Set the duration mode
    Mode(StoryMode),
    /// Set the narrator gender
    Voice(VoiceGender),
    /// Set the narration tone
    Tone(VoiceTone),
    /// Toggle background music
    Bgm(bool),
    /// Toggle default subtitles
    Subtitles(bool),
    /// Set the default subtitle language
    Lang(SubtitleLang),
    /// Attach a logo file, or clear it
    Logo(Option<PathBuf>),
    /// Generate from the form
    Generate,
    /// List the history
    History,
    /// Replay a history item (0-based index)
    Play(usize),
    /// Export a history item (0-based index)
    Export {
        /// History index
        index: usize,
        /// Target directory
        dir: PathBuf,
    },
    /// Show session totals
    Dashboard,
    /// Back to the creation form
    Create,
    /// Clear an error or the loaded story
    Reset,
    /// Print the command list
    Help,
    /// Leave the studio
    Quit,
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word {
            "prompt" if !rest.is_empty() => Self::Prompt(rest.to_string()),
            "mode" => Self::Mode(parse_value(rest, "mode")?),
            "voice" => Self::Voice(parse_value(rest, "voice")?),
            "tone" => Self::Tone(parse_value(rest, "tone")?),
            "bgm" => Self::Bgm(parse_switch(rest)?),
            "subtitles" => Self::Subtitles(parse_switch(rest)?),
            "lang" => Self::Lang(parse_value(rest, "language")?),
            "logo" if rest == "none" => Self::Logo(None),
            "logo" if !rest.is_empty() => Self::Logo(Some(PathBuf::from(rest))),
            "generate" => Self::Generate,
            "history" => Self::History,
            "play" => Self::Play(parse_position(rest)?),
            "export" => {
                let (n, dir) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: export N DIR".to_string())?;
                Self::Export {
                    index: parse_position(n)?,
                    dir: PathBuf::from(dir.trim()),
                }
            }
            "dashboard" => Self::Dashboard,
            "create" => Self::Create,
            "reset" => Self::Reset,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "prompt" | "logo" => return Err(format!("usage: {} VALUE", word)),
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command '{}' (try help)", other)),
        };
        Ok(command)
    }
}

fn parse_value<T: FromStr>(value: &str, what: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("unknown {} '{}'", what, value))
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        other => Err(format!("expected on or off, got '{}'", other)),
    }
}

/// Parses a 1-based history position into an index.
fn parse_position(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a story number from 1, got '{}'", value)),
    }
}

/// Runs the interactive studio until `quit` or end of input.
#[instrument(skip_all)]
pub async fn run_studio(ctx: &Context) -> NithanResult<()> {
    let user = ctx.require_generation()?;
    let mut studio = Studio::from_config(ctx.caps(), ctx.config())?;
    println!("Welcome, {}. Type `help` for commands.", user.name);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("nithan> ");
        let _ = std::io::stdout().flush();

        let line = lines.next_line().await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("stdin: {}", e)))
        })?;
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ReplCommand>() {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };
        debug!(?command, "Studio command");
        if command == ReplCommand::Quit {
            break;
        }
        if let Err(e) = execute(&mut studio, command).await {
            warn!(error = %e, "Studio command failed");
            println!("{}", e);
        }
    }
    Ok(())
}

async fn execute<B: StoryBackend>(studio: &mut Studio<B>, command: ReplCommand) -> NithanResult<()> {
    let action = match command {
        ReplCommand::Prompt(prompt) => Action::SetPrompt(prompt),
        ReplCommand::Mode(mode) => Action::SetMode(mode),
        ReplCommand::Voice(gender) => Action::SetVoiceGender(gender),
        ReplCommand::Tone(tone) => Action::SetVoiceTone(tone),
        ReplCommand::Bgm(on) => Action::SetBgm(on),
        ReplCommand::Subtitles(on) => Action::SetShowSubtitles(on),
        ReplCommand::Lang(lang) => Action::SetSubtitleLang(lang),
        ReplCommand::Logo(None) => Action::SetLogo(None),
        ReplCommand::Logo(Some(path)) => {
            let logo = DataUrl::from_image_file(&path).await?;
            Action::SetLogo(Some(logo.to_string()))
        }
        ReplCommand::Generate => {
            if studio.state().form().prompt.trim().is_empty() {
                println!("Set a prompt first");
                return Ok(());
            }
            if generate_interruptible(studio).await == AppState::Ready {
                show_current(studio);
            }
            return Ok(());
        }
        ReplCommand::History | ReplCommand::Dashboard => {
            studio.dispatch(Action::ShowView(View::Dashboard));
            print!("{}", dashboard(studio.state().history()));
            return Ok(());
        }
        ReplCommand::Play(index) => {
            if !studio.dispatch(Action::PlayFromHistory(index)) {
                let len = studio.state().history().len();
                return Err(StoryError::new(StoryErrorKind::HistoryIndex { index, len }).into());
            }
            show_current(studio);
            return Ok(());
        }
        ReplCommand::Export { index, dir } => {
            let history = studio.state().history();
            let item = history.get(index).ok_or_else(|| {
                StoryError::new(StoryErrorKind::HistoryIndex {
                    index,
                    len: history.len(),
                })
            })?;
            return export(item, &dir).await;
        }
        ReplCommand::Create => Action::ShowView(View::Create),
        ReplCommand::Reset => Action::Reset,
        ReplCommand::Help => {
            println!("{}", HELP);
            return Ok(());
        }
        ReplCommand::Quit => return Ok(()),
    };

    if !studio.dispatch(action) {
        println!("Not now: {}", studio.state().app_state());
    }
    Ok(())
}

fn show_current<B: StoryBackend>(studio: &Studio<B>) {
    let state = studio.state();
    // The loaded story is either the newest one or a replayed history item.
    let item = state.history().iter().find(|item| {
        Some(item.story_data()) == state.current_story().as_ref()
            && item.media() == state.current_media().as_slice()
    });
    match item {
        Some(item) => print!("{}", story_listing(item)),
        None => println!("{}", progress_line(state)),
    }
}
