//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use nithan_core::{StoryMode, SubtitleLang, VoiceGender, VoiceTone};
use nithan_story::Action;
use std::path::PathBuf;

/// Nithan - illustrated, narrated Thai bedtime stories from a one-line idea
#[derive(Parser, Debug)]
#[command(name = "nithan")]
#[command(about = "Illustrated, narrated Thai bedtime stories from a one-line idea", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file to use instead of the default lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one story and print it
    Generate(GenerateArgs),

    /// Interactive studio session with in-memory history
    Studio,

    /// Sign in with an identity token
    Login {
        /// JWT credential issued by the identity provider
        #[arg(long)]
        credential: String,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Print the narrator voice table
    Voices,
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Generate(_) => "generate",
            Commands::Studio => "studio",
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::Whoami => "whoami",
            Commands::Voices => "voices",
        }
    }
}

/// Options for a single generation.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Story idea
    #[arg(short, long)]
    pub prompt: String,

    /// Duration: short, medium, long or mega_long
    #[arg(short, long, default_value_t)]
    pub mode: StoryMode,

    /// Narrator: female or male
    #[arg(long, default_value_t)]
    pub gender: VoiceGender,

    /// Narration tone: soft, energetic, deep or formal
    #[arg(long, default_value_t)]
    pub tone: VoiceTone,

    /// Disable background music
    #[arg(long)]
    pub no_bgm: bool,

    /// Start with subtitles hidden
    #[arg(long)]
    pub no_subtitles: bool,

    /// Subtitle language: th or en
    #[arg(long, default_value_t)]
    pub subtitle_lang: SubtitleLang,

    /// Logo image to brand the story with
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Export the finished story into this directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl GenerateArgs {
    /// The form edits these options amount to, logo excluded.
    pub fn form_actions(&self) -> Vec<Action> {
        vec![
            Action::SetPrompt(self.prompt.clone()),
            Action::SetMode(self.mode),
            Action::SetVoiceGender(self.gender),
            Action::SetVoiceTone(self.tone),
            Action::SetBgm(!self.no_bgm),
            Action::SetShowSubtitles(!self.no_subtitles),
            Action::SetSubtitleLang(self.subtitle_lang),
        ]
    }
}
