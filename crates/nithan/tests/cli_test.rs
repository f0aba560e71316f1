//! Tests for command-line parsing.

use clap::Parser;
use nithan::cli::{Cli, Commands, ReplCommand};
use nithan::{Action, StoryMode, SubtitleLang, VoiceGender, VoiceTone};
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("nithan").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_generate_defaults_follow_story_config() {
    let cli = parse(&["generate", "-p", "กระต่ายน้อย"]);
    let Commands::Generate(args) = cli.command else {
        panic!("expected generate");
    };

    assert_eq!(args.prompt, "กระต่ายน้อย");
    assert_eq!(args.mode, StoryMode::Short);
    assert_eq!(args.gender, VoiceGender::Female);
    assert_eq!(args.tone, VoiceTone::Soft);
    assert!(!args.no_bgm);
    assert_eq!(args.subtitle_lang, SubtitleLang::Th);
    assert!(args.out.is_none());
}

#[test]
fn test_generate_accepts_every_option() {
    let cli = parse(&[
        "generate",
        "--prompt",
        "dragon",
        "--mode",
        "mega_long",
        "--gender",
        "male",
        "--tone",
        "deep",
        "--no-bgm",
        "--no-subtitles",
        "--subtitle-lang",
        "en",
        "--logo",
        "logo.png",
        "--out",
        "out",
        "-v",
    ]);
    assert!(cli.verbose);
    let Commands::Generate(args) = cli.command else {
        panic!("expected generate");
    };

    assert_eq!(args.mode, StoryMode::MegaLong);
    assert_eq!(args.logo, Some(PathBuf::from("logo.png")));
    assert_eq!(args.out, Some(PathBuf::from("out")));
    assert_eq!(
        args.form_actions(),
        vec![
            Action::SetPrompt("dragon".into()),
            Action::SetMode(StoryMode::MegaLong),
            Action::SetVoiceGender(VoiceGender::Male),
            Action::SetVoiceTone(VoiceTone::Deep),
            Action::SetBgm(false),
            Action::SetShowSubtitles(false),
            Action::SetSubtitleLang(SubtitleLang::En),
        ]
    );
}

#[test]
fn test_unknown_mode_is_rejected() {
    let result = Cli::try_parse_from(["nithan", "generate", "-p", "x", "--mode", "epic"]);
    assert!(result.is_err());
}

#[test]
fn test_generate_requires_a_prompt() {
    assert!(Cli::try_parse_from(["nithan", "generate"]).is_err());
}

#[test]
fn test_login_takes_a_credential() {
    let cli = parse(&["--json-logs", "login", "--credential", "a.b.c"]);
    assert!(cli.json_logs);
    match cli.command {
        Commands::Login { credential } => assert_eq!(credential, "a.b.c"),
        other => panic!("expected login, got {other:?}"),
    }
    assert!(Cli::try_parse_from(["nithan", "login"]).is_err());
}

#[test]
fn test_global_config_flag() {
    let cli = parse(&["whoami", "--config", "custom.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    assert!(matches!(cli.command, Commands::Whoami));
}

#[test]
fn test_studio_commands_parse() {
    let cases = [
        ("prompt มังกรน้อย กลัวความมืด", ReplCommand::Prompt("มังกรน้อย กลัวความมืด".into())),
        ("voice male", ReplCommand::Voice(VoiceGender::Male)),
        ("tone energetic", ReplCommand::Tone(VoiceTone::Energetic)),
        ("bgm off", ReplCommand::Bgm(false)),
        ("subtitles on", ReplCommand::Subtitles(true)),
        ("lang en", ReplCommand::Lang(SubtitleLang::En)),
        ("logo none", ReplCommand::Logo(None)),
        ("logo ./brand.svg", ReplCommand::Logo(Some("./brand.svg".into()))),
        ("  generate  ", ReplCommand::Generate),
        ("play 1", ReplCommand::Play(0)),
        (
            "export 3 out/story",
            ReplCommand::Export {
                index: 2,
                dir: "out/story".into(),
            },
        ),
        ("exit", ReplCommand::Quit),
    ];
    for (line, expected) in cases {
        assert_eq!(line.parse::<ReplCommand>(), Ok(expected), "{line}");
    }
}

#[test]
fn test_bad_studio_commands_explain_themselves() {
    for line in ["mode epic", "bgm maybe", "play x", "export 1", "prompt", "fly"] {
        let err = line.parse::<ReplCommand>().unwrap_err();
        assert!(!err.is_empty(), "{line}");
    }
}

#[test]
fn test_command_names_match_the_command_line() {
    for (args, name) in [
        (&["generate", "-p", "x"][..], "generate"),
        (&["studio"][..], "studio"),
        (&["login", "--credential", "a.b.c"][..], "login"),
        (&["logout"][..], "logout"),
        (&["whoami"][..], "whoami"),
        (&["voices"][..], "voices"),
    ] {
        assert_eq!(parse(args).command.name(), name);
    }
}
