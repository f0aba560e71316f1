//! Nithan CLI binary.
//!
//! This binary provides command-line access to the story studio:
//! - Generate a story from a prompt and export it
//! - Run an interactive studio session with replayable history
//! - Sign in and out

use clap::Parser;
use nithan::NithanError;
use nithan::cli::{
    Cli, Commands, Context, handle_login, handle_logout, handle_whoami, run_generate, run_studio,
    setup_notice, voices_listing,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    let _logging = match init_logging(&cli) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    // Needs neither configuration nor credentials
    if let Commands::Voices = cli.command {
        print!("{}", voices_listing());
        return ExitCode::SUCCESS;
    }

    let ctx = match Context::load(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => return report(&e),
    };

    // Execute the requested command
    let result = match cli.command {
        Commands::Generate(args) => run_generate(&ctx, args).await,
        Commands::Studio => run_studio(&ctx).await.map(|()| ExitCode::SUCCESS),
        Commands::Login { credential } => {
            handle_login(&ctx, &credential).map(|()| ExitCode::SUCCESS)
        }
        Commands::Logout => handle_logout(&ctx).map(|()| ExitCode::SUCCESS),
        Commands::Whoami => handle_whoami(&ctx).map(|()| ExitCode::SUCCESS),
        Commands::Voices => Ok(ExitCode::SUCCESS),
    };

    result.unwrap_or_else(|e| report(&e))
}

fn report(err: &NithanError) -> ExitCode {
    match setup_notice(err) {
        Some(notice) => eprintln!("{}", notice),
        None => eprintln!("Error: {}", err),
    }
    tracing::debug!(error = ?err, "Command failed");
    ExitCode::FAILURE
}

#[cfg(feature = "observability")]
fn init_logging(
    cli: &Cli,
) -> Result<nithan::observability::TelemetryGuard, Box<dyn std::error::Error>> {
    use nithan::observability::{TelemetrySettings, init_telemetry};

    let mut settings = TelemetrySettings::new(cli.command.name())
        .with_verbose(cli.verbose)
        .with_json_logs(cli.json_logs);
    if let Commands::Generate(args) = &cli.command {
        settings = settings.with_story_mode(args.mode);
    }
    init_telemetry(&settings)
}

#[cfg(not(feature = "observability"))]
fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::EnvFilter;

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    // Logs go to stderr so story output on stdout stays clean.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        builder.json().try_init()?;
    } else {
        builder.try_init()?;
    }
    Ok(())
}
