//! One-shot generation command handler.

use super::{Context, GenerateArgs, progress_line, story_listing};
use nithan_core::HistoryItem;
use nithan_error::NithanResult;
use nithan_interface::StoryBackend;
use nithan_storage::{DataUrl, StoryExporter};
use nithan_story::{Action, AppState, Studio};
use std::path::Path;
use std::process::ExitCode;
use tracing::{info, instrument, warn};

/// Exit code for a run the user interrupted.
const EXIT_CANCELLED: u8 = 130;

/// Generates one story, prints it and optionally exports it.
#[instrument(skip_all, fields(mode = %args.mode))]
pub async fn run_generate(ctx: &Context, args: GenerateArgs) -> NithanResult<ExitCode> {
    let user = ctx.require_generation()?;
    info!(user = %user.email, "Starting generation");

    let mut studio = Studio::from_config(ctx.caps(), ctx.config())?;
    for action in args.form_actions() {
        studio.dispatch(action);
    }
    if let Some(path) = &args.logo {
        let logo = DataUrl::from_image_file(path).await?;
        studio.dispatch(Action::SetLogo(Some(logo.to_string())));
    }

    let cancelled = studio.cancel_handle();
    match generate_interruptible(&mut studio).await {
        AppState::Ready => {
            if let Some(item) = studio.state().history().get(0) {
                println!();
                print!("{}", story_listing(item));
                if let Some(out) = &args.out {
                    export(item, out).await?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        AppState::Error => {
            eprintln!("{}", studio.state().status());
            Ok(ExitCode::FAILURE)
        }
        _ if cancelled.is_cancelled() => {
            println!("Cancelled");
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
        _ => {
            eprintln!("Nothing to generate: the prompt is empty");
            Ok(ExitCode::from(2))
        }
    }
}

/// Runs a generation, printing progress lines; Ctrl-C cancels it.
pub(crate) async fn generate_interruptible<B: StoryBackend>(studio: &mut Studio<B>) -> AppState {
    let handle = studio.cancel_handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let mut last = String::new();
    let settled = studio
        .generate_with(|state| {
            let line = progress_line(state);
            if line != last {
                println!("{}", line);
                last = line;
            }
        })
        .await;

    interrupt.abort();
    settled
}

pub(crate) async fn export(item: &HistoryItem, dir: &Path) -> NithanResult<()> {
    let summary = StoryExporter::new(dir).export(item).await?;
    if summary.files.is_empty() {
        warn!(dir = %dir.display(), "Export wrote no files");
    }
    println!(
        "Exported {} files to {}",
        summary.files.len(),
        summary.dir.display()
    );
    Ok(())
}
