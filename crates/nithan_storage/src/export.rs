//! Writing a finished story to disk.

use crate::DataUrl;
use nithan_core::{HistoryItem, SubtitleLang};
use nithan_error::{JsonError, NithanResult, StorageError, StorageErrorKind};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// Files written by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Export directory
    pub dir: PathBuf,
    /// Every file written, in write order
    pub files: Vec<PathBuf>,
}

/// Exports stories as a directory of plain files.
///
/// ```text
/// out/
/// ├── story.json
/// ├── scene_01.png
/// ├── scene_01.wav
/// ├── ...
/// ├── subtitles.th.srt
/// └── subtitles.en.srt
/// ```
#[derive(Debug, Clone)]
pub struct StoryExporter {
    dir: PathBuf,
}

impl StoryExporter {
    /// Exporter writing into `dir`, created on export.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the script, every scene's image and narration, and subtitles.
    ///
    /// # Errors
    ///
    /// Fails if the directory or a file cannot be written, or an image is not
    /// a supported `data:` URL.
    #[instrument(skip(self, item), fields(dir = %self.dir.display(), title = %item.story_data().title))]
    pub async fn export(&self, item: &HistoryItem) -> NithanResult<ExportSummary> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                self.dir.display(),
                e
            )))
        })?;

        let mut files = Vec::new();

        let manifest = serde_json::to_vec_pretty(item.story_data())
            .map_err(|e| JsonError::new(format!("story.json: {}", e)))?;
        files.push(self.write("story.json", &manifest).await?);

        for (index, media) in item.media().iter().enumerate() {
            let number = index + 1;
            let image = DataUrl::parse(&media.image_url)?;
            let format = image.image_format()?;
            files.push(
                self.write(&format!("scene_{:02}.{}", number, format.extension()), image.data())
                    .await?,
            );
            files.push(
                self.write(&format!("scene_{:02}.wav", number), &media.audio.to_wav_bytes())
                    .await?,
            );
            debug!(scene = number, "Exported scene");
        }

        for lang in SubtitleLang::iter() {
            let srt = render_srt(item, lang);
            files.push(self.write(&format!("subtitles.{}.srt", lang), srt.as_bytes()).await?);
        }

        info!(files = files.len(), "Exported story");
        Ok(ExportSummary {
            dir: self.dir.clone(),
            files,
        })
    }

    async fn write(&self, name: &str, data: &[u8]) -> NithanResult<PathBuf> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
        })?;
        Ok(path)
    }
}

/// Renders SubRip subtitles, one cue per scene timed by its narration.
///
/// English cues fall back to the Thai text when a scene has no translation.
pub fn render_srt(item: &HistoryItem, lang: SubtitleLang) -> String {
    let mut out = String::new();
    let mut start = Duration::ZERO;
    for (index, media) in item.media().iter().enumerate() {
        let end = start + media.audio.duration();
        let text = match lang {
            SubtitleLang::En if !media.text_en.trim().is_empty() => &media.text_en,
            _ => &media.text,
        };
        let _ = write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            srt_timestamp(start),
            srt_timestamp(end),
            text.trim()
        );
        start = end;
    }
    out
}

fn srt_timestamp(at: Duration) -> String {
    let millis = at.as_millis();
    format!(
        "{:02}:{:02}:{:02},{:03}",
        millis / 3_600_000,
        (millis / 60_000) % 60,
        (millis / 1_000) % 60,
        millis % 1_000
    )
}
