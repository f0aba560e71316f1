//! Local storage for the Nithan story studio.
//!
//! - [`FileStore`] / [`MemoryStore`]: key/value state that holds the identity
//!   token between runs
//! - [`DataUrl`] and [`ImageFormat`]: `data:` URL codec for illustrations and
//!   logo uploads
//! - [`StoryExporter`]: writes a finished story (script, images, narration,
//!   subtitles) to a directory

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod data_url;
mod export;
mod file_store;
mod media_type;

pub use data_url::DataUrl;
pub use export::{ExportSummary, StoryExporter, render_srt};
pub use file_store::{FileStore, MemoryStore};
pub use media_type::ImageFormat;
