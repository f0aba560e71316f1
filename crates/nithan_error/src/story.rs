//! Story pipeline error types.

/// Specific error conditions for story generation and playback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// Script came back without a title
    #[display("Generated script has an empty title")]
    EmptyTitle,
    /// Script came back without scenes
    #[display("Generated script '{}' has no scenes", _0)]
    NoScenes(String),
    /// Media and scenes are out of step
    #[display("Expected {} media items for {} scenes, got {}", expected, expected, actual)]
    MediaMismatch {
        /// Number of scenes
        expected: usize,
        /// Number of media items
        actual: usize,
    },
    /// Media item does not carry its scene's narration
    #[display("Media item {} does not match its scene text", _0)]
    SceneTextMismatch(usize),
    /// History index outside the session history
    #[display("No history item at index {} (history holds {})", index, len)]
    HistoryIndex {
        /// Requested index
        index: usize,
        /// Number of stored items
        len: usize,
    },
}

/// Error type for story operations.
///
/// # Examples
///
/// ```
/// use nithan_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::NoScenes("Rabbit".into()));
/// assert!(format!("{}", err).contains("no scenes"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
