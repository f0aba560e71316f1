//! Audio decoding errors.

/// Reasons a narrated audio payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AudioErrorKind {
    /// Payload was not valid base64
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// Payload decoded to zero bytes
    #[display("Audio payload is empty")]
    Empty,
    /// Byte count does not divide into whole PCM frames
    #[display("Audio payload of {} bytes is not a whole number of {}-byte frames", len, frame_size)]
    PartialFrame {
        /// Decoded byte length
        len: usize,
        /// Bytes per frame (2 * channels)
        frame_size: usize,
    },
    /// Audio context parameters are unusable
    #[display("Invalid audio context: {}", _0)]
    InvalidContext(String),
}

/// Audio error with location tracking.
///
/// # Examples
///
/// ```
/// use nithan_error::{AudioError, AudioErrorKind};
///
/// let err = AudioError::new(AudioErrorKind::Empty);
/// assert!(err.to_string().contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Audio Error: {} at line {} in {}", kind, line, file)]
pub struct AudioError {
    /// The kind of error that occurred
    pub kind: AudioErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AudioError {
    /// Create a new AudioError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AudioErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
