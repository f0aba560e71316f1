//! Top-level error wrapper types.

use crate::{
    AudioError, AuthError, BuilderError, ConfigError, GeminiError, HttpError, JsonError,
    StorageError, StoryError,
};

/// Every error condition a Nithan operation can end in.
///
/// # Examples
///
/// ```
/// use nithan_error::{NithanError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: NithanError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum NithanErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Generative service error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Audio decode error
    #[from(AudioError)]
    Audio(AudioError),
    /// Story pipeline error
    #[from(StoryError)]
    Story(StoryError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Authentication error
    #[from(AuthError)]
    Auth(AuthError),
}

/// Nithan error with kind discrimination.
///
/// # Examples
///
/// ```
/// use nithan_error::{NithanErrorKind, NithanResult, ConfigError};
///
/// fn might_fail() -> NithanResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), NithanErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Nithan Error: {}", _0)]
pub struct NithanError(Box<NithanErrorKind>);

impl NithanError {
    /// Create a new error from a kind.
    pub fn new(kind: NithanErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &NithanErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to NithanErrorKind
impl<T> From<T> for NithanError
where
    T: Into<NithanErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Nithan operations.
pub type NithanResult<T> = std::result::Result<T, NithanError>;
