//! Gemini-specific error types.

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// No API key capability was resolved at startup
    #[display("API_KEY (or GEMINI_API_KEY) is not set")]
    MissingApiKey,
    /// Failed to create the HTTP client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Response contained no candidates or no parts
    #[display("Gemini returned an empty response for {}", _0)]
    EmptyResponse(String),
    /// Response had parts, but none carried inline media
    #[display("Gemini response for {} carried no inline {} data", model, expected)]
    MissingInlineData {
        /// Model that was called
        model: String,
        /// Kind of media expected ("image" or "audio")
        expected: String,
    },
    /// Script text was not valid story JSON
    #[display("Malformed story script: {}", _0)]
    MalformedScript(String),
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use nithan_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// HTTP status code, when the service answered with one.
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            GeminiErrorKind::HttpError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
