//! Transport-level HTTP errors.

/// A request that never produced a usable HTTP response (connection refused,
/// TLS failure, body read interrupted).
///
/// Non-success status codes from the generative service are reported as
/// [`GeminiErrorKind::HttpError`](crate::GeminiErrorKind) instead, because they
/// carry the service's own error message.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} ({}) at line {} in {}", message, endpoint, line, file)]
pub struct HttpError {
    /// The underlying transport message
    pub message: String,
    /// Endpoint that was being called, or `"-"` when unknown
    pub endpoint: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use nithan_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.message.contains("Connection refused"));
    /// assert_eq!(err.endpoint, "-");
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            endpoint: "-".to_string(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Record which endpoint the failed request targeted.
    ///
    /// ```
    /// use nithan_error::HttpError;
    ///
    /// let err = HttpError::new("timed out").with_endpoint("models/gemini-2.5-flash");
    /// assert!(err.to_string().contains("models/gemini-2.5-flash"));
    /// ```
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
