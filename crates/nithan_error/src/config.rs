//! Configuration error types.

/// Configuration error with source location.
///
/// Raised when the layered `nithan.toml` sources cannot be read or do not
/// deserialize, and when a required capability (API key, OAuth client id)
/// is missing at the point it is needed.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use nithan_error::ConfigError;
    ///
    /// let err = ConfigError::new("API_KEY is not set");
    /// assert!(err.to_string().starts_with("Configuration Error: API_KEY"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
