//! Authentication error types.
//!
//! Decoding a stored token never raises; these errors cover explicit
//! sign-in attempts only.

/// Authentication error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AuthErrorKind {
    /// Credential could not be decoded into a user profile
    #[display("Failed to decode user information from credential")]
    InvalidCredential,
    /// No OAuth client id is configured
    #[display("GOOGLE_CLIENT_ID is not set; sign-in is unavailable")]
    LoginUnavailable,
    /// Operation requires a signed-in user
    #[display("Not signed in")]
    NotAuthenticated,
}

/// Authentication error with location tracking.
///
/// # Examples
///
/// ```
/// use nithan_error::{AuthError, AuthErrorKind};
///
/// let err = AuthError::new(AuthErrorKind::InvalidCredential);
/// assert!(err.to_string().contains("decode user information"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at line {} in {}", kind, line, file)]
pub struct AuthError {
    /// The kind of error that occurred
    pub kind: AuthErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AuthError {
    /// Create a new AuthError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AuthErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
