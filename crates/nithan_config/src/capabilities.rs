//! Startup capabilities resolved from the environment.

use std::fmt;

/// Secrets that decide which features are offered.
///
/// Resolved once at startup and passed to the components that need them.
/// Empty values count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    api_key: Option<String>,
    google_client_id: Option<String>,
}

impl Capabilities {
    /// Builds capabilities from explicit values.
    ///
    /// ```
    /// use nithan_config::Capabilities;
    ///
    /// let caps = Capabilities::new(Some("key".into()), Some("  ".into()));
    /// assert!(caps.generation_enabled());
    /// assert!(!caps.login_available());
    /// ```
    pub fn new(api_key: Option<String>, google_client_id: Option<String>) -> Self {
        Self {
            api_key: non_empty(api_key),
            google_client_id: non_empty(google_client_id),
        }
    }

    /// Reads `API_KEY` (falling back to `GEMINI_API_KEY`) and `GOOGLE_CLIENT_ID`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves capabilities through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(lookup("API_KEY")).or_else(|| non_empty(lookup("GEMINI_API_KEY")));
        Self::new(api_key, lookup("GOOGLE_CLIENT_ID"))
    }

    /// The generative service API key, if one was provided.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The OAuth client id, if one was provided.
    pub fn google_client_id(&self) -> Option<&str> {
        self.google_client_id.as_deref()
    }

    /// Whether story generation can be offered.
    pub fn generation_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Whether sign-in can be offered.
    pub fn login_available(&self) -> bool {
        self.google_client_id.is_some()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("google_client_id", &self.google_client_id)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
