//! Startup context shared by the command handlers.

use nithan_auth::{AuthSession, require_login_available};
use nithan_config::{Capabilities, NithanConfig};
use nithan_core::UserProfile;
use nithan_error::{GeminiError, GeminiErrorKind, NithanResult};
use nithan_storage::FileStore;
use std::path::Path;
use tracing::{debug, instrument};

/// Configuration and capabilities resolved once at startup.
#[derive(Debug, Clone)]
pub struct Context {
    caps: Capabilities,
    config: NithanConfig,
}

impl Context {
    /// Creates a context from already-resolved parts.
    pub fn new(caps: Capabilities, config: NithanConfig) -> Self {
        Self { caps, config }
    }

    /// Loads configuration (from `config_path` if given) and reads the
    /// capabilities from the environment.
    pub fn load(config_path: Option<&Path>) -> NithanResult<Self> {
        let config = match config_path {
            Some(path) => NithanConfig::from_file(path)?,
            None => NithanConfig::load()?,
        };
        let caps = Capabilities::from_env();
        debug!(
            generation = caps.generation_enabled(),
            login = caps.login_available(),
            "Capabilities resolved"
        );
        Ok(Self::new(caps, config))
    }

    /// Startup capabilities.
    pub fn caps(&self) -> &Capabilities {
        &self.caps
    }

    /// Loaded configuration.
    pub fn config(&self) -> &NithanConfig {
        &self.config
    }

    /// Auth session over the on-disk token store.
    pub fn auth_session(&self) -> NithanResult<AuthSession<FileStore>> {
        let store = FileStore::open(self.config.session.resolved_state_dir())?;
        Ok(AuthSession::new(store, self.config.session.token_key.clone()))
    }

    /// The signed-in user, provided generation can be offered at all.
    ///
    /// # Errors
    ///
    /// Fails without an API key, without a sign-in provider, or when nobody
    /// is signed in.
    #[instrument(skip(self))]
    pub fn require_generation(&self) -> NithanResult<UserProfile> {
        if !self.caps.generation_enabled() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into());
        }
        require_login_available(&self.caps)?;
        let mut session = self.auth_session()?;
        session.restore();
        session.require_user().cloned()
    }
}
