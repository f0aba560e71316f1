//! Signed-in session backed by a key/value store.

use crate::parse_jwt;
use nithan_config::Capabilities;
use nithan_core::UserProfile;
use nithan_error::{AuthError, AuthErrorKind, NithanResult};
use nithan_interface::KeyValueStore;
use tracing::{info, instrument, warn};

/// Whether a sign-in flow can be offered.
pub fn login_available(caps: &Capabilities) -> bool {
    caps.login_available()
}

/// Fails with [`AuthErrorKind::LoginUnavailable`] when sign-in is not configured.
pub fn require_login_available(caps: &Capabilities) -> NithanResult<()> {
    if login_available(caps) {
        Ok(())
    } else {
        Err(AuthError::new(AuthErrorKind::LoginUnavailable).into())
    }
}

/// The current user, derived from the token held in `store`.
///
/// A valid, decodable token means signed in; anything else means signed out.
///
/// # Examples
///
/// ```
/// use nithan_auth::AuthSession;
/// use nithan_storage::MemoryStore;
///
/// let mut session = AuthSession::new(MemoryStore::new(), "user_token");
/// assert!(session.restore().is_none());
/// assert!(session.login("garbage").is_err());
/// assert!(!session.is_authenticated());
/// ```
#[derive(Debug)]
pub struct AuthSession<S: KeyValueStore> {
    store: S,
    token_key: String,
    user: Option<UserProfile>,
}

impl<S: KeyValueStore> AuthSession<S> {
    /// Creates a signed-out session over `store`.
    pub fn new(store: S, token_key: impl Into<String>) -> Self {
        Self {
            store,
            token_key: token_key.into(),
            user: None,
        }
    }

    /// Reads the stored token and signs in if it decodes.
    ///
    /// Store failures and undecodable tokens leave the session signed out.
    #[instrument(skip(self), fields(key = %self.token_key))]
    pub fn restore(&mut self) -> Option<&UserProfile> {
        self.user = match self.store.get(&self.token_key) {
            Ok(Some(token)) => parse_jwt(&token),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Could not read stored token");
                None
            }
        };
        if let Some(user) = &self.user {
            info!(email = %user.email, "Restored session");
        }
        self.user.as_ref()
    }

    /// Signs in with a credential from the identity provider.
    ///
    /// The credential is stored only if it decodes.
    ///
    /// # Errors
    ///
    /// [`AuthErrorKind::InvalidCredential`] for an undecodable credential, or
    /// a storage error if the token cannot be saved.
    #[instrument(skip(self, credential), fields(key = %self.token_key))]
    pub fn login(&mut self, credential: &str) -> NithanResult<&UserProfile> {
        let user = parse_jwt(credential)
            .ok_or_else(|| AuthError::new(AuthErrorKind::InvalidCredential))?;
        self.store.set(&self.token_key, credential.trim())?;
        info!(email = %user.email, "Signed in");
        Ok(self.user.insert(user))
    }

    /// Signs out and forgets the stored token.
    #[instrument(skip(self), fields(key = %self.token_key))]
    pub fn logout(&mut self) -> NithanResult<()> {
        self.user = None;
        self.store.remove(&self.token_key)?;
        info!("Signed out");
        Ok(())
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// The signed-in user, or [`AuthErrorKind::NotAuthenticated`].
    pub fn require_user(&self) -> NithanResult<&UserProfile> {
        self.user
            .as_ref()
            .ok_or_else(|| AuthError::new(AuthErrorKind::NotAuthenticated).into())
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
