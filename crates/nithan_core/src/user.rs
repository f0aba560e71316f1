//! Signed-in user profile.

use serde::{Deserialize, Serialize};

/// Profile fields taken from a decoded identity token.
///
/// Lives as long as the authenticated session; cleared on logout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{} <{}>", name, email)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Avatar URL
    pub picture: String,
}
