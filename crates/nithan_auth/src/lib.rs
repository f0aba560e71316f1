//! Sign-in for the Nithan story studio.
//!
//! The identity token is a Google ID token (a compact JWT). Only its payload
//! is read, to show who is signed in; the signature is not verified and the
//! token is never sent anywhere.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod jwt;
mod session;

pub use jwt::parse_jwt;
pub use session::{AuthSession, login_available, require_login_available};
