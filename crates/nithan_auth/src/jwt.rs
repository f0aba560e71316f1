//! Identity token payload decoding.

use base64::Engine;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use nithan_core::UserProfile;
use serde::Deserialize;
use tracing::debug;

const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Deserialize)]
struct Claims {
    name: String,
    email: String,
    picture: String,
}

/// Decodes the profile from a compact `header.payload.signature` token.
///
/// Returns `None` for anything malformed: wrong segment count, bad base64,
/// non-UTF-8 or non-JSON payload, or missing claims.
///
/// # Examples
///
/// ```
/// use nithan_auth::parse_jwt;
///
/// // {"name":"Mali","email":"mali@example.com","picture":"p.png"}
/// let token = "e30.eyJuYW1lIjoiTWFsaSIsImVtYWlsIjoibWFsaUBleGFtcGxlLmNvbSIsInBpY3R1cmUiOiJwLnBuZyJ9.sig";
/// let user = parse_jwt(token).unwrap();
/// assert_eq!(user.name, "Mali");
///
/// assert!(parse_jwt("not-a-token").is_none());
/// ```
pub fn parse_jwt(token: &str) -> Option<UserProfile> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        debug!(segments = segments.len(), "Token does not have three segments");
        return None;
    }

    // Accept the standard alphabet too.
    let payload = segments[1].replace('+', "-").replace('/', "_");
    let bytes = PAYLOAD_ENGINE
        .decode(payload)
        .map_err(|e| debug!(error = %e, "Token payload is not base64url"))
        .ok()?;
    let json = String::from_utf8(bytes)
        .map_err(|e| debug!(error = %e, "Token payload is not UTF-8"))
        .ok()?;
    let claims: Claims = serde_json::from_str(&json)
        .map_err(|e| debug!(error = %e, "Token payload is not a profile"))
        .ok()?;

    Some(UserProfile {
        name: claims.name,
        email: claims.email,
        picture: claims.picture,
    })
}
