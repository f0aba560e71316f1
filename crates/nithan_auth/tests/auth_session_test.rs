use nithan_auth::{AuthSession, login_available, parse_jwt, require_login_available};
use nithan_config::Capabilities;
use nithan_error::{AuthErrorKind, NithanErrorKind};
use nithan_interface::KeyValueStore;
use nithan_storage::{FileStore, MemoryStore};

// {"name":"Mali","email":"mali@example.com","picture":"p.png"}
const PAYLOAD: &str =
    "eyJuYW1lIjoiTWFsaSIsImVtYWlsIjoibWFsaUBleGFtcGxlLmNvbSIsInBpY3R1cmUiOiJwLnBuZyJ9";

fn token() -> String {
    format!("eyJhbGciOiJSUzI1NiJ9.{}.c2lnbmF0dXJl", PAYLOAD)
}

fn auth_kind(err: &nithan_error::NithanError) -> &AuthErrorKind {
    match err.kind() {
        NithanErrorKind::Auth(e) => &e.kind,
        other => panic!("expected auth error, got {other}"),
    }
}

#[test]
fn test_well_formed_token_decodes_exactly() {
    let user = parse_jwt(&token()).unwrap();
    assert_eq!(user.name, "Mali");
    assert_eq!(user.email, "mali@example.com");
    assert_eq!(user.picture, "p.png");
}

#[test]
fn test_padded_payload_decodes() {
    let padded = "h.eyJuYW1lIjoi4Lih4Liw4Lil4Li0IiwiZW1haWwiOiJtQGUudGgiLCJwaWN0dXJlIjoiIn0=.s";
    assert_eq!(parse_jwt(padded).unwrap().email, "m@e.th");
}

#[test]
fn test_utf8_names_survive() {
    // {"name":"มะลิ","email":"m@e.th","picture":""}
    let token = "h.eyJuYW1lIjoi4Lih4Liw4Lil4Li0IiwiZW1haWwiOiJtQGUudGgiLCJwaWN0dXJlIjoiIn0.s";
    assert_eq!(parse_jwt(token).unwrap().name, "มะลิ");
}

#[test]
fn test_missing_segment_yields_none() {
    assert!(parse_jwt(&format!("header.{}", PAYLOAD)).is_none());
    assert!(parse_jwt("").is_none());
}

#[test]
fn test_non_json_payload_yields_none() {
    // "hello world"
    assert!(parse_jwt("h.aGVsbG8gd29ybGQ.s").is_none());
    assert!(parse_jwt("h.!!!.s").is_none());
}

#[test]
fn test_missing_claim_yields_none() {
    // {"name":"Mali"}
    assert!(parse_jwt("h.eyJuYW1lIjoiTWFsaSJ9.s").is_none());
}

#[test]
fn test_login_persists_and_restores() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = AuthSession::new(FileStore::open(dir.path()).unwrap(), "user_token");
    assert!(session.restore().is_none());
    let user = session.login(&token()).unwrap().clone();
    assert_eq!(user.email, "mali@example.com");

    let mut reopened = AuthSession::new(FileStore::open(dir.path()).unwrap(), "user_token");
    assert_eq!(reopened.restore(), Some(&user));
    assert!(reopened.is_authenticated());
}

#[test]
fn test_invalid_credential_is_not_stored() {
    let mut session = AuthSession::new(MemoryStore::new(), "user_token");
    let err = session.login("a.b").unwrap_err();

    assert_eq!(auth_kind(&err), &AuthErrorKind::InvalidCredential);
    assert_eq!(session.store().get("user_token").unwrap(), None);
    assert!(!session.is_authenticated());
}

#[test]
fn test_undecodable_stored_token_means_signed_out() {
    let store = MemoryStore::new();
    store.set("user_token", "corrupted").unwrap();

    let mut session = AuthSession::new(store, "user_token");
    assert!(session.restore().is_none());
    let err = session.require_user().unwrap_err();
    assert_eq!(auth_kind(&err), &AuthErrorKind::NotAuthenticated);
}

#[test]
fn test_logout_clears_token_and_user() {
    let mut session = AuthSession::new(MemoryStore::new(), "user_token");
    session.login(&token()).unwrap();
    session.logout().unwrap();

    assert!(session.user().is_none());
    assert_eq!(session.store().get("user_token").unwrap(), None);
    assert!(session.restore().is_none());
}

#[test]
fn test_login_gated_on_client_id() {
    let without = Capabilities::new(Some("key".into()), None);
    assert!(!login_available(&without));
    let err = require_login_available(&without).unwrap_err();
    assert_eq!(auth_kind(&err), &AuthErrorKind::LoginUnavailable);

    let with = Capabilities::new(None, Some("client".into()));
    assert!(login_available(&with));
    assert!(require_login_available(&with).is_ok());
}
