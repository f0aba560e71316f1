//! Tests for startup capability resolution.

use nithan_config::Capabilities;
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_nothing_set() {
    let caps = Capabilities::from_lookup(lookup(&[]));
    assert!(!caps.generation_enabled());
    assert!(!caps.login_available());
    assert_eq!(caps.api_key(), None);
}

#[test]
fn test_api_key_preferred_over_gemini_api_key() {
    let caps = Capabilities::from_lookup(lookup(&[
        ("API_KEY", "primary"),
        ("GEMINI_API_KEY", "fallback"),
    ]));
    assert_eq!(caps.api_key(), Some("primary"));
}

#[test]
fn test_gemini_api_key_fallback() {
    let caps = Capabilities::from_lookup(lookup(&[("API_KEY", ""), ("GEMINI_API_KEY", "fallback")]));
    assert_eq!(caps.api_key(), Some("fallback"));
    assert!(caps.generation_enabled());
}

#[test]
fn test_client_id_enables_login() {
    let caps = Capabilities::from_lookup(lookup(&[(
        "GOOGLE_CLIENT_ID",
        "123.apps.googleusercontent.com",
    )]));
    assert!(caps.login_available());
    assert!(!caps.generation_enabled());
    assert_eq!(
        caps.google_client_id(),
        Some("123.apps.googleusercontent.com")
    );
}

#[test]
fn test_debug_redacts_api_key() {
    let caps = Capabilities::new(Some("secret-key".into()), None);
    let debug = format!("{:?}", caps);
    assert!(!debug.contains("secret-key"));
    assert!(debug.contains("redacted"));
}
