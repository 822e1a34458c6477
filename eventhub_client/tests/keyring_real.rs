use std::time::{SystemTime, UNIX_EPOCH};

use eventhub_client::{KeyringSessionStore, SessionKey, SessionStore};

const TEST_SERVICE: &str = "eventhub-keyring-integration-tests";

#[test]
fn keyring_round_trip_set_get_clear() {
    let origin = format!(
        "http://session-{}-{}.test",
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos()
    );
    let store = KeyringSessionStore::new(TEST_SERVICE, origin.clone());
    let other_origin = KeyringSessionStore::new(TEST_SERVICE, format!("{origin}:8443"));

    store.clear_all().expect("cleanup before test should succeed");
    other_origin
        .clear_all()
        .expect("cleanup before test should succeed");

    store
        .set(SessionKey::AccessToken, "access-token-test")
        .expect("saving access token in keyring should succeed");
    store
        .set(SessionKey::RefreshToken, "refresh-token-test")
        .expect("saving refresh token in keyring should succeed");
    store
        .set(SessionKey::UserProfile, r#"{"id":1,"username":"integration"}"#)
        .expect("saving profile in keyring should succeed");
    other_origin
        .set(SessionKey::AccessToken, "other-access-token-test")
        .expect("saving second origin in keyring should succeed");

    assert!(store.is_authenticated());
    assert_eq!(
        store.get(SessionKey::AccessToken).as_deref(),
        Some("access-token-test")
    );
    assert_eq!(
        other_origin.get(SessionKey::AccessToken).as_deref(),
        Some("other-access-token-test")
    );

    store.clear().expect("clearing tokens should succeed");
    assert!(!store.is_authenticated());
    assert!(store.get(SessionKey::UserProfile).is_some());
    assert!(other_origin.is_authenticated());

    store.clear_all().expect("clearing session should succeed");
    other_origin
        .clear_all()
        .expect("cleanup after test should succeed");
    assert_eq!(store.get(SessionKey::UserProfile), None);
    assert!(!other_origin.is_authenticated());
}
