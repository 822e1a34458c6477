use std::{collections::HashMap, fmt, sync::Mutex};

use keyring::Entry;

use crate::{ClientResult, config::ClientConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionKey {
    AccessToken,
    RefreshToken,
    UserProfile,
}

impl SessionKey {
    pub const ALL: [SessionKey; 3] = [Self::AccessToken, Self::RefreshToken, Self::UserProfile];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
            Self::UserProfile => "user",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait SessionStore {
    /// Backend failures are reported as an absent value.
    fn get(&self, key: SessionKey) -> Option<String>;
    fn set(&self, key: SessionKey, value: &str) -> ClientResult<()>;
    fn remove(&self, key: SessionKey) -> ClientResult<()>;

    /// Drops both tokens; the cached profile is left in place.
    fn clear(&self) -> ClientResult<()> {
        self.remove(SessionKey::AccessToken)?;
        self.remove(SessionKey::RefreshToken)
    }

    fn clear_all(&self) -> ClientResult<()> {
        self.clear()?;
        self.remove(SessionKey::UserProfile)
    }

    /// Presence check only; token expiry is left to the server.
    fn is_authenticated(&self) -> bool {
        self.get(SessionKey::AccessToken).is_some()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn get(&self, key: SessionKey) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: SessionKey, value: &str) -> ClientResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: SessionKey) -> ClientResult<()> {
        (**self).remove(key)
    }
}

#[derive(Clone, Debug)]
pub struct KeyringSessionStore {
    service: String,
    origin: String,
}

impl KeyringSessionStore {
    pub fn new(service: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            origin: origin.into(),
        }
    }

    pub fn for_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.keyring_service.clone(), config.origin()?))
    }

    fn account_for_key(&self, key: SessionKey) -> String {
        format!("{}:{key}", self.origin)
    }

    fn entry_for_key(&self, key: SessionKey) -> ClientResult<Entry> {
        Ok(Entry::new(&self.service, &self.account_for_key(key))?)
    }
}

impl SessionStore for KeyringSessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        let entry = match self.entry_for_key(key) {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("cannot open keyring entry for {key}: {}", err.display_chain());
                return None;
            }
        };

        match entry.get_password() {
            Ok(value) => Some(value),
            Err(keyring::Error::NoEntry) => None,
            Err(err) => {
                log::warn!("keyring read for {key} failed: {err}");
                None
            }
        }
    }

    fn set(&self, key: SessionKey, value: &str) -> ClientResult<()> {
        let entry = self.entry_for_key(key)?;
        entry.set_password(value)?;
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> ClientResult<()> {
        let entry = self.entry_for_key(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local session that disappears with the client.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<SessionKey, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access_token: &str, refresh_token: &str) -> Self {
        let store = Self::default();
        {
            let mut values = store.lock();
            values.insert(SessionKey::AccessToken, access_token.to_owned());
            values.insert(SessionKey::RefreshToken, refresh_token.to_owned());
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SessionKey, String>> {
        match self.values.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.lock().get(&key).cloned()
    }

    fn set(&self, key: SessionKey, value: &str) -> ClientResult<()> {
        self.lock().insert(key, value.to_owned());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> ClientResult<()> {
        self.lock().remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyringSessionStore, MemorySessionStore, SessionKey, SessionStore};

    #[test]
    fn clear_keeps_cached_profile() {
        let store = MemorySessionStore::with_tokens("A1", "R1");
        store
            .set(SessionKey::UserProfile, r#"{"id":1,"username":"alice"}"#)
            .expect("set should work");

        store.clear().expect("clear should work");

        assert_eq!(store.get(SessionKey::AccessToken), None);
        assert_eq!(store.get(SessionKey::RefreshToken), None);
        assert!(store.get(SessionKey::UserProfile).is_some());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clear_all_removes_every_key() {
        let store = MemorySessionStore::with_tokens("A1", "R1");
        store
            .set(SessionKey::UserProfile, "{}")
            .expect("set should work");

        store.clear_all().expect("clear should work");

        for key in SessionKey::ALL {
            assert_eq!(store.get(key), None, "{key} should be gone");
        }
    }

    #[test]
    fn refresh_token_alone_is_not_authenticated() {
        let store = MemorySessionStore::new();
        store
            .set(SessionKey::RefreshToken, "R1")
            .expect("set should work");
        assert!(!store.is_authenticated());

        store
            .set(SessionKey::AccessToken, "A1")
            .expect("set should work");
        assert!(store.is_authenticated());
    }

    #[test]
    fn boxed_stores_forward_to_the_inner_store() {
        let store: Box<dyn SessionStore> = Box::new(MemorySessionStore::with_tokens("A1", "R1"));
        assert!(store.is_authenticated());
        store.clear().expect("clear should work");
        assert_eq!(store.get(SessionKey::RefreshToken), None);
    }

    #[test]
    fn keyring_accounts_are_scoped_by_origin() {
        let store = KeyringSessionStore::new("eventhub", "http://localhost:8000");
        assert_eq!(
            store.account_for_key(SessionKey::AccessToken),
            "http://localhost:8000:access_token"
        );
        assert_eq!(
            store.account_for_key(SessionKey::UserProfile),
            "http://localhost:8000:user"
        );
    }
}
