//! Persistent key-value seam and the credential layout inside it

use crate::credential::Credential;
use crate::error::SessionResult;
use std::rc::Rc;

/// Key holding the raw token
pub const TOKEN_KEY: &str = "token";

/// Key holding the ISO-8601 expiration instant
pub const TOKEN_EXPIRATION_KEY: &str = "token_expiration";

/// String-to-string persistent store (browser local storage in production).
///
/// The store is shared and unsynchronized: concurrent writers are not
/// coordinated and the last write wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// Erase both credential entries.
///
/// Every invalidation path (expiry, server rejection, explicit removal) ends
/// here so the two keys can never be left half-present.
pub fn erase_credential<S: KeyValueStore + ?Sized>(store: &S) {
    store.remove(TOKEN_KEY);
    store.remove(TOKEN_EXPIRATION_KEY);
    tracing::debug!("Erased persisted credential");
}

/// Read the persisted token/expiration pair. Either half missing means absent.
pub(crate) fn read_credential<S: KeyValueStore + ?Sized>(store: &S) -> Option<(String, String)> {
    let token = store.get(TOKEN_KEY)?;
    let expiration = store.get(TOKEN_EXPIRATION_KEY)?;
    Some((token, expiration))
}

/// Write both entries, or neither
pub(crate) fn write_credential<S: KeyValueStore + ?Sized>(
    store: &S,
    credential: &Credential,
) -> SessionResult<()> {
    let written = store
        .set(TOKEN_KEY, credential.token())
        .and_then(|()| store.set(TOKEN_EXPIRATION_KEY, &credential.expiration_string()));

    if let Err(error) = written {
        tracing::warn!("Failed to persist credential: {error}");
        erase_credential(store);
        return Err(error);
    }
    Ok(())
}

#[cfg(any(test, feature = "tests"))]
pub use memory::MemoryStore;

#[cfg(any(test, feature = "tests"))]
mod memory {
    use super::KeyValueStore;
    use crate::error::{SessionError, SessionResult};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// In-memory store. Clones share the same map, which lets tests stand in for
    /// several tabs or application instances over one browser profile.
    #[derive(Clone, Debug, Default)]
    pub struct MemoryStore {
        entries: Rc<RefCell<HashMap<String, String>>>,
        read_only: bool,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// A store whose writes always fail, e.g. storage quota exhausted
        pub fn read_only() -> Self {
            Self {
                entries: Rc::default(),
                read_only: true,
            }
        }

        pub fn len(&self) -> usize {
            self.entries.borrow().len()
        }

        pub fn is_empty(&self) -> bool {
            self.entries.borrow().is_empty()
        }

        pub fn snapshot(&self) -> HashMap<String, String> {
            self.entries.borrow().clone()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> SessionResult<()> {
            if self.read_only {
                return Err(SessionError::storage(format!(
                    "cannot write {key}: store is read-only"
                )));
            }
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) {
            self.entries.borrow_mut().remove(key);
        }
    }
}
