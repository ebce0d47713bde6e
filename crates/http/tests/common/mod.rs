//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use herald_core::{KeyValueStore, MemoryStore, Navigator, TOKEN_EXPIRATION_KEY, TOKEN_KEY};
use herald_http::{AdminClient, ClientBuilder};
use std::cell::RefCell;
use std::rc::Rc;

/// Route gateway logs to the test harness output
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("herald_http=debug,herald_core=debug")
        .with_test_writer()
        .try_init();
}

/// Navigator that records what it was asked to do
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    pub replaced: Rc<RefCell<Vec<String>>>,
    pub hard_redirects: Rc<RefCell<Vec<String>>>,
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.replaced.borrow_mut().push(path.to_string());
    }

    fn hard_redirect(&self, url: &str) {
        self.hard_redirects.borrow_mut().push(url.to_string());
    }
}

/// Storage holding a credential the way the session store writes it
pub fn signed_in_storage(token: &str) -> MemoryStore {
    let storage = MemoryStore::new();
    storage.set(TOKEN_KEY, token).unwrap();
    storage
        .set(TOKEN_EXPIRATION_KEY, "2099-01-01T00:00:00.000Z")
        .unwrap();
    storage
}

pub fn admin_client(
    base_url: &str,
    storage: &MemoryStore,
    navigator: &RecordingNavigator,
) -> AdminClient<MemoryStore, RecordingNavigator> {
    ClientBuilder::new()
        .base_url(base_url)
        .build_admin(storage.clone(), navigator.clone())
        .unwrap()
}
