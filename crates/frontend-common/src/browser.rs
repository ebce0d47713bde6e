//! Browser implementations of the session seams

use herald_core::{KeyValueStore, Navigator, SessionError, SessionResult};
use web_sys::Storage;
use yew_router::history::{BrowserHistory, History};

/// `window.localStorage`, shared by every tab on the origin
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        let storage =
            local_storage().ok_or_else(|| SessionError::storage("localStorage is unavailable"))?;
        storage
            .set_item(key, value)
            .map_err(|e| SessionError::storage(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(key) {
                tracing::warn!(key, error = ?e, "Failed to remove storage entry");
            }
        }
    }
}

/// Navigation through the router's browser history and `window.location`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn replace(&self, path: &str) {
        // Same shared history instance the BrowserRouter listens on
        BrowserHistory::new().replace(path.to_string());
    }

    fn hard_redirect(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            tracing::error!(url, error = ?e, "Hard redirect failed");
        }
    }
}
