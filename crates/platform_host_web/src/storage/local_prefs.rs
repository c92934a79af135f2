//! `localStorage`-backed key-value store.
//!
//! The browser API is synchronous; the async [`platform_host::PrefsStore`] contract is satisfied
//! with already-resolved futures.

use platform_host::{PrefsStore, PrefsStoreFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Key-value store backed by `window.localStorage`.
pub struct WebPrefsStore;

impl WebPrefsStore {
    /// Reads the raw text under `key`. Missing storage reads as an empty store.
    pub fn load_text(self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    /// Replaces the raw text under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write is rejected (quota).
    pub fn save_text(self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()
                .ok_or_else(|| "localStorage unavailable".to_string())?
                .set_item(key, raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete is rejected.
    pub fn remove(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()
                .ok_or_else(|| "localStorage unavailable".to_string())?
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl PrefsStore for WebPrefsStore {
    fn load_raw<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { Ok(store.load_text(key)) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.save_text(key, raw_json) })
    }

    fn delete<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.remove(key) })
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
