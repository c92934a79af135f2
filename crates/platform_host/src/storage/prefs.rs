//! Local key-value preference storage contracts and in-memory adapters.
//!
//! Values are stored as raw JSON text per key. The desktop runtime keeps its icon layout under a
//! single key and reads it once at boot; every other write replaces the whole value.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for small JSON values keyed by string.
pub trait PrefsStore {
    /// Loads the raw text stored under `key`, if any.
    fn load_raw<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw text stored under `key`.
    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;

    /// Removes `key`. Removing a missing key succeeds.
    fn delete<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that never holds anything; used for hosts without local storage.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_raw<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_raw<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store. Clones share the same backing map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Builds a store pre-seeded with raw entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::default();
        store.inner.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        store
    }

    /// Returns the raw text under `key` without going through the async contract.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Returns whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_raw<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}
