use std::rc::Rc;

use platform_host::{
    HostServices, HostStrategy, NoopFeedbackSink, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};

use crate::{ConsoleFeedbackSink, WebPrefsStore, WebViewportProvider};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete key-value backend behind [`PrefsStore`].
#[derive(Debug, Clone, Copy)]
pub enum PrefsStoreAdapter {
    /// `localStorage`-backed store.
    Browser(WebPrefsStore),
    /// No-op store for stubbed hosts.
    Headless(NoopPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_raw<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_raw(key),
            Self::Headless(store) => store.load_raw(key),
        }
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_raw(key, raw_json),
            Self::Headless(store) => store.save_raw(key, raw_json),
        }
    }

    fn delete<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.delete(key),
            Self::Headless(store) => store.delete(key),
        }
    }
}

/// Returns the key-value store for the selected host strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        HostStrategy::Headless => PrefsStoreAdapter::Headless(NoopPrefsStore),
    }
}

/// Builds the [`HostServices`] bundle injected into the desktop runtime.
pub fn build_host_services() -> HostServices {
    let strategy = selected_host_strategy();
    HostServices {
        prefs: Rc::new(prefs_store()),
        feedback: match strategy {
            HostStrategy::Browser => Rc::new(ConsoleFeedbackSink),
            HostStrategy::Headless => Rc::new(NoopFeedbackSink),
        },
        viewport: Rc::new(WebViewportProvider),
        host_strategy: strategy,
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn default_build_selects_browser_strategy() {
        assert_eq!(selected_host_strategy(), HostStrategy::Browser);
        assert_eq!(host_strategy_name(), "browser");
        assert!(matches!(prefs_store(), PrefsStoreAdapter::Browser(_)));
    }

    #[test]
    fn browser_store_is_empty_off_target() {
        let services = build_host_services();
        assert_eq!(
            block_on(services.prefs.load_raw("desktop.icon_layout.v1")).expect("load"),
            None
        );
        block_on(services.prefs.save_raw("k", "{}")).expect("save");
    }
}
