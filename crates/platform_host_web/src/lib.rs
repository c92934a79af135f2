//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Off-target builds compile the same adapters with inert bodies so the workspace tests run
//! natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod feedback;
pub mod storage;
pub mod viewport;

pub use adapters::{
    build_host_services, host_strategy_name, prefs_store, selected_host_strategy,
    PrefsStoreAdapter,
};
pub use feedback::ConsoleFeedbackSink;
pub use storage::local_prefs::WebPrefsStore;
pub use viewport::WebViewportProvider;
