//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services: local key-value storage, viewport
//! metrics, and feedback hooks. Concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod feedback;
pub mod host;
pub mod storage;
pub mod viewport;

pub use feedback::{
    FeedbackCue, FeedbackEvent, FeedbackSink, NoopFeedbackSink, RecordingFeedbackSink,
};
pub use host::{HostServices, HostStrategy};
pub use storage::prefs::{MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture};
pub use viewport::{FixedViewportProvider, ViewportMetrics, ViewportMetricsProvider};
