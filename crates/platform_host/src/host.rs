//! Host-service bundle injected into the desktop runtime by the entry layer.

use std::rc::Rc;

use crate::{
    FeedbackSink, FixedViewportProvider, MemoryPrefsStore, NoopFeedbackSink, PrefsStore,
    ViewportMetrics, ViewportMetricsProvider,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed composition (`localStorage`, live window size).
    Browser,
    /// In-process composition with memory storage and a fixed viewport.
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host services.
///
/// All environment-specific selection happens before this bundle reaches `desktop_runtime`, so
/// the runtime never imports browser adapter types.
#[derive(Clone)]
pub struct HostServices {
    /// Local key-value store holding the persisted icon layout.
    pub prefs: Rc<dyn PrefsStore>,
    /// Feedback collaborator notified on window transitions.
    pub feedback: Rc<dyn FeedbackSink>,
    /// Live viewport metrics.
    pub viewport: Rc<dyn ViewportMetricsProvider>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a headless bundle around a fixed viewport.
    pub fn headless(viewport: ViewportMetrics) -> Self {
        Self {
            prefs: Rc::new(MemoryPrefsStore::default()),
            feedback: Rc::new(NoopFeedbackSink),
            viewport: Rc::new(FixedViewportProvider(viewport)),
            host_strategy: HostStrategy::Headless,
        }
    }

    /// Replaces the prefs store.
    pub fn with_prefs(mut self, prefs: Rc<dyn PrefsStore>) -> Self {
        self.prefs = prefs;
        self
    }

    /// Replaces the feedback sink.
    pub fn with_feedback(mut self, feedback: Rc<dyn FeedbackSink>) -> Self {
        self.feedback = feedback;
        self
    }
}
