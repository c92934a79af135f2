//! Fire-and-forget feedback hooks (sound cues, toasts) raised by window transitions.

use std::{cell::RefCell, rc::Rc};

/// Window transition that produced a feedback notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackCue {
    /// A window was opened or re-opened.
    Open,
    /// A window was closed.
    Close,
    /// A window was minimized.
    Minimize,
    /// A window's maximized flag was toggled.
    Maximize,
    /// A window was focused and raised.
    Focus,
}

impl FeedbackCue {
    /// Stable token for sound/toast lookup tables.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Focus => "focus",
        }
    }
}

/// One feedback notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEvent {
    /// Transition kind.
    pub cue: FeedbackCue,
    /// Window/application id the transition applied to.
    pub app_id: String,
}

/// Collaborator that reacts to window transitions. Calls never block the caller.
pub trait FeedbackSink {
    /// Delivers one notification.
    fn notify(&self, event: &FeedbackEvent);
}

#[derive(Debug, Clone, Copy, Default)]
/// Sink that ignores everything.
pub struct NoopFeedbackSink;

impl FeedbackSink for NoopFeedbackSink {
    fn notify(&self, _event: &FeedbackEvent) {}
}

#[derive(Debug, Clone, Default)]
/// Sink that keeps every event in order. Clones share the same buffer.
pub struct RecordingFeedbackSink {
    events: Rc<RefCell<Vec<FeedbackEvent>>>,
}

impl RecordingFeedbackSink {
    /// Returns a copy of the recorded events.
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.borrow().clone()
    }

    /// Returns just the recorded cues.
    pub fn cues(&self) -> Vec<FeedbackCue> {
        self.events.borrow().iter().map(|e| e.cue).collect()
    }
}

impl FeedbackSink for RecordingFeedbackSink {
    fn notify(&self, event: &FeedbackEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
