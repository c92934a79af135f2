//! Browser console feedback sink.

use platform_host::{FeedbackEvent, FeedbackSink};

#[derive(Debug, Clone, Copy, Default)]
/// Writes each feedback cue to the developer console. Sound/toast layers replace this sink.
pub struct ConsoleFeedbackSink;

impl FeedbackSink for ConsoleFeedbackSink {
    fn notify(&self, event: &FeedbackEvent) {
        #[cfg(target_arch = "wasm32")]
        {
            let line = format!("desktop feedback: {} ({})", event.cue.token(), event.app_id);
            web_sys::console::debug_1(&wasm_bindgen::JsValue::from_str(&line));
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = event;
        }
    }
}
