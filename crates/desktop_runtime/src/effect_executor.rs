//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;
use platform_host::{FeedbackEvent, HostServices};

use crate::{
    desktop_icons::IconLayout,
    persistence::{self, LayoutPersistenceError},
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(runtime, effect);
        }
    });
}

/// Executes one effect against the host services.
///
/// `layout` is the icon layout current when the effect was drained; persistence writes it whole.
///
/// # Errors
///
/// Returns the persistence error when the layout write fails. Feedback never fails.
pub async fn execute_runtime_effect(
    host: &HostServices,
    layout: &IconLayout,
    effect: RuntimeEffect,
) -> Result<(), LayoutPersistenceError> {
    match effect {
        RuntimeEffect::Feedback { cue, window_id } => {
            host.feedback.notify(&FeedbackEvent {
                cue,
                app_id: window_id.to_string(),
            });
            Ok(())
        }
        RuntimeEffect::PersistIconLayout => {
            persistence::persist_icon_layout(host.prefs.as_ref(), layout).await
        }
    }
}

fn run_runtime_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    let host = runtime.host.get_value();
    let layout = runtime.state.get_untracked().icon_layout;
    spawn_local(async move {
        if let Err(err) = execute_runtime_effect(&host, &layout, effect).await {
            logging::warn!("runtime effect failed: {err}");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::block_on;
    use platform_host::{
        FeedbackCue, MemoryPrefsStore, PrefsStore, PrefsStoreFuture, RecordingFeedbackSink,
        ViewportMetrics,
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        desktop_icons::DesktopIconEntry,
        grid::GridCell,
        model::{AppId, DesktopState, InteractionState, OpenWindowRequest, PointerPosition},
        persistence::{decode_icon_layout, ICON_LAYOUT_KEY},
        reducer::{reduce_desktop, DesktopAction},
    };

    struct FailingStore;

    impl PrefsStore for FailingStore {
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
            Box::pin(async { Err("quota exceeded".to_string()) })
        }

        fn delete<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
            Box::pin(async { Ok(()) })
        }
    }

    fn host_with(store: &MemoryPrefsStore, sink: &RecordingFeedbackSink) -> HostServices {
        HostServices::headless(ViewportMetrics::new(320, 800))
            .with_prefs(Rc::new(store.clone()))
            .with_feedback(Rc::new(sink.clone()))
    }

    fn dispatch(
        host: &HostServices,
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) {
        for effect in reduce_desktop(state, interaction, action) {
            block_on(execute_runtime_effect(host, &state.icon_layout, effect))
                .expect("effect should succeed");
        }
    }

    fn icon_state() -> (DesktopState, InteractionState) {
        let entries = ["a", "b", "c", "d"]
            .into_iter()
            .map(|app| DesktopIconEntry::new(app, app.to_uppercase(), app))
            .collect();
        (
            DesktopState::new(ViewportMetrics::new(320, 800), entries),
            InteractionState::default(),
        )
    }

    #[test]
    fn icon_drop_persists_the_resulting_layout() {
        let store = MemoryPrefsStore::default();
        let sink = RecordingFeedbackSink::default();
        let host = host_with(&store, &sink);
        let (mut state, mut interaction) = icon_state();
        let metrics = state.grid_metrics();
        let (x, y) = metrics.cell_origin(GridCell { row: 2, col: 2 });
        let release = PointerPosition::new(x + 10, y + 10);

        dispatch(
            &host,
            &mut state,
            &mut interaction,
            DesktopAction::IconPointerDown {
                app_id: AppId::new("a"),
                pointer: PointerPosition::new(20, 44),
            },
        );
        dispatch(
            &host,
            &mut state,
            &mut interaction,
            DesktopAction::IconPointerMove { pointer: release },
        );
        assert!(!store.contains(ICON_LAYOUT_KEY));
        dispatch(
            &host,
            &mut state,
            &mut interaction,
            DesktopAction::IconPointerUp { pointer: release },
        );

        assert_eq!(
            state.icon_layout.get(&AppId::new("a")),
            Some(GridCell { row: 2, col: 2 })
        );
        let raw = store.raw(ICON_LAYOUT_KEY).expect("layout written");
        let decoded = decode_icon_layout(&raw).expect("valid layout");
        assert!(decoded.dropped.is_empty());
        assert_eq!(decoded.layout, state.icon_layout);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn window_transitions_reach_the_feedback_sink_in_order() {
        let store = MemoryPrefsStore::default();
        let sink = RecordingFeedbackSink::default();
        let host = host_with(&store, &sink);
        let (mut state, mut interaction) = icon_state();
        let terminal = AppId::new("terminal");

        for action in [
            DesktopAction::OpenWindow(OpenWindowRequest::new("terminal", "Terminal")),
            DesktopAction::MinimizeWindow {
                window_id: terminal.clone(),
            },
            DesktopAction::FocusWindow {
                window_id: terminal.clone(),
            },
            DesktopAction::ToggleMaximize {
                window_id: terminal.clone(),
            },
            DesktopAction::CloseWindow {
                window_id: terminal.clone(),
            },
        ] {
            dispatch(&host, &mut state, &mut interaction, action);
        }

        assert_eq!(
            sink.cues(),
            vec![
                FeedbackCue::Open,
                FeedbackCue::Minimize,
                FeedbackCue::Focus,
                FeedbackCue::Maximize,
                FeedbackCue::Close,
            ]
        );
        assert!(sink.events().iter().all(|event| event.app_id == "terminal"));
        assert!(!store.contains(ICON_LAYOUT_KEY));
    }

    #[test]
    fn failed_layout_write_is_reported() {
        let host = HostServices::headless(ViewportMetrics::new(320, 800))
            .with_prefs(Rc::new(FailingStore));
        let (state, _) = icon_state();

        let err = block_on(execute_runtime_effect(
            &host,
            &state.icon_layout,
            RuntimeEffect::PersistIconLayout,
        ))
        .expect_err("write should fail");
        assert!(matches!(err, LayoutPersistenceError::Store(_)));
    }
}
