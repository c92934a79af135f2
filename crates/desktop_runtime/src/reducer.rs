//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use platform_host::{FeedbackCue, ViewportMetrics};

use crate::{
    desktop_icons::IconLayout,
    desktop_shell::ShortcutCommand,
    geometry::{moved_origin, resize_from_handle, window_frame},
    gesture::GestureOutcome,
    model::{
        AppId, DesktopState, DragSession, InteractionState, OpenWindowRequest, PointerPosition,
        ResizeEdge, ResizeSession, WindowGeometry, WindowSize,
    },
    window_manager::FocusDirection,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a window, or re-focus it when its id is already open.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: AppId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: AppId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: AppId,
    },
    /// Flip a window between maximized and its stored geometry.
    ToggleMaximize {
        /// Window to toggle.
        window_id: AppId,
    },
    /// Toggle taskbar behavior for a window (focus, minimize, or restore).
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: AppId,
    },
    /// Set a custom window size directly.
    ResizeWindow {
        /// Window to resize.
        window_id: AppId,
        /// Requested size before clamping.
        size: WindowSize,
    },
    /// Begin dragging a window by its titlebar.
    BeginMove {
        /// Window being dragged.
        window_id: AppId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window from one of its handles.
    BeginResize {
        /// Window being resized.
        window_id: AppId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Run a keyboard command against the active window list.
    Shortcut(ShortcutCommand),
    /// Record new viewport metrics. Grid metrics and breakpoint derive from them.
    SetViewport {
        /// Current viewport metrics.
        viewport: ViewportMetrics,
    },
    /// Replace the icon layout with one loaded from storage.
    HydrateIconLayout {
        /// Layout restored at boot.
        layout: IconLayout,
    },
    /// Pointer pressed on a desktop icon.
    IconPointerDown {
        /// Icon under the pointer.
        app_id: AppId,
        /// Pointer position.
        pointer: PointerPosition,
    },
    /// Pointer moved while an icon gesture is live.
    IconPointerMove {
        /// Pointer position.
        pointer: PointerPosition,
    },
    /// Pointer released; resolves the icon gesture into a click or a drop.
    IconPointerUp {
        /// Pointer position.
        pointer: PointerPosition,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Fire-and-forget notification for the feedback collaborator.
    Feedback {
        /// Transition that happened.
        cue: FeedbackCue,
        /// Window the transition applied to.
        window_id: AppId,
    },
    /// Persist the full icon layout.
    PersistIconLayout,
}

fn feedback(cue: FeedbackCue, window_id: &AppId) -> RuntimeEffect {
    RuntimeEffect::Feedback {
        cue,
        window_id: window_id.clone(),
    }
}

/// Applies `action` to the desktop and interaction state and returns the effects to run.
///
/// Actions naming unknown windows or icons leave state untouched and return no effects.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();

    match action {
        DesktopAction::OpenWindow(request) => {
            let window_id = state.windows.open(request).id.clone();
            effects.push(feedback(FeedbackCue::Open, &window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            if state.windows.close(&window_id) {
                end_sessions_for(interaction, &window_id);
                effects.push(feedback(FeedbackCue::Close, &window_id));
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if state.windows.focus(&window_id) {
                effects.push(feedback(FeedbackCue::Focus, &window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if state.windows.minimize(&window_id) {
                end_sessions_for(interaction, &window_id);
                effects.push(feedback(FeedbackCue::Minimize, &window_id));
            }
        }
        DesktopAction::ToggleMaximize { window_id } => {
            if state.windows.toggle_maximize(&window_id).is_some() {
                end_sessions_for(interaction, &window_id);
                effects.push(feedback(FeedbackCue::Maximize, &window_id));
            }
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            let Some(window) = state.windows.get(&window_id) else {
                return effects;
            };
            if !window.minimized && state.windows.is_active(&window_id) {
                state.windows.minimize(&window_id);
                effects.push(feedback(FeedbackCue::Minimize, &window_id));
            } else {
                state.windows.focus(&window_id);
                effects.push(feedback(FeedbackCue::Focus, &window_id));
            }
        }
        DesktopAction::ResizeWindow { window_id, size } => {
            state.windows.resize(&window_id, size, state.viewport);
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.windows.get(&window_id) else {
                return effects;
            };
            if window.maximized || !state.breakpoint().allows_free_geometry() {
                return effects;
            }
            interaction.dragging = Some(DragSession {
                window_id,
                pointer_start: pointer,
                rect_start: window_frame(window, state.viewport),
            });
        }
        DesktopAction::UpdateMove { pointer } => {
            let Some(session) = interaction.dragging.as_ref() else {
                return effects;
            };
            let (dx, dy) = pointer.delta_from(session.pointer_start);
            let (x, y) = moved_origin(session.rect_start, dx, dy, state.viewport);
            state.windows.move_to(&session.window_id, x, y);
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let Some(window) = state.windows.get(&window_id) else {
                return effects;
            };
            if window.maximized || !state.breakpoint().allows_free_geometry() {
                return effects;
            }
            interaction.resizing = Some(ResizeSession {
                window_id,
                edge,
                pointer_start: pointer,
                rect_start: window_frame(window, state.viewport),
            });
        }
        DesktopAction::UpdateResize { pointer } => {
            let Some(session) = interaction.resizing.as_ref() else {
                return effects;
            };
            let (dx, dy) = pointer.delta_from(session.pointer_start);
            let rect = resize_from_handle(session.rect_start, session.edge, dx, dy, state.viewport);
            state.windows.set_geometry(
                &session.window_id,
                WindowGeometry::Positioned {
                    x: rect.x,
                    y: rect.y,
                    custom_size: Some(rect.size()),
                },
            );
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::Shortcut(command) => run_shortcut(state, interaction, command, &mut effects),
        DesktopAction::SetViewport { viewport } => {
            state.viewport = viewport;
            if !state.breakpoint().allows_free_geometry() {
                interaction.dragging = None;
                interaction.resizing = None;
            }
        }
        DesktopAction::HydrateIconLayout { layout } => {
            state.icon_layout = layout;
        }
        DesktopAction::IconPointerDown { app_id, pointer } => {
            if state.icon_entry(&app_id).is_some() {
                interaction.icon_gesture.pointer_down(app_id, pointer);
            }
        }
        DesktopAction::IconPointerMove { pointer } => {
            interaction.icon_gesture.pointer_move(pointer);
        }
        DesktopAction::IconPointerUp { pointer } => {
            match interaction.icon_gesture.pointer_up(pointer) {
                GestureOutcome::Ignored => {}
                GestureOutcome::Click(app_id) => {
                    let Some(entry) = state.icon_entry(&app_id) else {
                        return effects;
                    };
                    let request = OpenWindowRequest::new(entry.app_id.clone(), entry.label.clone())
                        .with_icon(entry.icon_ref.clone());
                    let window_id = state.windows.open(request).id.clone();
                    effects.push(feedback(FeedbackCue::Open, &window_id));
                }
                GestureOutcome::Drop { app_id, release } => {
                    let metrics = state.grid_metrics();
                    let target = metrics.pixel_to_cell(release.x, release.y);
                    state
                        .icon_layout
                        .place(&app_id, target, &state.icon_entries, &metrics);
                    effects.push(RuntimeEffect::PersistIconLayout);
                }
            }
        }
    }

    effects
}

fn run_shortcut(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    command: ShortcutCommand,
    effects: &mut Vec<RuntimeEffect>,
) {
    match command {
        ShortcutCommand::CloseActive => {
            let Some(window_id) = state.windows.active().cloned() else {
                return;
            };
            state.windows.close(&window_id);
            end_sessions_for(interaction, &window_id);
            effects.push(feedback(FeedbackCue::Close, &window_id));
        }
        ShortcutCommand::MinimizeActive => {
            let Some(window_id) = state.windows.active().cloned() else {
                return;
            };
            state.windows.minimize(&window_id);
            end_sessions_for(interaction, &window_id);
            effects.push(feedback(FeedbackCue::Minimize, &window_id));
        }
        ShortcutCommand::FocusNext | ShortcutCommand::FocusPrevious => {
            let direction = if command == ShortcutCommand::FocusNext {
                FocusDirection::Forward
            } else {
                FocusDirection::Backward
            };
            if let Some(window_id) = state.windows.cycle_focus(direction) {
                effects.push(feedback(FeedbackCue::Focus, &window_id));
            }
        }
    }
}

fn end_sessions_for(interaction: &mut InteractionState, window_id: &AppId) {
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| &session.window_id == window_id)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|session| &session.window_id == window_id)
    {
        interaction.resizing = None;
    }
}
