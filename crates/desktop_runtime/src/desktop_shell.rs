//! Event routing for the desktop shell.
//!
//! Translates keyboard chords and pointer events into [`DesktopAction`] values. Presses are read
//! off the `data-desktop-icon`, `data-app-id` and `data-window-part` attributes of the rendered
//! shell; moves and releases are tracked by window-level listeners so sessions survive the pointer
//! leaving the element that started them.

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::{
    gesture::IconGesture,
    model::{AppId, DesktopState, InteractionState, PointerPosition, ResizeEdge, WindowRecord},
    reducer::DesktopAction,
    runtime_context::DesktopRuntimeContext,
};

/// Keyboard commands mapped 1:1 onto window operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutCommand {
    /// Close the active window.
    CloseActive,
    /// Minimize the active window.
    MinimizeActive,
    /// Focus the next window in list order.
    FocusNext,
    /// Focus the previous window in list order.
    FocusPrevious,
}

/// Key plus modifier state, decoupled from the DOM event type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: String,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

/// Default chord bindings: `Alt+F4`, `Alt+F9`, `Alt+Tab`, `Alt+Shift+Tab`.
pub fn shortcut_for_chord(chord: &KeyChord) -> Option<ShortcutCommand> {
    if !chord.alt || chord.ctrl || chord.meta {
        return None;
    }
    match (chord.key.as_str(), chord.shift) {
        ("F4", false) => Some(ShortcutCommand::CloseActive),
        ("F9", false) => Some(ShortcutCommand::MinimizeActive),
        ("Tab", false) => Some(ShortcutCommand::FocusNext),
        ("Tab", true) => Some(ShortcutCommand::FocusPrevious),
        _ => None,
    }
}

pub fn chord_from_keyboard_event(ev: &web_sys::KeyboardEvent) -> KeyChord {
    KeyChord {
        key: ev.key(),
        alt: ev.alt_key(),
        ctrl: ev.ctrl_key(),
        shift: ev.shift_key(),
        meta: ev.meta_key(),
    }
}

pub fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Part of a window frame that received a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPointerTarget {
    /// Titlebar drag affordance; the only place a move can start.
    Titlebar,
    /// One of the eight resize handles.
    ResizeHandle(ResizeEdge),
    /// Hosted content. Focuses the window but never starts a drag.
    Content,
}

impl WindowPointerTarget {
    /// Parses the `data-window-part` token (`titlebar`, `content`, or a handle token).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "titlebar" => Some(Self::Titlebar),
            "content" => Some(Self::Content),
            other => ResizeEdge::from_token(other).map(Self::ResizeHandle),
        }
    }
}

/// Actions for a primary-button press on `window`.
///
/// Inactive or minimized windows are focused first so the press also raises them.
pub fn window_pointer_down_actions(
    window: &WindowRecord,
    is_active: bool,
    target: WindowPointerTarget,
    pointer: PointerPosition,
) -> Vec<DesktopAction> {
    let mut actions = Vec::new();
    if !is_active || window.minimized {
        actions.push(DesktopAction::FocusWindow {
            window_id: window.id.clone(),
        });
    }
    match target {
        WindowPointerTarget::Titlebar => actions.push(DesktopAction::BeginMove {
            window_id: window.id.clone(),
            pointer,
        }),
        WindowPointerTarget::ResizeHandle(edge) => actions.push(DesktopAction::BeginResize {
            window_id: window.id.clone(),
            edge,
            pointer,
        }),
        WindowPointerTarget::Content => {}
    }
    actions
}

pub fn titlebar_double_click_action(window_id: AppId) -> DesktopAction {
    DesktopAction::ToggleMaximize { window_id }
}

/// Shell element under a pointer press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellHit {
    /// A desktop icon.
    Icon(AppId),
    /// Some part of an open window.
    Window {
        window_id: AppId,
        part: WindowPointerTarget,
    },
}

impl ShellHit {
    /// Resolves the nearest `data-desktop-icon`, `data-app-id` and `data-window-part` values.
    ///
    /// Icons win over windows. Window chrome without a recognised part counts as content.
    pub fn from_attributes(
        icon: Option<&str>,
        window_id: Option<&str>,
        part: Option<&str>,
    ) -> Option<Self> {
        if let Some(icon) = icon.filter(|id| !id.is_empty()) {
            return Some(Self::Icon(AppId::new(icon)));
        }
        let window_id = window_id.filter(|id| !id.is_empty())?;
        Some(Self::Window {
            window_id: AppId::new(window_id),
            part: part
                .and_then(WindowPointerTarget::from_token)
                .unwrap_or(WindowPointerTarget::Content),
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub fn shell_hit_from_event(ev: &web_sys::Event) -> Option<ShellHit> {
    let element = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let nearest = |name: &str| {
        element
            .closest(&format!("[{name}]"))
            .ok()
            .flatten()
            .and_then(|found| found.get_attribute(name))
    };
    ShellHit::from_attributes(
        nearest("data-desktop-icon").as_deref(),
        nearest("data-app-id").as_deref(),
        nearest("data-window-part").as_deref(),
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn shell_hit_from_event(_: &web_sys::Event) -> Option<ShellHit> {
    None
}

/// Actions for a primary-button press on `hit`. Unknown windows yield nothing.
pub fn shell_pointer_down_actions(
    desktop: &DesktopState,
    hit: ShellHit,
    pointer: PointerPosition,
) -> Vec<DesktopAction> {
    match hit {
        ShellHit::Icon(app_id) => vec![DesktopAction::IconPointerDown { app_id, pointer }],
        ShellHit::Window { window_id, part } => desktop
            .windows
            .get(&window_id)
            .map(|window| {
                window_pointer_down_actions(
                    window,
                    desktop.windows.is_active(&window_id),
                    part,
                    pointer,
                )
            })
            .unwrap_or_default(),
    }
}

/// Double-clicking a titlebar toggles maximize; anything else is ignored.
pub fn shell_double_click_action(hit: ShellHit) -> Option<DesktopAction> {
    match hit {
        ShellHit::Window {
            window_id,
            part: WindowPointerTarget::Titlebar,
        } => Some(titlebar_double_click_action(window_id)),
        _ => None,
    }
}

/// `pointerdown` handler for the shell root. Captures the pointer when a session may start.
pub fn handle_shell_pointer_down(runtime: DesktopRuntimeContext, ev: &web_sys::PointerEvent) {
    if ev.button() != 0 {
        return;
    }
    let Some(hit) = shell_hit_from_event(ev) else {
        return;
    };
    let pointer = pointer_from_pointer_event(ev);
    let actions = runtime
        .state
        .with_untracked(|desktop| shell_pointer_down_actions(desktop, hit, pointer));
    if actions.is_empty() {
        return;
    }
    try_set_pointer_capture(ev);
    for action in actions {
        runtime.dispatch_action(action);
    }
}

/// `dblclick` handler for the shell root.
pub fn handle_shell_double_click(runtime: DesktopRuntimeContext, ev: &web_sys::MouseEvent) {
    if let Some(action) = shell_hit_from_event(ev).and_then(shell_double_click_action) {
        ev.prevent_default();
        runtime.dispatch_action(action);
    }
}

/// Routes a window-level pointer move to whichever session is live.
pub fn pointer_move_actions(
    interaction: &InteractionState,
    pointer: PointerPosition,
) -> Vec<DesktopAction> {
    let mut actions = Vec::new();
    if interaction.dragging.is_some() {
        actions.push(DesktopAction::UpdateMove { pointer });
    }
    if interaction.resizing.is_some() {
        actions.push(DesktopAction::UpdateResize { pointer });
    }
    if interaction.icon_gesture != IconGesture::Idle {
        actions.push(DesktopAction::IconPointerMove { pointer });
    }
    actions
}

/// Routes a window-level pointer release. Sessions end only here.
pub fn pointer_up_actions(
    interaction: &InteractionState,
    pointer: PointerPosition,
) -> Vec<DesktopAction> {
    let mut actions = Vec::new();
    if interaction.dragging.is_some() {
        actions.push(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        actions.push(DesktopAction::EndResize);
    }
    if interaction.icon_gesture != IconGesture::Idle {
        actions.push(DesktopAction::IconPointerUp { pointer });
    }
    actions
}

/// Installs window listeners for shortcuts, pointer sessions, and viewport changes.
pub fn install_global_listeners(runtime: DesktopRuntimeContext) {
    let shortcut_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        if let Some(command) = shortcut_for_chord(&chord_from_keyboard_event(&ev)) {
            ev.prevent_default();
            ev.stop_propagation();
            runtime.dispatch_action(DesktopAction::Shortcut(command));
        }
    });
    on_cleanup(move || shortcut_listener.remove());

    let pointer_move_listener = window_event_listener(ev::pointermove, move |ev| {
        let interaction = runtime.interaction.get_untracked();
        for action in pointer_move_actions(&interaction, pointer_from_pointer_event(&ev)) {
            runtime.dispatch_action(action);
        }
    });
    on_cleanup(move || pointer_move_listener.remove());

    let pointer_up_listener = window_event_listener(ev::pointerup, move |ev| {
        let interaction = runtime.interaction.get_untracked();
        for action in pointer_up_actions(&interaction, pointer_from_pointer_event(&ev)) {
            runtime.dispatch_action(action);
        }
    });
    on_cleanup(move || pointer_up_listener.remove());

    let resize_listener = window_event_listener(ev::resize, move |_| {
        let viewport = runtime.host.get_value().viewport.current();
        runtime.dispatch_action(DesktopAction::SetViewport { viewport });
    });
    on_cleanup(move || resize_listener.remove());
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use platform_host::ViewportMetrics;

    use super::*;
    use crate::{
        desktop_icons::DesktopIconEntry,
        model::{DragSession, OpenWindowRequest, WindowGeometry, WindowRect},
        reducer::reduce_desktop,
    };

    fn window(minimized: bool) -> WindowRecord {
        WindowRecord {
            id: AppId::new("notepad"),
            title: "Notepad".to_string(),
            icon_ref: "notepad".to_string(),
            payload_ref: Value::Null,
            z_index: 3,
            minimized,
            maximized: false,
            geometry: WindowGeometry::default(),
            context_menu: Vec::new(),
        }
    }

    #[test]
    fn default_chords_map_to_commands() {
        let cases = [
            (KeyChord::new("F4").with_alt(), Some(ShortcutCommand::CloseActive)),
            (KeyChord::new("F9").with_alt(), Some(ShortcutCommand::MinimizeActive)),
            (KeyChord::new("Tab").with_alt(), Some(ShortcutCommand::FocusNext)),
            (
                KeyChord::new("Tab").with_alt().with_shift(),
                Some(ShortcutCommand::FocusPrevious),
            ),
            (KeyChord::new("F4"), None),
            (KeyChord::new("F4").with_alt().with_ctrl(), None),
            (KeyChord::new("x").with_alt(), None),
        ];
        for (chord, expected) in cases {
            assert_eq!(shortcut_for_chord(&chord), expected, "{chord:?}");
        }
    }

    #[test]
    fn titlebar_press_on_inactive_window_focuses_then_moves() {
        let pointer = PointerPosition::new(10, 10);
        assert_eq!(
            window_pointer_down_actions(&window(false), false, WindowPointerTarget::Titlebar, pointer),
            vec![
                DesktopAction::FocusWindow {
                    window_id: AppId::new("notepad")
                },
                DesktopAction::BeginMove {
                    window_id: AppId::new("notepad"),
                    pointer
                },
            ]
        );
    }

    #[test]
    fn content_press_never_starts_a_drag() {
        let pointer = PointerPosition::new(10, 10);
        assert!(
            window_pointer_down_actions(&window(false), true, WindowPointerTarget::Content, pointer)
                .is_empty()
        );
        assert_eq!(
            window_pointer_down_actions(&window(true), true, WindowPointerTarget::Content, pointer)
                .len(),
            1
        );
    }

    #[test]
    fn handle_tokens_parse_into_resize_targets() {
        assert_eq!(
            WindowPointerTarget::from_token("sw"),
            Some(WindowPointerTarget::ResizeHandle(ResizeEdge::SouthWest))
        );
        assert_eq!(
            WindowPointerTarget::from_token("titlebar"),
            Some(WindowPointerTarget::Titlebar)
        );
        assert_eq!(WindowPointerTarget::from_token("body"), None);
    }

    #[test]
    fn pointer_routing_follows_live_sessions() {
        let pointer = PointerPosition::new(5, 6);
        let idle = InteractionState::default();
        assert!(pointer_move_actions(&idle, pointer).is_empty());
        assert!(pointer_up_actions(&idle, pointer).is_empty());

        let mut dragging = InteractionState {
            dragging: Some(DragSession {
                window_id: AppId::new("notepad"),
                pointer_start: PointerPosition::new(0, 0),
                rect_start: WindowRect {
                    x: 0,
                    y: 0,
                    w: 800,
                    h: 600,
                },
            }),
            ..InteractionState::default()
        };
        dragging
            .icon_gesture
            .pointer_down(AppId::new("paint"), PointerPosition::new(0, 0));

        assert_eq!(
            pointer_move_actions(&dragging, pointer),
            vec![
                DesktopAction::UpdateMove { pointer },
                DesktopAction::IconPointerMove { pointer },
            ]
        );
        assert_eq!(
            pointer_up_actions(&dragging, pointer),
            vec![
                DesktopAction::EndMove,
                DesktopAction::IconPointerUp { pointer },
            ]
        );
    }

    #[test]
    fn shell_attributes_resolve_icons_before_windows() {
        assert_eq!(
            ShellHit::from_attributes(Some("paint"), Some("notepad"), Some("titlebar")),
            Some(ShellHit::Icon(AppId::new("paint")))
        );
        assert_eq!(
            ShellHit::from_attributes(None, Some("notepad"), Some("ne")),
            Some(ShellHit::Window {
                window_id: AppId::new("notepad"),
                part: WindowPointerTarget::ResizeHandle(ResizeEdge::NorthEast),
            })
        );
        assert_eq!(
            ShellHit::from_attributes(None, Some("notepad"), None),
            Some(ShellHit::Window {
                window_id: AppId::new("notepad"),
                part: WindowPointerTarget::Content,
            })
        );
        assert_eq!(ShellHit::from_attributes(None, None, Some("titlebar")), None);
        assert_eq!(ShellHit::from_attributes(Some(""), Some(""), None), None);
    }

    #[test]
    fn shell_presses_drive_moves_resizes_and_icon_gestures() {
        let mut desktop = DesktopState::new(
            ViewportMetrics::new(1280, 800),
            vec![DesktopIconEntry::new("paint", "Paint", "paint-brush")],
        );
        let mut interaction = InteractionState::default();
        for app in ["notepad", "terminal"] {
            reduce_desktop(
                &mut desktop,
                &mut interaction,
                DesktopAction::OpenWindow(OpenWindowRequest::new(app, app)),
            );
        }
        let pointer = PointerPosition::new(300, 90);

        let titlebar = ShellHit::Window {
            window_id: AppId::new("notepad"),
            part: WindowPointerTarget::Titlebar,
        };
        for action in shell_pointer_down_actions(&desktop, titlebar, pointer) {
            reduce_desktop(&mut desktop, &mut interaction, action);
        }
        assert!(desktop.windows.is_active(&AppId::new("notepad")));
        assert_eq!(
            interaction.dragging.as_ref().map(|s| &s.window_id),
            Some(&AppId::new("notepad"))
        );

        let handle = ShellHit::Window {
            window_id: AppId::new("notepad"),
            part: WindowPointerTarget::ResizeHandle(ResizeEdge::SouthEast),
        };
        assert_eq!(
            shell_pointer_down_actions(&desktop, handle, pointer),
            vec![DesktopAction::BeginResize {
                window_id: AppId::new("notepad"),
                edge: ResizeEdge::SouthEast,
                pointer,
            }]
        );

        assert_eq!(
            shell_pointer_down_actions(&desktop, ShellHit::Icon(AppId::new("paint")), pointer),
            vec![DesktopAction::IconPointerDown {
                app_id: AppId::new("paint"),
                pointer,
            }]
        );

        let closed = ShellHit::Window {
            window_id: AppId::new("calculator"),
            part: WindowPointerTarget::Titlebar,
        };
        assert!(shell_pointer_down_actions(&desktop, closed, pointer).is_empty());
    }

    #[test]
    fn only_titlebar_double_clicks_toggle_maximize() {
        assert_eq!(
            shell_double_click_action(ShellHit::Window {
                window_id: AppId::new("notepad"),
                part: WindowPointerTarget::Titlebar,
            }),
            Some(DesktopAction::ToggleMaximize {
                window_id: AppId::new("notepad")
            })
        );
        assert_eq!(
            shell_double_click_action(ShellHit::Window {
                window_id: AppId::new("notepad"),
                part: WindowPointerTarget::Content,
            }),
            None
        );
        assert_eq!(
            shell_double_click_action(ShellHit::Icon(AppId::new("paint"))),
            None
        );
    }
}
