use std::fmt;

use platform_host::ViewportMetrics;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    desktop_icons::{default_desktop_icons, DesktopIconEntry, IconLayout},
    gesture::IconGesture,
    geometry::Breakpoint,
    grid::{GridConfig, GridMetrics},
    window_manager::WindowManager,
};

pub const DEFAULT_WINDOW_WIDTH: i32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 600;

/// Application/window key. One open window per id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AppId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

impl WindowSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
    }
}

/// Rendered window frame in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn size(self) -> WindowSize {
        WindowSize::new(self.w, self.h)
    }
}

/// Stored placement of a window at the desktop breakpoint.
///
/// Tablet and mobile breakpoints ignore both variants and use computed geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowGeometry {
    /// Centred in the viewport at the custom size, or the default size when unset.
    Centered { custom_size: Option<WindowSize> },
    /// Dragged to an explicit origin.
    Positioned {
        x: i32,
        y: i32,
        custom_size: Option<WindowSize>,
    },
}

impl WindowGeometry {
    pub fn custom_size(self) -> Option<WindowSize> {
        match self {
            Self::Centered { custom_size } | Self::Positioned { custom_size, .. } => custom_size,
        }
    }

    /// Same placement with the custom size replaced.
    pub fn with_custom_size(self, size: WindowSize) -> Self {
        match self {
            Self::Centered { .. } => Self::Centered {
                custom_size: Some(size),
            },
            Self::Positioned { x, y, .. } => Self::Positioned {
                x,
                y,
                custom_size: Some(size),
            },
        }
    }

    /// Positioned at `(x, y)`, keeping any custom size.
    pub fn positioned_at(self, x: i32, y: i32) -> Self {
        Self::Positioned {
            x,
            y,
            custom_size: self.custom_size(),
        }
    }
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self::Centered { custom_size: None }
    }
}

/// Context-menu entry declared by a hosted app. Stored and surfaced, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuEntry {
    pub label: String,
    pub action: String,
    pub shortcut: Option<String>,
}

impl ContextMenuEntry {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
            shortcut: None,
        }
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: AppId,
    pub title: String,
    pub icon_ref: String,
    /// Opaque reference to the hosted application's content.
    pub payload_ref: Value,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
    pub geometry: WindowGeometry,
    pub context_menu: Vec<ContextMenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub id: AppId,
    pub title: String,
    pub icon_ref: String,
    pub payload_ref: Value,
    pub context_menu: Vec<ContextMenuEntry>,
}

impl OpenWindowRequest {
    pub fn new(id: impl Into<AppId>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            icon_ref: id.as_str().to_string(),
            id,
            title: title.into(),
            payload_ref: Value::Null,
            context_menu: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon_ref: impl Into<String>) -> Self {
        self.icon_ref = icon_ref.into();
        self
    }

    pub fn with_payload(mut self, payload_ref: Value) -> Self {
        self.payload_ref = payload_ref;
        self
    }

    pub fn with_context_menu(mut self, entries: Vec<ContextMenuEntry>) -> Self {
        self.context_menu = entries;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `(dx, dy)` from `origin` to `self`, saturating at the `i32` range.
    pub fn delta_from(self, origin: PointerPosition) -> (i32, i32) {
        (
            self.x.saturating_sub(origin.x),
            self.y.saturating_sub(origin.y),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Parses the handle token used on resize handles (`n`, `se`, ...).
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|edge| edge.token() == token)
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    pub const fn has_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub const fn has_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub const fn has_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub const fn has_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: AppId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: AppId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

/// Transient pointer state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
    pub icon_gesture: IconGesture,
}

/// Everything the desktop shell renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub windows: WindowManager,
    pub icon_entries: Vec<DesktopIconEntry>,
    pub icon_layout: IconLayout,
    pub viewport: ViewportMetrics,
    pub grid_config: GridConfig,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(ViewportMetrics::default(), default_desktop_icons())
    }
}

impl DesktopState {
    /// Fresh desktop with the default icon layout for `viewport`.
    pub fn new(viewport: ViewportMetrics, icon_entries: Vec<DesktopIconEntry>) -> Self {
        let grid_config = GridConfig::default();
        let metrics = GridMetrics::compute(viewport, &grid_config);
        Self {
            windows: WindowManager::default(),
            icon_layout: IconLayout::defaults(&icon_entries, metrics.cols),
            icon_entries,
            viewport,
            grid_config,
        }
    }

    pub fn grid_metrics(&self) -> GridMetrics {
        GridMetrics::compute(self.viewport, &self.grid_config)
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::for_viewport(self.viewport)
    }

    pub fn icon_entry(&self, app_id: &AppId) -> Option<&DesktopIconEntry> {
        self.icon_entries.iter().find(|entry| &entry.app_id == app_id)
    }
}
