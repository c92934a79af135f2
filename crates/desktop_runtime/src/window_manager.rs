//! Window state store: lifecycle, stacking order, and the active-window pointer.
//!
//! Operations on unknown ids are silent no-ops and report `false`/`None` so callers can skip
//! feedback without treating the miss as an error.

use platform_host::ViewportMetrics;

use crate::{
    geometry::{clamp_window_size, Breakpoint},
    model::{AppId, ContextMenuEntry, OpenWindowRequest, WindowGeometry, WindowRecord, WindowSize},
};

/// Direction for keyboard focus cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Forward,
    Backward,
}

/// Owns every open window, the active pointer, and the z-order counter.
///
/// Each desktop instance carries its own counters, so independent managers never interfere.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    active: Option<AppId>,
    max_z_index: u32,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `request.id`, or re-focuses it when already open.
    ///
    /// A re-opened window is un-minimized and raised; its maximized flag and geometry are kept.
    pub fn open(&mut self, request: OpenWindowRequest) -> &WindowRecord {
        let z_index = self.next_z_index();
        let id = request.id.clone();
        let index = match self.position(&id) {
            Some(index) => {
                let window = &mut self.windows[index];
                window.minimized = false;
                window.z_index = z_index;
                index
            }
            None => {
                self.windows.push(WindowRecord {
                    id: request.id,
                    title: request.title,
                    icon_ref: request.icon_ref,
                    payload_ref: request.payload_ref,
                    z_index,
                    minimized: false,
                    maximized: false,
                    geometry: WindowGeometry::default(),
                    context_menu: request.context_menu,
                });
                self.windows.len() - 1
            }
        };
        self.active = Some(id);
        &self.windows[index]
    }

    /// Removes the window. Closing the active window leaves nothing active.
    pub fn close(&mut self, id: &AppId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.windows.remove(index);
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        true
    }

    pub fn minimize(&mut self, id: &AppId) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        window.minimized = true;
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        true
    }

    /// Raises, un-minimizes, and activates the window.
    pub fn focus(&mut self, id: &AppId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        let z_index = self.next_z_index();
        if let Some(window) = self.get_mut(id) {
            window.z_index = z_index;
            window.minimized = false;
        }
        self.active = Some(id.clone());
        true
    }

    /// Flips the maximized flag and returns the new value. Stacking and focus are untouched.
    pub fn toggle_maximize(&mut self, id: &AppId) -> Option<bool> {
        let window = self.get_mut(id)?;
        window.maximized = !window.maximized;
        Some(window.maximized)
    }

    /// Sets a custom size, clamped to the viewport.
    ///
    /// Ignored while maximized or below the desktop breakpoint.
    pub fn resize(&mut self, id: &AppId, size: WindowSize, viewport: ViewportMetrics) -> bool {
        if !Breakpoint::for_viewport(viewport).allows_free_geometry() {
            return false;
        }
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        if window.maximized {
            return false;
        }
        window.geometry = window
            .geometry
            .with_custom_size(clamp_window_size(size, viewport));
        true
    }

    /// Records an explicit origin, keeping any custom size. Callers clamp beforehand.
    pub fn move_to(&mut self, id: &AppId, x: i32, y: i32) -> bool {
        match self.get_mut(id) {
            Some(window) => {
                window.geometry = window.geometry.positioned_at(x, y);
                true
            }
            None => false,
        }
    }

    /// Replaces the stored geometry. Callers clamp beforehand.
    pub fn set_geometry(&mut self, id: &AppId, geometry: WindowGeometry) -> bool {
        match self.get_mut(id) {
            Some(window) => {
                window.geometry = geometry;
                true
            }
            None => false,
        }
    }

    /// Focuses the neighbour of the active window in list order, wrapping at the ends.
    ///
    /// With nothing active, forward starts at the first window and backward at the last.
    pub fn cycle_focus(&mut self, direction: FocusDirection) -> Option<AppId> {
        let len = self.windows.len();
        if len == 0 {
            return None;
        }
        let next = match (self.active_position(), direction) {
            (Some(index), FocusDirection::Forward) => (index + 1) % len,
            (Some(index), FocusDirection::Backward) => (index + len - 1) % len,
            (None, FocusDirection::Forward) => 0,
            (None, FocusDirection::Backward) => len - 1,
        };
        let id = self.windows[next].id.clone();
        self.focus(&id);
        Some(id)
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn get(&self, id: &AppId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == id)
    }

    pub fn active(&self) -> Option<&AppId> {
        self.active.as_ref()
    }

    pub fn is_active(&self, id: &AppId) -> bool {
        self.active.as_ref() == Some(id)
    }

    /// Highest z-index handed out so far.
    pub fn max_z_index(&self) -> u32 {
        self.max_z_index
    }

    /// Context-menu entries declared by the window's app; empty for unknown ids.
    pub fn context_menu(&self, id: &AppId) -> &[ContextMenuEntry] {
        self.get(id).map(|w| w.context_menu.as_slice()).unwrap_or(&[])
    }

    /// Windows ordered bottom to top.
    pub fn stacking_order(&self) -> Vec<&WindowRecord> {
        let mut ordered: Vec<&WindowRecord> = self.windows.iter().collect();
        ordered.sort_by_key(|w| w.z_index);
        ordered
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn next_z_index(&mut self) -> u32 {
        self.max_z_index = self.max_z_index.saturating_add(1);
        self.max_z_index
    }

    fn position(&self, id: &AppId) -> Option<usize> {
        self.windows.iter().position(|w| &w.id == id)
    }

    fn active_position(&self) -> Option<usize> {
        self.active.as_ref().and_then(|id| self.position(id))
    }

    fn get_mut(&mut self, id: &AppId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| &w.id == id)
    }
}
