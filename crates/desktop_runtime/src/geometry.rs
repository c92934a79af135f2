//! Window geometry rules: breakpoints, handle resize, maximize and breakpoint frames, and move
//! clamping.
//!
//! Everything here is a pure function of the stored [`WindowGeometry`] and the current viewport.
//! Rendered frames are computed on demand and never stored.

use platform_host::ViewportMetrics;

use crate::model::{ResizeEdge, WindowGeometry, WindowRecord, WindowRect, WindowSize};

/// Minimum managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 400;
/// Minimum managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 300;
/// Gap kept between a resized window and the viewport edge.
pub const VIEWPORT_EDGE_GAP: i32 = 20;
/// Height reserved for the taskbar at the bottom of the viewport.
pub const TASKBAR_HEIGHT_PX: i32 = 48;
/// Minimum part of a window that always stays inside the viewport.
pub const MIN_VISIBLE_MARGIN: i32 = 20;
/// Narrowest viewport treated as a tablet.
pub const TABLET_MIN_WIDTH: i32 = 768;
/// Narrowest viewport treated as a desktop.
pub const DESKTOP_MIN_WIDTH: i32 = 1024;

/// Viewport size tier governing window geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub fn for_viewport(viewport: ViewportMetrics) -> Self {
        Self::for_width(viewport.width)
    }

    pub const fn for_width(width: i32) -> Self {
        if width < TABLET_MIN_WIDTH {
            Self::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    /// Whether windows may be moved and resized freely.
    pub const fn allows_free_geometry(self) -> bool {
        matches!(self, Self::Desktop)
    }
}

/// Largest size a window may take: the viewport minus the edge gap on each axis.
///
/// When the viewport is too small for both rules the minimum window size wins.
pub fn max_window_size(viewport: ViewportMetrics) -> WindowSize {
    WindowSize::new(
        (viewport.width - VIEWPORT_EDGE_GAP).max(MIN_WINDOW_WIDTH),
        (viewport.height - VIEWPORT_EDGE_GAP).max(MIN_WINDOW_HEIGHT),
    )
}

/// Clamps a requested size to the minimum window size and to [`max_window_size`].
pub fn clamp_window_size(size: WindowSize, viewport: ViewportMetrics) -> WindowSize {
    let max = max_window_size(viewport);
    WindowSize::new(
        size.width.max(MIN_WINDOW_WIDTH).min(max.width),
        size.height.max(MIN_WINDOW_HEIGHT).min(max.height),
    )
}

/// Applies a handle drag of `(dx, dy)` to the frame captured at resize start.
///
/// The corner opposite the handle stays fixed: dragging a west or north handle shifts the origin
/// by exactly the clamped size change. North growth also stops at the top of the viewport, so the
/// rendered origin never needs to be pulled back down.
pub fn resize_from_handle(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    viewport: ViewportMetrics,
) -> WindowRect {
    let width = if edge.has_east() {
        start.w.saturating_add(dx)
    } else if edge.has_west() {
        start.w.saturating_sub(dx)
    } else {
        start.w
    };
    let height = if edge.has_south() {
        start.h.saturating_add(dy)
    } else if edge.has_north() {
        start.h.saturating_sub(dy)
    } else {
        start.h
    };

    let mut size = clamp_window_size(WindowSize::new(width, height), viewport);
    if edge.has_north() {
        let bottom = start.y.saturating_add(start.h);
        size.height = size.height.min(bottom.max(MIN_WINDOW_HEIGHT));
    }
    let x = if edge.has_west() {
        start.x + (start.w - size.width)
    } else {
        start.x
    };
    let y = if edge.has_north() {
        start.y + (start.h - size.height)
    } else {
        start.y
    };

    WindowRect {
        x,
        y,
        w: size.width,
        h: size.height,
    }
}

/// Frame of a maximized window: the whole viewport. The taskbar auto-hides while maximized.
pub fn maximized_rect(viewport: ViewportMetrics) -> WindowRect {
    WindowRect {
        x: 0,
        y: 0,
        w: viewport.width,
        h: viewport.height,
    }
}

/// Rendered frame of `window` for the current viewport.
pub fn window_frame(window: &WindowRecord, viewport: ViewportMetrics) -> WindowRect {
    if window.maximized {
        return maximized_rect(viewport);
    }
    match Breakpoint::for_viewport(viewport) {
        Breakpoint::Mobile => maximized_rect(viewport),
        Breakpoint::Tablet => tablet_frame(viewport),
        Breakpoint::Desktop => desktop_frame(window.geometry, viewport),
    }
}

fn tablet_frame(viewport: ViewportMetrics) -> WindowRect {
    WindowRect {
        x: viewport.width / 20,
        y: viewport.height / 20,
        w: viewport.width * 9 / 10,
        h: viewport.height * 8 / 10,
    }
}

fn desktop_frame(geometry: WindowGeometry, viewport: ViewportMetrics) -> WindowRect {
    let usable_height = viewport.height - TASKBAR_HEIGHT_PX;
    let max = max_window_size(viewport);
    let requested = geometry.custom_size().unwrap_or_default();
    let w = requested.width.min(max.width).max(0);
    let h = requested.height.min(max.height).max(0);

    let (x, y) = match geometry {
        WindowGeometry::Centered { .. } => {
            ((viewport.width - w) / 2, ((usable_height - h) / 2).max(0))
        }
        WindowGeometry::Positioned { x, y, .. } => clamp_position(x, y, w, viewport),
    };

    WindowRect { x, y, w, h }
}

/// Clamps a window origin so at least [`MIN_VISIBLE_MARGIN`] of a `width`-wide window stays on
/// screen and the titlebar never leaves the top of the viewport or slides under the taskbar.
pub fn clamp_position(x: i32, y: i32, width: i32, viewport: ViewportMetrics) -> (i32, i32) {
    let min_x = MIN_VISIBLE_MARGIN - width;
    let max_x = viewport.width - MIN_VISIBLE_MARGIN;
    let max_y = (viewport.height - TASKBAR_HEIGHT_PX - MIN_VISIBLE_MARGIN).max(0);
    (x.max(min_x).min(max_x), y.max(0).min(max_y))
}

/// Origin after dragging the frame captured at move start by `(dx, dy)`.
pub fn moved_origin(start: WindowRect, dx: i32, dy: i32, viewport: ViewportMetrics) -> (i32, i32) {
    clamp_position(
        start.x.saturating_add(dx),
        start.y.saturating_add(dy),
        start.w,
        viewport,
    )
}
