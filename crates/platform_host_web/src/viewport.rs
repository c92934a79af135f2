//! Live browser viewport metrics.

use platform_host::{ViewportMetrics, ViewportMetricsProvider};

/// Width reserved by the desktop sidebar panel when the viewport is wide enough to show it.
pub const SIDEBAR_WIDTH_PX: i32 = 280;
/// Viewport width at which the sidebar panel becomes visible.
pub const SIDEBAR_MIN_VIEWPORT_WIDTH: i32 = 1280;

#[derive(Debug, Clone, Copy, Default)]
/// Reads `window.innerWidth` / `window.innerHeight` on every call.
pub struct WebViewportProvider;

impl ViewportMetricsProvider for WebViewportProvider {
    fn current(&self) -> ViewportMetrics {
        let (width, height) = inner_size().unwrap_or_else(|| {
            let fallback = ViewportMetrics::default();
            (fallback.width, fallback.height)
        });
        ViewportMetrics::new(width, height).with_sidebar(sidebar_reserved_for(width))
    }
}

/// Sidebar width reserved at a given viewport width.
pub const fn sidebar_reserved_for(width: i32) -> i32 {
    if width >= SIDEBAR_MIN_VIEWPORT_WIDTH {
        SIDEBAR_WIDTH_PX
    } else {
        0
    }
}

#[cfg(target_arch = "wasm32")]
fn inner_size() -> Option<(i32, i32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as i32, height as i32))
}

#[cfg(not(target_arch = "wasm32"))]
fn inner_size() -> Option<(i32, i32)> {
    None
}
