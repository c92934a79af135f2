//! Viewport metrics contracts consumed by the desktop window and icon-grid managers.

use serde::{Deserialize, Serialize};

/// Current desktop viewport size plus the width reserved for a side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportMetrics {
    /// Viewport width in CSS pixels.
    pub width: i32,
    /// Viewport height in CSS pixels.
    pub height: i32,
    /// Horizontal space reserved by a sidebar that icons must not occupy.
    pub sidebar_reserved: i32,
}

impl ViewportMetrics {
    /// Builds metrics with no reserved sidebar.
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            sidebar_reserved: 0,
        }
    }

    /// Returns the same metrics with `sidebar_reserved` replaced.
    pub const fn with_sidebar(self, sidebar_reserved: i32) -> Self {
        Self {
            sidebar_reserved,
            ..self
        }
    }
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

/// Host service that reports the live viewport size.
pub trait ViewportMetricsProvider {
    /// Reads the current viewport metrics.
    fn current(&self) -> ViewportMetrics;
}

#[derive(Debug, Clone, Copy, Default)]
/// Provider returning a fixed value; used by non-browser hosts and tests.
pub struct FixedViewportProvider(pub ViewportMetrics);

impl ViewportMetricsProvider for FixedViewportProvider {
    fn current(&self) -> ViewportMetrics {
        self.0
    }
}
