pub mod desktop_icons;
pub mod desktop_shell;
pub mod effect_executor;
pub mod geometry;
pub mod gesture;
pub mod grid;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod window_manager;

pub use desktop_icons::{default_desktop_icons, DesktopIconEntry, IconLayout};
pub use desktop_shell::{
    handle_shell_double_click, handle_shell_pointer_down, shortcut_for_chord, KeyChord, ShellHit,
    ShortcutCommand, WindowPointerTarget,
};
pub use geometry::{window_frame, Breakpoint};
pub use gesture::{GestureOutcome, IconGesture};
pub use grid::{GridCell, GridConfig, GridMetrics};
pub use model::*;
pub use persistence::{load_icon_layout, persist_icon_layout, LayoutPersistenceError};
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use window_manager::{FocusDirection, WindowManager};
