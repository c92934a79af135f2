//! Icon layout persistence: one JSON object under [`ICON_LAYOUT_KEY`], written on every committed
//! drag and read once at boot.

use leptos::logging;
use platform_host::PrefsStore;
use serde_json::Value;
use thiserror::Error;

use crate::desktop_icons::{DesktopIconEntry, IconLayout};

/// Key holding the persisted `app id -> {row, col}` object.
pub const ICON_LAYOUT_KEY: &str = "desktop.icon_layout.v1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutPersistenceError {
    #[error("icon layout store failed: {0}")]
    Store(String),
    #[error("icon layout record is corrupt: {0}")]
    Corrupt(String),
    #[error("icon layout encode failed: {0}")]
    Encode(String),
}

/// Result of decoding a persisted record that was at least a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedIconLayout {
    pub layout: IconLayout,
    /// App ids whose entries were dropped for invalid coordinates.
    pub dropped: Vec<String>,
}

/// Decodes raw stored text.
///
/// # Errors
///
/// Returns [`LayoutPersistenceError::Corrupt`] when the text is not JSON or not a JSON object.
pub fn decode_icon_layout(raw: &str) -> Result<DecodedIconLayout, LayoutPersistenceError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| LayoutPersistenceError::Corrupt(e.to_string()))?;
    let Value::Object(record) = value else {
        return Err(LayoutPersistenceError::Corrupt(
            "expected a JSON object".to_string(),
        ));
    };
    let (layout, dropped) = IconLayout::from_persisted(record);
    Ok(DecodedIconLayout { layout, dropped })
}

/// Loads the persisted layout, recovering locally from every failure.
///
/// Invalid entries are dropped (those icons use their default cell). An empty result, a missing
/// key, or a store failure yields the full default layout. A corrupt record is deleted before
/// falling back to the defaults.
pub async fn load_icon_layout<S: PrefsStore + ?Sized>(
    store: &S,
    entries: &[DesktopIconEntry],
    cols: u32,
) -> IconLayout {
    let raw = match store.load_raw(ICON_LAYOUT_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return IconLayout::defaults(entries, cols),
        Err(err) => {
            logging::warn!("{}", LayoutPersistenceError::Store(err));
            return IconLayout::defaults(entries, cols);
        }
    };

    match decode_icon_layout(&raw) {
        Ok(decoded) => {
            if !decoded.dropped.is_empty() {
                logging::warn!(
                    "dropped invalid icon positions: {}",
                    decoded.dropped.join(", ")
                );
            }
            if decoded.layout.is_empty() {
                IconLayout::defaults(entries, cols)
            } else {
                decoded.layout
            }
        }
        Err(err) => {
            logging::warn!("{err}; resetting to the default layout");
            if let Err(err) = store.delete(ICON_LAYOUT_KEY).await {
                logging::warn!("{}", LayoutPersistenceError::Store(err));
            }
            IconLayout::defaults(entries, cols)
        }
    }
}

/// Writes the whole layout under [`ICON_LAYOUT_KEY`].
///
/// # Errors
///
/// Returns an error when encoding or the store write fails.
pub async fn persist_icon_layout<S: PrefsStore + ?Sized>(
    store: &S,
    layout: &IconLayout,
) -> Result<(), LayoutPersistenceError> {
    let raw =
        serde_json::to_string(layout).map_err(|e| LayoutPersistenceError::Encode(e.to_string()))?;
    store
        .save_raw(ICON_LAYOUT_KEY, &raw)
        .await
        .map_err(LayoutPersistenceError::Store)
}
