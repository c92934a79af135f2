//! Desktop icon catalog and the icon placement store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    grid::{default_cell_for, occupied_cells, resolve_collision, GridCell, GridMetrics},
    model::AppId,
};

/// One icon on the desktop surface. Catalog order defines the default layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopIconEntry {
    pub app_id: AppId,
    pub label: String,
    pub icon_ref: String,
}

impl DesktopIconEntry {
    pub fn new(
        app_id: impl Into<AppId>,
        label: impl Into<String>,
        icon_ref: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            label: label.into(),
            icon_ref: icon_ref.into(),
        }
    }
}

const DEFAULT_ICONS: [(&str, &str, &str); 7] = [
    ("terminal", "Terminal", "terminal"),
    ("explorer", "Explorer", "folder"),
    ("notepad", "Notepad", "document-text"),
    ("calculator", "Calculator", "calculator"),
    ("paint", "Paint", "paint-brush"),
    ("settings", "Settings", "settings"),
    ("about", "About", "info"),
];

/// Built-in desktop icons in default order.
pub fn default_desktop_icons() -> Vec<DesktopIconEntry> {
    DEFAULT_ICONS
        .into_iter()
        .map(|(id, label, icon)| DesktopIconEntry::new(id, label, icon))
        .collect()
}

/// Stored `app id -> cell` map. Persisted as one JSON object of `{row, col}` values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconLayout {
    cells: BTreeMap<AppId, GridCell>,
}

impl IconLayout {
    /// Every catalog icon at its index-derived cell.
    pub fn defaults(entries: &[DesktopIconEntry], cols: u32) -> Self {
        Self {
            cells: entries
                .iter()
                .enumerate()
                .map(|(index, entry)| (entry.app_id.clone(), default_cell_for(index, cols)))
                .collect(),
        }
    }

    pub fn get(&self, app_id: &AppId) -> Option<GridCell> {
        self.cells.get(app_id).copied()
    }

    /// Merges one placement into the map.
    pub fn write(&mut self, app_id: AppId, cell: GridCell) {
        self.cells.insert(app_id, cell);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AppId, GridCell)> + '_ {
        self.cells.iter().map(|(app_id, cell)| (app_id, *cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Stored cell of `app_id`, or its default cell when it has never been placed.
    pub fn logical_cell(
        &self,
        app_id: &AppId,
        entries: &[DesktopIconEntry],
        metrics: &GridMetrics,
    ) -> Option<GridCell> {
        self.get(app_id).or_else(|| {
            entries
                .iter()
                .position(|entry| &entry.app_id == app_id)
                .map(|index| metrics.default_cell(index))
        })
    }

    /// Cell at which `app_id` is drawn for the current grid.
    pub fn rendered_cell(
        &self,
        app_id: &AppId,
        entries: &[DesktopIconEntry],
        metrics: &GridMetrics,
    ) -> Option<GridCell> {
        self.logical_cell(app_id, entries, metrics)
            .map(|cell| metrics.rendered_cell(cell))
    }

    /// Places `app_id` at the free cell nearest `target` and returns the cell written.
    pub fn place(
        &mut self,
        app_id: &AppId,
        target: GridCell,
        entries: &[DesktopIconEntry],
        metrics: &GridMetrics,
    ) -> GridCell {
        let occupied = occupied_cells(self, entries, metrics, Some(app_id));
        let cell = resolve_collision(target, &occupied, metrics);
        self.write(app_id.clone(), cell);
        cell
    }

    /// Builds a layout from a decoded persisted object, keeping only entries whose `row` and `col`
    /// are non-negative numbers. Returns the layout and the ids of dropped entries.
    pub fn from_persisted(record: serde_json::Map<String, Value>) -> (Self, Vec<String>) {
        let mut layout = Self::default();
        let mut dropped = Vec::new();
        for (app_id, value) in record {
            match (
                value.get("row").and_then(non_negative_coordinate),
                value.get("col").and_then(non_negative_coordinate),
            ) {
                (Some(row), Some(col)) => layout.write(AppId(app_id), GridCell::new(row, col)),
                _ => dropped.push(app_id),
            }
        }
        (layout, dropped)
    }
}

fn non_negative_coordinate(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let n = value.as_f64()?;
    (n.is_finite() && n >= 0.0 && n <= f64::from(u32::MAX)).then(|| n.floor() as u32)
}
