//! Desktop icon grid: metrics, pixel/cell conversion, occupancy, and collision resolution.

use std::collections::HashSet;

use platform_host::ViewportMetrics;
use serde::{Deserialize, Serialize};

use crate::{
    desktop_icons::{DesktopIconEntry, IconLayout},
    geometry::TASKBAR_HEIGHT_PX,
    model::AppId,
};

/// Edge length of one icon cell in pixels.
pub const GRID_CELL_SIZE: i32 = 96;
/// Minimum margin between the grid and the viewport edges.
pub const GRID_MIN_MARGIN: i32 = 16;
/// Number of rings searched around an occupied target before accepting the overlap.
pub const COLLISION_SEARCH_RADIUS: i64 = 20;

/// `(row, col)` address in the icon grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

impl GridCell {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Tunables for the icon grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub cell_size: i32,
    pub min_margin: i32,
    pub taskbar_height: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: GRID_CELL_SIZE,
            min_margin: GRID_MIN_MARGIN,
            taskbar_height: TASKBAR_HEIGHT_PX,
        }
    }
}

/// Derived grid dimensions for one viewport. Recomputed on every viewport change, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: i32,
    pub margin_x: i32,
    pub margin_y: i32,
}

impl GridMetrics {
    /// Fits as many whole cells as the viewport allows (at least one per axis) and centres them in
    /// the space left after the sidebar and taskbar reservations.
    pub fn compute(viewport: ViewportMetrics, config: &GridConfig) -> Self {
        let cell = config.cell_size.max(1);
        let usable_w = viewport.width - viewport.sidebar_reserved;
        let usable_h = viewport.height - config.taskbar_height;

        let cols = (usable_w - 2 * config.min_margin).div_euclid(cell).max(1);
        let rows = (usable_h - 2 * config.min_margin).div_euclid(cell).max(1);

        Self {
            cols: cols as u32,
            rows: rows as u32,
            cell_size: cell,
            margin_x: (usable_w - cols * cell).div_euclid(2),
            margin_y: (usable_h - rows * cell).div_euclid(2),
        }
    }

    /// Cell under a pixel position, clamped into the grid.
    pub fn pixel_to_cell(&self, px: i32, py: i32) -> GridCell {
        let col = (px - self.margin_x).div_euclid(self.cell_size);
        let row = (py - self.margin_y).div_euclid(self.cell_size);
        GridCell {
            row: row.clamp(0, self.rows as i32 - 1) as u32,
            col: col.clamp(0, self.cols as i32 - 1) as u32,
        }
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, cell: GridCell) -> (i32, i32) {
        (
            self.margin_x + cell.col as i32 * self.cell_size,
            self.margin_y + cell.row as i32 * self.cell_size,
        )
    }

    /// Where a stored cell is drawn. Clamps into the visible grid without touching the stored value,
    /// so a saved layout reappears when the viewport grows back.
    pub fn rendered_cell(&self, stored: GridCell) -> GridCell {
        GridCell {
            row: stored.row.min(self.rows - 1),
            col: stored.col.min(self.cols - 1),
        }
    }

    /// Default cell for the icon at `index` in the default ordering.
    pub fn default_cell(&self, index: usize) -> GridCell {
        default_cell_for(index, self.cols)
    }
}

pub(crate) fn default_cell_for(index: usize, cols: u32) -> GridCell {
    let cols = cols.max(1) as usize;
    GridCell {
        row: (index / cols) as u32,
        col: (index % cols) as u32,
    }
}

/// Cells claimed by every icon except `excluding`.
///
/// Placed icons claim their stored cell; catalog icons without a stored cell claim their default
/// index-derived cell.
pub fn occupied_cells(
    layout: &IconLayout,
    entries: &[DesktopIconEntry],
    metrics: &GridMetrics,
    excluding: Option<&AppId>,
) -> HashSet<GridCell> {
    let mut occupied: HashSet<GridCell> = layout
        .iter()
        .filter(|(app_id, _)| Some(*app_id) != excluding)
        .map(|(_, cell)| cell)
        .collect();

    for (index, entry) in entries.iter().enumerate() {
        if Some(&entry.app_id) == excluding || layout.get(&entry.app_id).is_some() {
            continue;
        }
        occupied.insert(metrics.default_cell(index));
    }

    occupied
}

/// Nearest free cell to `target`.
///
/// A free target is returned unchanged. Otherwise square rings of growing radius are scanned
/// (see [`ring_offsets`] for the order). Columns must stay inside the grid and rows must be
/// non-negative; rows may extend below the visible grid. When every ring up to
/// [`COLLISION_SEARCH_RADIUS`] is full, the occupied target is returned and the overlap accepted.
pub fn resolve_collision(
    target: GridCell,
    occupied: &HashSet<GridCell>,
    metrics: &GridMetrics,
) -> GridCell {
    if !occupied.contains(&target) {
        return target;
    }

    let cols = i64::from(metrics.cols);
    for radius in 1..=COLLISION_SEARCH_RADIUS {
        for (dr, dc) in ring_offsets(radius) {
            let row = i64::from(target.row) + dr;
            let col = i64::from(target.col) + dc;
            if row < 0 || row > i64::from(u32::MAX) || col < 0 || col >= cols {
                continue;
            }
            let cell = GridCell::new(row as u32, col as u32);
            if !occupied.contains(&cell) {
                return cell;
            }
        }
    }

    target
}

/// Offsets on the boundary of the square ring `max(|dr|, |dc|) == radius`.
///
/// Ordered nearest first by `|dr| + |dc|` (orthogonal neighbours before diagonals), ties broken by
/// `dr` then `dc` ascending.
pub fn ring_offsets(radius: i64) -> Vec<(i64, i64)> {
    let mut offsets: Vec<(i64, i64)> = (-radius..=radius)
        .flat_map(|dr| (-radius..=radius).map(move |dc| (dr, dc)))
        .filter(|(dr, dc)| dr.abs().max(dc.abs()) == radius)
        .collect();
    offsets.sort_by_key(|&(dr, dc)| (dr.abs() + dc.abs(), dr, dc));
    offsets
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::desktop_icons::DesktopIconEntry;

    fn metrics(cols: u32, rows: u32) -> GridMetrics {
        GridMetrics {
            cols,
            rows,
            cell_size: 100,
            margin_x: 10,
            margin_y: 20,
        }
    }

    fn cells(list: &[(u32, u32)]) -> HashSet<GridCell> {
        list.iter().map(|&(r, c)| GridCell::new(r, c)).collect()
    }

    #[test]
    fn compute_fits_whole_cells_and_centres_them() {
        let viewport = ViewportMetrics::new(1280, 800).with_sidebar(280);
        let config = GridConfig {
            cell_size: 100,
            min_margin: 16,
            taskbar_height: 48,
        };
        let m = GridMetrics::compute(viewport, &config);
        // (1280 - 32 - 280) / 100 = 9.68, (800 - 48 - 32) / 100 = 7.2
        assert_eq!((m.cols, m.rows), (9, 7));
        assert_eq!(m.margin_x, (1280 - 280 - 900) / 2);
        assert_eq!(m.margin_y, (800 - 48 - 700) / 2);
    }

    #[test]
    fn compute_keeps_at_least_one_cell_on_tiny_viewports() {
        let m = GridMetrics::compute(ViewportMetrics::new(50, 40), &GridConfig::default());
        assert_eq!((m.cols, m.rows), (1, 1));
    }

    #[test]
    fn pixel_to_cell_floors_and_clamps() {
        let m = metrics(4, 3);
        assert_eq!(m.pixel_to_cell(10, 20), GridCell::new(0, 0));
        assert_eq!(m.pixel_to_cell(209, 119), GridCell::new(0, 1));
        assert_eq!(m.pixel_to_cell(210, 120), GridCell::new(1, 2));
        assert_eq!(m.pixel_to_cell(-500, -500), GridCell::new(0, 0));
        assert_eq!(m.pixel_to_cell(5_000, 5_000), GridCell::new(2, 3));
    }

    #[test]
    fn cell_origin_inverts_pixel_to_cell() {
        let m = metrics(4, 3);
        let cell = GridCell::new(2, 3);
        let (x, y) = m.cell_origin(cell);
        assert_eq!((x, y), (310, 220));
        assert_eq!(m.pixel_to_cell(x, y), cell);
    }

    #[test]
    fn rendered_cell_clamps_without_changing_the_stored_cell() {
        let stored = GridCell::new(6, 9);
        assert_eq!(metrics(4, 3).rendered_cell(stored), GridCell::new(2, 3));
        assert_eq!(metrics(12, 8).rendered_cell(stored), stored);
    }

    #[test]
    fn free_target_is_returned_unchanged() {
        let occupied = cells(&[(0, 0), (1, 1)]);
        assert_eq!(
            resolve_collision(GridCell::new(0, 1), &occupied, &metrics(3, 3)),
            GridCell::new(0, 1)
        );
    }

    #[test]
    fn full_top_row_resolves_straight_down() {
        let occupied = cells(&[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(
            resolve_collision(GridCell::new(0, 1), &occupied, &metrics(3, 4)),
            GridCell::new(1, 1)
        );
    }

    #[test]
    fn search_never_leaves_the_column_range_but_may_pass_the_last_row() {
        let m = metrics(1, 1);
        let occupied = cells(&[(0, 0)]);
        assert_eq!(resolve_collision(GridCell::new(0, 0), &occupied, &m), GridCell::new(1, 0));
    }

    #[test]
    fn resolved_cell_is_free_when_rings_have_space() {
        let m = metrics(5, 5);
        let occupied: HashSet<GridCell> = (0..5)
            .flat_map(|r| (0..5).map(move |c| GridCell::new(r, c)))
            .filter(|cell| *cell != GridCell::new(4, 0))
            .collect();
        let resolved = resolve_collision(GridCell::new(0, 4), &occupied, &m);
        assert!(!occupied.contains(&resolved));
    }

    #[test]
    fn exhausted_search_accepts_the_overlap() {
        let m = metrics(1, 1);
        let occupied: HashSet<GridCell> = (0..=(COLLISION_SEARCH_RADIUS as u32))
            .map(|row| GridCell::new(row, 0))
            .collect();
        assert_eq!(resolve_collision(GridCell::new(0, 0), &occupied, &m), GridCell::new(0, 0));
    }

    #[test]
    fn ring_offsets_cover_the_boundary_only() {
        let ring = ring_offsets(2);
        assert_eq!(ring.len(), 16);
        assert!(ring.iter().all(|(dr, dc)| dr.abs().max(dc.abs()) == 2));
        assert_eq!(ring[0], (-2, 0));
        assert_eq!(ring_offsets(1)[..4], [(-1, 0), (0, -1), (0, 1), (1, 0)]);
    }

    #[test]
    fn occupied_cells_skip_the_dragged_icon_and_use_defaults_for_unplaced_icons() {
        let m = metrics(3, 3);
        let entries: Vec<DesktopIconEntry> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|id| DesktopIconEntry::new(id, id.to_uppercase(), id))
            .collect();
        let mut layout = IconLayout::default();
        layout.write(AppId::new("a"), GridCell::new(2, 2));
        layout.write(AppId::new("b"), GridCell::new(0, 0));

        let occupied = occupied_cells(&layout, &entries, &m, Some(&AppId::new("b")));
        // a stored at (2,2); c default index 2 -> (0,2); d default index 3 -> (1,0)
        assert_eq!(occupied, cells(&[(2, 2), (0, 2), (1, 0)]));
    }
}
