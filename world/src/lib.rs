#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative tile grid for the Two-Tone runtime.
//!
//! The grid is built once from level layers and then only read by the
//! physics, except for [`TileGrid::set_collidable`] which the session uses to
//! gate collision on the active colour theme.

mod level;
mod tile;

pub use level::{Layer, LevelError, TileLayout, CELL_DELIMITER, EMPTY_CELL};
pub use tile::Tile;

use tracing::{debug, info};
use twotone_core::{Rect, SheetId, Vec2, WorldConfig};

/// Dense grid of tiles indexed by row, then column.
#[derive(Clone, Debug)]
pub struct TileGrid {
    config: WorldConfig,
    width: usize,
    height: usize,
    tiles: Vec<Vec<Tile>>,
}

impl TileGrid {
    /// Creates a grid of empty, non-collidable tiles.
    #[must_use]
    pub fn new(config: WorldConfig, width: usize, height: usize) -> Self {
        let tiles = (0..height)
            .map(|row| {
                (0..width)
                    .map(|column| Tile::empty(column, row, &config))
                    .collect()
            })
            .collect();
        Self {
            config,
            width,
            height,
            tiles,
        }
    }

    /// Builds a grid from a single untagged layer.
    #[must_use]
    pub fn load(config: WorldConfig, layout: &TileLayout, sheet: SheetId) -> Self {
        Self::from_layers(config, &[Layer::new(layout.clone(), sheet)])
    }

    /// Builds a grid large enough for every layer and stamps them in order.
    ///
    /// Later layers overwrite the cells written by earlier ones.
    #[must_use]
    pub fn from_layers(config: WorldConfig, layers: &[Layer]) -> Self {
        let width = layers
            .iter()
            .map(|layer| layer.layout.width())
            .max()
            .unwrap_or(0);
        let height = layers
            .iter()
            .map(|layer| layer.layout.height())
            .max()
            .unwrap_or(0);

        let mut grid = Self::new(config, width, height);
        for layer in layers {
            grid.stamp(layer);
        }

        info!(
            width,
            height,
            layers = layers.len(),
            tiles = grid.iter().filter(|tile| tile.is_present()).count(),
            "level_loaded"
        );
        grid
    }

    fn stamp(&mut self, layer: &Layer) {
        let mut stamped = 0usize;
        for (column, row, code) in layer.layout.codes() {
            let Some(cell) = self
                .tiles
                .get_mut(row)
                .and_then(|cells| cells.get_mut(column))
            else {
                continue;
            };
            *cell = Tile::decode(
                code,
                column,
                row,
                layer.sheet,
                layer.colour.as_deref(),
                &self.config,
            );
            stamped += 1;
        }
        debug!(
            sheet = layer.sheet.get(),
            colour = layer.colour.as_deref().unwrap_or("-"),
            stamped,
            "layer_stamped"
        );
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Tile stored at the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn tile(&self, column: usize, row: usize) -> Option<&Tile> {
        self.tiles.get(row).and_then(|cells| cells.get(column))
    }

    /// Tile whose cell contains the provided world position.
    #[must_use]
    pub fn tile_at(&self, position: Vec2) -> Option<&Tile> {
        let column = self.floor_cell(position.x)?;
        let row = self.floor_cell(position.y)?;
        self.tile(column, row)
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    /// Solid tiles in the 3x3 block around the cell containing `(x, y)`.
    ///
    /// The cell is found by truncating division by the tile size. Cells
    /// outside the grid are skipped, never reported as errors, even for
    /// coordinates far beyond the grid or infinite ones. Tiles are
    /// returned row by row, left to right; collision resolution applies them
    /// in that order.
    #[must_use]
    pub fn neighbors(&self, x: f32, y: f32) -> Vec<&Tile> {
        let tile_length = self.config.tile_length();
        if tile_length <= 0.0 {
            return Vec::new();
        }

        let center_column = (x / tile_length) as i64;
        let center_row = (y / tile_length) as i64;

        let mut neighbors = Vec::with_capacity(9);
        for row in center_row.saturating_sub(1)..=center_row.saturating_add(1) {
            for column in center_column.saturating_sub(1)..=center_column.saturating_add(1) {
                let Some(tile) = self.tile_signed(column, row) else {
                    continue;
                };
                if tile.is_solid() {
                    neighbors.push(tile);
                }
            }
        }
        neighbors
    }

    /// Present tiles whose cells intersect the viewport, boundary cells included.
    ///
    /// Only rendering and debug overlays use this; physics relies on
    /// [`TileGrid::neighbors`].
    #[must_use]
    pub fn visible(&self, viewport: Rect) -> Vec<&Tile> {
        let tile_length = self.config.tile_length();
        if tile_length <= 0.0 || self.width == 0 || self.height == 0 {
            return Vec::new();
        }

        let Some((first_column, last_column)) =
            clip_span(viewport.x, viewport.right(), tile_length, self.width)
        else {
            return Vec::new();
        };
        let Some((first_row, last_row)) =
            clip_span(viewport.y, viewport.bottom(), tile_length, self.height)
        else {
            return Vec::new();
        };

        self.tiles[first_row..=last_row]
            .iter()
            .flat_map(|cells| cells[first_column..=last_column].iter())
            .filter(|tile| tile.is_present())
            .collect()
    }

    /// Recomputes the collidable flag of every present tile.
    ///
    /// This is the only mutation the grid accepts after loading.
    pub fn set_collidable<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&Tile) -> bool,
    {
        for tile in self.tiles.iter_mut().flatten() {
            if tile.is_present() {
                tile.collidable = predicate(&*tile);
            }
        }
    }

    fn tile_signed(&self, column: i64, row: i64) -> Option<&Tile> {
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        self.tile(column, row)
    }

    fn floor_cell(&self, coordinate: f32) -> Option<usize> {
        let tile_length = self.config.tile_length();
        if tile_length <= 0.0 {
            return None;
        }
        let cell = (coordinate / tile_length).floor();
        if cell < 0.0 {
            return None;
        }
        Some(cell as usize)
    }
}

fn clip_span(start: f32, end: f32, tile_length: f32, cells: usize) -> Option<(usize, usize)> {
    let first = (start / tile_length).floor() as i64;
    let last = (end / tile_length).floor() as i64;
    let max_index = i64::try_from(cells).ok()? - 1;
    if last < 0 || first > max_index || last < first {
        return None;
    }

    let first = usize::try_from(first.max(0)).ok()?;
    let last = usize::try_from(last.min(max_index)).ok()?;
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use twotone_core::TileKind;

    fn grid_from(text: &str) -> TileGrid {
        let layout = TileLayout::parse(text).expect("layout parses");
        TileGrid::load(WorldConfig::default(), &layout, SheetId::new(0))
    }

    #[test]
    fn new_grid_is_entirely_empty() {
        let grid = TileGrid::new(WorldConfig::default(), 4, 3);

        assert_eq!(grid.iter().count(), 12);
        assert!(grid.iter().all(|tile| !tile.is_present() && !tile.collidable));
    }

    #[test]
    fn ragged_rows_are_padded_with_empty_tiles() {
        let grid = grid_from("1,2,3\n4\n");

        assert_eq!((grid.width(), grid.height()), (3, 2));
        let padded = grid.tile(2, 1).expect("cell exists");
        assert_eq!(padded.kind, TileKind::Empty);
    }

    #[test]
    fn neighbors_are_row_major_around_the_centre_cell() {
        let grid = grid_from("0,1,2\n3,4,5\n6,7,8\n");
        let neighbors = grid.neighbors(20.0, 20.0);

        let cells: Vec<_> = neighbors.iter().map(|tile| (tile.column, tile.row)).collect();
        assert_eq!(
            cells,
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (1, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2)
            ]
        );
    }

    #[test]
    fn neighbors_skip_empty_and_pass_through_tiles() {
        let mut grid = grid_from("0,-1\n-1,1\n");
        assert_eq!(grid.neighbors(0.0, 0.0).len(), 2);

        grid.set_collidable(|tile| tile.column != 0);
        let neighbors = grid.neighbors(0.0, 0.0);

        assert_eq!(neighbors.len(), 1);
        assert_eq!((neighbors[0].column, neighbors[0].row), (1, 1));
    }

    #[test]
    fn neighbors_truncate_negative_coordinates_towards_zero() {
        let grid = grid_from("0,-1,-1\n-1,-1,-1\n-1,-1,-1\n");

        // -5 / 16 truncates to cell 0, so the block still reaches cell (0, 0).
        assert_eq!(grid.neighbors(-5.0, -5.0).len(), 1);
        assert!(grid.neighbors(-40.0, -40.0).is_empty());
    }

    #[test]
    fn visible_includes_boundary_cells() {
        let grid = grid_from("0,1,2,3\n4,5,6,7\n");
        let visible = grid.visible(Rect::new(16.0, 0.0, 16.0, 10.0));

        let cells: Vec<_> = visible.iter().map(|tile| (tile.column, tile.row)).collect();
        assert_eq!(cells, vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn visible_clips_to_grid_and_skips_empty_cells() {
        let grid = grid_from("0,-1\n-1,3\n");

        let all = grid.visible(Rect::new(-100.0, -100.0, 1000.0, 1000.0));
        assert_eq!(all.len(), 2);
        assert!(grid.visible(Rect::new(500.0, 0.0, 10.0, 10.0)).is_empty());
        assert!(grid.visible(Rect::new(-50.0, -50.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn set_collidable_leaves_empty_cells_untouched() {
        let mut grid = grid_from("0,-1\n");
        grid.set_collidable(|_| true);

        let empty = grid.tile(1, 0).expect("cell exists");
        assert!(!empty.collidable);
    }

    #[test]
    fn tile_at_resolves_world_positions() {
        let grid = grid_from("0,1\n2,3\n");

        let tile = grid.tile_at(Vec2::new(17.0, 31.9)).expect("inside grid");
        assert_eq!((tile.column, tile.row), (1, 1));
        assert!(grid.tile_at(Vec2::new(-0.5, 0.0)).is_none());
        assert!(grid.tile_at(Vec2::new(0.0, 40.0)).is_none());
    }
}
