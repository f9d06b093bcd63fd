//! Tiles decoded from level codes.

use twotone_core::{Rect, SheetId, SpriteRegion, TileKind, WorldConfig};

/// Height trimmed from the bottom of a ledge's collision box.
const LEDGE_HEIGHT_TRIM: f32 = 11.0;
/// Horizontal inset applied to both sides of a spike's collision box.
const SPIKE_SIDE_INSET: f32 = 3.0;
/// Vertical inset applied to the top of a spike's collision box.
const SPIKE_TOP_INSET: f32 = 7.0;

/// Single grid cell with its visual and physical extents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tile {
    /// Physical classification of the tile.
    pub kind: TileKind,
    /// Zero-based column of the cell.
    pub column: usize,
    /// Zero-based row of the cell.
    pub row: usize,
    /// Full visual extent of the cell in world units.
    pub sprite_rect: Rect,
    /// Collision box, always contained in `sprite_rect`.
    pub bounding_box: Rect,
    /// Sheet region drawn for the tile, if any.
    pub drawable: Option<SpriteRegion>,
    /// Theme tag of the layer the tile was loaded from.
    pub colour: Option<String>,
    /// Whether the physics resolver treats the tile as solid.
    pub collidable: bool,
}

impl Tile {
    /// Creates the empty tile occupying the provided cell.
    #[must_use]
    pub fn empty(column: usize, row: usize, config: &WorldConfig) -> Self {
        Self {
            column,
            row,
            sprite_rect: cell_rect(column, row, config.tile_length()),
            ..Self::default()
        }
    }

    /// Decodes a tile code loaded for the provided cell.
    #[must_use]
    pub fn decode(
        code: u32,
        column: usize,
        row: usize,
        sheet: SheetId,
        colour: Option<&str>,
        config: &WorldConfig,
    ) -> Self {
        let tile_length = config.tile_length();
        let sprite_rect = cell_rect(column, row, tile_length);
        let kind = if code == config.spike_code {
            TileKind::Spike
        } else if code == config.ledge_code {
            TileKind::Ledge
        } else {
            TileKind::Plain
        };

        Self {
            kind,
            column,
            row,
            sprite_rect,
            bounding_box: collision_box(kind, sprite_rect),
            drawable: Some(SpriteRegion::tile_cell(
                sheet,
                code,
                config.sheet_columns,
                config.tile_size,
                config.sheet_separation,
            )),
            colour: colour.map(str::to_owned),
            collidable: true,
        }
    }

    /// Reports whether a tile occupies the cell.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.kind.is_present()
    }

    /// Reports whether the tile takes part in collision resolution.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.is_present() && self.collidable
    }
}

fn cell_rect(column: usize, row: usize, tile_length: f32) -> Rect {
    Rect::new(
        column as f32 * tile_length,
        row as f32 * tile_length,
        tile_length,
        tile_length,
    )
}

fn collision_box(kind: TileKind, cell: Rect) -> Rect {
    match kind {
        TileKind::Empty | TileKind::Plain => cell,
        TileKind::Ledge => Rect {
            h: (cell.h - LEDGE_HEIGHT_TRIM).max(0.0),
            ..cell
        },
        TileKind::Spike => {
            // Small tiles cannot afford the full insets.
            let side = SPIKE_SIDE_INSET.min(cell.w * 0.25);
            let top = SPIKE_TOP_INSET.min(cell.h * 0.5);
            Rect::new(cell.x + side, cell.y + top, cell.w - 2.0 * side, cell.h - top)
        }
    }
}
