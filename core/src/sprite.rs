//! Opaque drawable handles pointing into spritesheets.

/// Identifier of a spritesheet registered with the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetId(u32);

impl SheetId {
    /// Creates a new sheet identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Pixel region of a spritesheet that can be drawn as a single image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteRegion {
    /// Sheet the region is cut from.
    pub sheet: SheetId,
    /// Left edge of the region in sheet pixels.
    pub x: u32,
    /// Top edge of the region in sheet pixels.
    pub y: u32,
    /// Width of the region in sheet pixels.
    pub width: u32,
    /// Height of the region in sheet pixels.
    pub height: u32,
}

impl SpriteRegion {
    /// Creates a region from explicit pixel coordinates.
    #[must_use]
    pub const fn new(sheet: SheetId, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            sheet,
            x,
            y,
            width,
            height,
        }
    }

    /// Resolves a tile code into the matching cell of a fixed-width sheet.
    ///
    /// Codes are laid out row by row: `row = code / columns`,
    /// `column = code % columns`. Cells are `tile_size` pixels wide and
    /// separated by `separation` pixels of padding. A sheet with zero columns
    /// is treated as a single column.
    #[must_use]
    pub fn tile_cell(
        sheet: SheetId,
        code: u32,
        columns: u32,
        tile_size: u32,
        separation: u32,
    ) -> Self {
        let columns = columns.max(1);
        let row = code / columns;
        let column = code % columns;
        let stride = tile_size + separation;
        Self::new(sheet, column * stride, row * stride, tile_size, tile_size)
    }

    /// Cuts `count` equally sized frames laid out left to right.
    ///
    /// Consecutive frames are `step` pixels apart in addition to their width.
    #[must_use]
    pub fn horizontal_strip(
        sheet: SheetId,
        frame_width: u32,
        frame_height: u32,
        count: u32,
        start_x: u32,
        start_y: u32,
        step: u32,
    ) -> Vec<Self> {
        (0..count)
            .map(|index| {
                let x = start_x + index * (frame_width + step);
                Self::new(sheet, x, start_y, frame_width, frame_height)
            })
            .collect()
    }
}
