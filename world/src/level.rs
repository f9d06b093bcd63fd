//! Level layers decoded from comma-separated tile codes.

use std::{fs, num::ParseIntError, path::Path};

use thiserror::Error;
use twotone_core::SheetId;

/// Cell value marking the absence of a tile.
pub const EMPTY_CELL: &str = "-1";
/// Separator between the cells of a row.
pub const CELL_DELIMITER: char = ',';

/// Fatal errors raised while loading level data.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file could not be read.
    #[error("failed to read level layer {path}: {source}")]
    Read {
        /// Path of the unreadable file.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A cell held something other than the empty marker or a tile code.
    #[error("line {line}, cell {cell}: `{value}` is not a tile code: {source}")]
    InvalidCell {
        /// One-based line number of the offending row.
        line: usize,
        /// One-based position of the cell within the row.
        cell: usize,
        /// Raw cell contents.
        value: String,
        /// Integer parsing failure.
        #[source]
        source: ParseIntError,
    },
}

/// Rectangular-ish grid of tile codes; rows may differ in length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileLayout {
    rows: Vec<Vec<Option<u32>>>,
}

impl TileLayout {
    /// Creates a layout from already decoded rows.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Option<u32>>>) -> Self {
        Self { rows }
    }

    /// Parses comma-separated rows of tile codes.
    ///
    /// Blank lines are skipped. Every cell must be the empty marker `-1` or a
    /// non-negative integer; anything else aborts the load.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut rows = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let row = line
                .split(CELL_DELIMITER)
                .enumerate()
                .map(|(cell, raw)| parse_cell(raw.trim(), index + 1, cell + 1))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Reads and parses a layout from disk.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LevelError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Number of rows in the layout.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterates over every present code as `(column, row, code)`.
    pub fn codes(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(column, code)| code.map(|code| (column, row, code)))
        })
    }
}

fn parse_cell(raw: &str, line: usize, cell: usize) -> Result<Option<u32>, LevelError> {
    if raw == EMPTY_CELL {
        return Ok(None);
    }

    raw.parse::<u32>()
        .map(Some)
        .map_err(|source| LevelError::InvalidCell {
            line,
            cell,
            value: raw.to_owned(),
            source,
        })
}

/// One level layer together with the sheet and theme it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    /// Tile codes of the layer.
    pub layout: TileLayout,
    /// Spritesheet the codes index into.
    pub sheet: SheetId,
    /// Theme tag stamped onto every tile of the layer.
    pub colour: Option<String>,
}

impl Layer {
    /// Creates a layer without a theme tag.
    #[must_use]
    pub fn new(layout: TileLayout, sheet: SheetId) -> Self {
        Self {
            layout,
            sheet,
            colour: None,
        }
    }

    /// Tags every tile of the layer with the provided theme colour.
    #[must_use]
    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }
}
