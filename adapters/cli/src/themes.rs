//! Ordered colour themes gating which tiles collide.

use anyhow::{bail, Result};
use twotone_rendering::Color;
use twotone_world::{Tile, TileGrid};

/// Named background colour.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Theme {
    /// Name matched against the colour tag of level layers.
    pub(crate) name: String,
    /// Colour the logical screen is cleared with.
    pub(crate) background: Color,
}

impl Theme {
    pub(crate) fn new(name: impl Into<String>, background: Color) -> Self {
        Self {
            name: name.into(),
            background,
        }
    }
}

/// Cycle of themes; the first one is the base theme.
///
/// On the base theme every tile is solid. On any other theme, tiles tagged
/// with that theme's name become pass-through while the rest stay solid.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ThemeCycle {
    themes: Vec<Theme>,
    active: usize,
}

impl ThemeCycle {
    pub(crate) fn new(themes: Vec<Theme>) -> Result<Self> {
        if themes.is_empty() {
            bail!("at least one colour theme is required");
        }
        Ok(Self { themes, active: 0 })
    }

    pub(crate) fn current(&self) -> &Theme {
        &self.themes[self.active]
    }

    /// Moves to the next theme, wrapping back to the base theme.
    pub(crate) fn advance(&mut self) {
        self.active = (self.active + 1) % self.themes.len();
    }

    pub(crate) fn is_collidable(&self, tile: &Tile) -> bool {
        if self.active == 0 {
            return true;
        }
        tile.colour.as_deref() != Some(self.current().name.as_str())
    }

    /// Recomputes collision for every tile of the grid.
    pub(crate) fn apply(&self, grid: &mut TileGrid) {
        grid.set_collidable(|tile| self.is_collidable(tile));
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|theme| theme.name.as_str())
    }
}
