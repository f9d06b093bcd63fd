#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Two-Tone runtime.
//!
//! This crate holds the vocabulary every other crate speaks: world-space
//! rectangles and the strict overlap test, the tile classification produced
//! by level loading, the four-sided collision flags written by the physics
//! resolver, the abstract input oracle adapters implement, opaque sprite
//! handles the renderer resolves, and the immutable configuration that the
//! grid and the physics are constructed with.

mod config;
mod geometry;
mod input;
mod sprite;

pub use config::{GameConfig, PhysicsConfig, ScreenConfig, WorldConfig};
pub use geometry::{overlaps, Rect};
pub use glam::Vec2;
pub use input::{FrameInput, InputOracle, Key, KeySet};
pub use sprite::{SheetId, SpriteRegion};

/// Physical classification of a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// No tile occupies the cell.
    #[default]
    Empty,
    /// Solid tile whose collision box covers the whole cell.
    Plain,
    /// Thin platform whose collision box keeps the top edge of the cell.
    Ledge,
    /// Hazard that kills the player on contact.
    Spike,
}

impl TileKind {
    /// Reports whether the cell holds a tile at all.
    #[must_use]
    pub const fn is_present(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// Sides of the player that touched a tile during the current tick.
///
/// Each flag names the side of the player that made contact: `bottom` means
/// the player is standing on something, `right` means it walked into a tile
/// on its right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CollisionFlags {
    /// The player's top edge hit a ceiling.
    pub top: bool,
    /// The player's bottom edge landed on a tile.
    pub bottom: bool,
    /// The player's left edge hit a wall.
    pub left: bool,
    /// The player's right edge hit a wall.
    pub right: bool,
}

impl CollisionFlags {
    /// Resets every flag to `false`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Reports whether the player is standing on a tile.
    #[must_use]
    pub const fn grounded(&self) -> bool {
        self.bottom
    }

    /// Reports whether either vertical side made contact.
    #[must_use]
    pub const fn vertical(&self) -> bool {
        self.top || self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::{CollisionFlags, TileKind};

    #[test]
    fn only_empty_tiles_are_absent() {
        assert!(!TileKind::Empty.is_present());
        assert!(TileKind::Plain.is_present());
        assert!(TileKind::Ledge.is_present());
        assert!(TileKind::Spike.is_present());
        assert_eq!(TileKind::default(), TileKind::Empty);
    }

    #[test]
    fn clearing_flags_resets_every_side() {
        let mut flags = CollisionFlags {
            top: true,
            bottom: true,
            left: true,
            right: true,
        };
        assert!(flags.grounded());
        assert!(flags.vertical());

        flags.clear();

        assert_eq!(flags, CollisionFlags::default());
        assert!(!flags.grounded());
        assert!(!flags.vertical());
    }
}
