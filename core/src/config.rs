//! Immutable configuration shared by the grid, the physics and the session.

use serde::Deserialize;

/// Complete runtime configuration.
///
/// Every table is optional when deserialised; missing values fall back to
/// the defaults below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Tile grid layout and special tile codes.
    pub world: WorldConfig,
    /// Player movement constants.
    pub physics: PhysicsConfig,
    /// Logical screen resolution.
    pub screen: ScreenConfig,
}

/// Tile grid layout and the spritesheet it is decoded against.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Side length of a square tile in world units and sheet pixels.
    pub tile_size: u32,
    /// Number of tile columns in every spritesheet.
    pub sheet_columns: u32,
    /// Padding in pixels between neighbouring sheet cells.
    pub sheet_separation: u32,
    /// Tile code decoded as a ledge.
    pub ledge_code: u32,
    /// Tile code decoded as a spike.
    pub spike_code: u32,
}

impl WorldConfig {
    /// Tile side length as a world-space length.
    #[must_use]
    pub fn tile_length(&self) -> f32 {
        self.tile_size as f32
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: 16,
            sheet_columns: 20,
            sheet_separation: 1,
            ledge_code: 116,
            spike_code: 183,
        }
    }
}

/// Per-tick movement constants, in world units per tick.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    /// Added to the vertical velocity every tick.
    pub gravity: f32,
    /// Upper bound of the vertical velocity.
    pub terminal_velocity: f32,
    /// Horizontal speed while a direction key is held.
    pub run_speed: f32,
    /// Vertical velocity applied by a jump. Negative is up.
    pub jump_impulse: f32,
    /// Falling faster than this marks the player airborne.
    pub airborne_fall_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.4,
            terminal_velocity: 5.0,
            run_speed: 1.4,
            jump_impulse: -6.0,
            airborne_fall_speed: 1.8,
        }
    }
}

/// Fixed logical resolution the world is rendered at.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    /// Logical width in world units.
    pub width: f32,
    /// Logical height in world units.
    pub height: f32,
}

impl ScreenConfig {
    /// Centre of the logical screen.
    #[must_use]
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 180.0,
        }
    }
}
