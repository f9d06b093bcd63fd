#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player state, behaviors and tile collision resolution.
//!
//! The player is a sprite rectangle with a smaller collision box hung off it
//! at a fixed offset. Every tick the active [`Behavior`] reads the input
//! oracle, integrates velocity one axis at a time against the solid tiles
//! surrounding the player, and advances the active animation track.

mod behavior;
mod collision;

pub use behavior::Behavior;
pub use collision::Contacts;

use twotone_core::{CollisionFlags, InputOracle, PhysicsConfig, Rect, SpriteRegion, Vec2};
use twotone_system_animation::{AnimationKey, AnimationSet};
use twotone_world::TileGrid;

/// The controllable character.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    sprite_rect: Rect,
    bounding_box: Rect,
    previous_bounding_box: Rect,
    collision_offset: Vec2,
    velocity: Vec2,
    flags: CollisionFlags,
    can_jump: bool,
    animations: AnimationSet,
    facing_flipped: bool,
    behavior: Behavior,
}

impl Player {
    /// Creates a player in the normal behavior, at rest and unable to jump
    /// until it first lands.
    ///
    /// `hitbox` is expressed relative to the sprite: its position is the
    /// collision offset and its size the size of the bounding box.
    #[must_use]
    pub fn new(sprite_rect: Rect, hitbox: Rect, animations: AnimationSet) -> Self {
        let collision_offset = hitbox.position();
        let bounding_box = Rect::new(
            sprite_rect.x + collision_offset.x,
            sprite_rect.y + collision_offset.y,
            hitbox.w,
            hitbox.h,
        );
        Self {
            sprite_rect,
            bounding_box,
            previous_bounding_box: bounding_box,
            collision_offset,
            velocity: Vec2::ZERO,
            flags: CollisionFlags::default(),
            can_jump: false,
            animations,
            facing_flipped: false,
            behavior: Behavior::Normal,
        }
    }

    /// Returns the player with its velocity replaced.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Runs one tick of the active behavior.
    pub fn update<I>(&mut self, grid: &TileGrid, input: &I, physics: &PhysicsConfig)
    where
        I: InputOracle + ?Sized,
    {
        let behavior = self.behavior;
        behavior.update(self, grid, input, physics);
    }

    /// Puts the player back on `spawn` in a fresh state.
    ///
    /// Position, velocity, contacts, jump permission, behavior and animation
    /// are all reset; the collision box keeps its size and offset.
    pub fn respawn(&mut self, spawn: Vec2) {
        self.sprite_rect.x = spawn.x;
        self.sprite_rect.y = spawn.y;
        self.bounding_box = self.box_at_sprite();
        self.previous_bounding_box = self.bounding_box;
        self.velocity = Vec2::ZERO;
        self.flags.clear();
        self.can_jump = false;
        self.facing_flipped = false;
        self.behavior = Behavior::Normal;
        self.animations.switch_to(AnimationKey::Idle);
    }

    /// Full visual extent of the player.
    #[must_use]
    pub const fn sprite_rect(&self) -> Rect {
        self.sprite_rect
    }

    /// Physical box used for collision.
    #[must_use]
    pub const fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Box resolved during the previous tick.
    #[must_use]
    pub const fn previous_bounding_box(&self) -> Rect {
        self.previous_bounding_box
    }

    /// Offset of the collision box from the sprite's top-left corner.
    #[must_use]
    pub const fn collision_offset(&self) -> Vec2 {
        self.collision_offset
    }

    /// Velocity in world units per tick.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Sides that touched a tile during the last tick.
    #[must_use]
    pub const fn flags(&self) -> CollisionFlags {
        self.flags
    }

    /// Whether a jump press would currently be honoured.
    #[must_use]
    pub const fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Whether the sprite is drawn mirrored.
    #[must_use]
    pub const fn facing_flipped(&self) -> bool {
        self.facing_flipped
    }

    /// Active behavior.
    #[must_use]
    pub const fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Animation tracks and the active key.
    #[must_use]
    pub const fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    /// Frame to draw for the current tick.
    #[must_use]
    pub fn current_frame(&self) -> SpriteRegion {
        self.animations.current_frame()
    }

    fn box_at_sprite(&self) -> Rect {
        Rect::new(
            self.sprite_rect.x + self.collision_offset.x,
            self.sprite_rect.y + self.collision_offset.y,
            self.bounding_box.w,
            self.bounding_box.h,
        )
    }
}
