//! Axis-separated movement against the solid tiles around the player.

use twotone_core::{overlaps, TileKind};
use twotone_world::{Tile, TileGrid};

use crate::Player;

/// What the player touched while its movement was resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Contacts {
    /// A spike overlapped the player during either axis pass.
    pub touched_spike: bool,
}

impl Player {
    /// Moves the player by its velocity and pushes it out of solid tiles.
    ///
    /// The horizontal axis is resolved first, then the vertical axis against
    /// a fresh neighbor query. A tile only corrects the player on an axis
    /// when the previous box sat entirely on one side of it, which is what
    /// makes the correction direction unambiguous. Neighbors are applied in
    /// grid order, so the last matching tile wins.
    pub fn resolve_movement(&mut self, grid: &TileGrid) -> Contacts {
        self.previous_bounding_box = self.bounding_box;
        self.bounding_box = self.box_at_sprite();
        self.flags.clear();

        let mut contacts = Contacts::default();

        self.bounding_box.x += self.velocity.x;
        let neighbors = grid.neighbors(self.bounding_box.x, self.bounding_box.y);
        for tile in neighbors {
            if !self.touches(tile, &mut contacts) {
                continue;
            }
            let solid = tile.bounding_box;
            if self.previous_bounding_box.x >= solid.right() {
                self.bounding_box.x = solid.right();
                self.flags.left = true;
            }
            if self.previous_bounding_box.right() <= solid.x {
                self.bounding_box.x = solid.x - self.bounding_box.w;
                self.flags.right = true;
            }
        }
        self.sprite_rect.x = self.bounding_box.x - self.collision_offset.x;

        self.bounding_box.y += self.velocity.y;
        let neighbors = grid.neighbors(self.bounding_box.x, self.bounding_box.y);
        for tile in neighbors {
            if !self.touches(tile, &mut contacts) {
                continue;
            }
            let solid = tile.bounding_box;
            if self.previous_bounding_box.y >= solid.bottom() {
                self.bounding_box.y = solid.bottom();
                self.flags.top = true;
            }
            if self.previous_bounding_box.bottom() <= solid.y {
                self.bounding_box.y = solid.y - self.bounding_box.h;
                self.flags.bottom = true;
            }
        }
        self.sprite_rect.y = self.bounding_box.y - self.collision_offset.y;

        contacts
    }

    fn touches(&self, tile: &Tile, contacts: &mut Contacts) -> bool {
        if !overlaps(&self.bounding_box, &tile.bounding_box) {
            return false;
        }
        if tile.kind == TileKind::Spike {
            contacts.touched_spike = true;
        }
        true
    }
}
