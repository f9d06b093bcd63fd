use std::collections::HashSet;

use glam::Vec2;
use macroquad::{shapes, text};
use tracing::warn;
use twotone_core::{Rect, SheetId, SpriteRegion};
use twotone_rendering::{Color, Letterbox, Renderer};

use crate::{sprites::SpriteAtlas, to_macroquad_color};

/// Logical height of overlay text.
const TEXT_SIZE: f32 = 8.0;

/// [`Renderer`] drawing into the letterboxed area of the macroquad window.
pub(crate) struct MacroquadRenderer<'a> {
    atlas: &'a SpriteAtlas,
    letterbox: Letterbox,
    logical_size: Vec2,
    missing_sheets: &'a mut HashSet<SheetId>,
}

impl<'a> MacroquadRenderer<'a> {
    pub(crate) fn new(
        atlas: &'a SpriteAtlas,
        letterbox: Letterbox,
        logical_size: Vec2,
        missing_sheets: &'a mut HashSet<SheetId>,
    ) -> Self {
        Self {
            atlas,
            letterbox,
            logical_size,
            missing_sheets,
        }
    }
}

impl Renderer for MacroquadRenderer<'_> {
    fn clear(&mut self, color: Color) {
        let origin = self.letterbox.to_window(Vec2::ZERO);
        let size = self.logical_size * self.letterbox.scale;
        shapes::draw_rectangle(origin.x, origin.y, size.x, size.y, to_macroquad_color(color));
    }

    fn draw_sprite(&mut self, region: SpriteRegion, position: Vec2, flip_horizontal: bool) {
        let target = self.letterbox.to_window(position);
        if let Err(error) = self
            .atlas
            .draw(region, target, self.letterbox.scale, flip_horizontal)
        {
            // Report each missing sheet once instead of every frame.
            if self.missing_sheets.insert(region.sheet) {
                warn!(error = %error, "sprite_draw_failed");
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        let origin = self.letterbox.to_window(rect.position());
        let scale = self.letterbox.scale;
        shapes::draw_rectangle_lines(
            origin.x,
            origin.y,
            rect.w * scale,
            rect.h * scale,
            thickness * scale,
            to_macroquad_color(color),
        );
    }

    fn draw_text(&mut self, line: &str, position: Vec2, color: Color) {
        let scale = self.letterbox.scale;
        // Macroquad anchors text on its baseline.
        let baseline = self.letterbox.to_window(position + Vec2::new(0.0, TEXT_SIZE));
        let _ = text::draw_text(
            line,
            baseline.x,
            baseline.y,
            TEXT_SIZE * scale,
            to_macroquad_color(color),
        );
    }
}
