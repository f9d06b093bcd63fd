use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use macroquad::{
    color::WHITE,
    math::{Rect as MacroquadRect, Vec2 as MacroquadVec2},
    texture::{self, DrawTextureParams, FilterMode, Texture2D},
};
use twotone_core::{SheetId, SpriteRegion};

/// Cache of spritesheet textures keyed by sheet.
#[derive(Debug, Default)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<SheetId, Texture2D>,
}

impl SpriteAtlas {
    /// Loads every listed sheet from disk.
    pub(crate) fn load(entries: &[(SheetId, PathBuf)]) -> Result<Self> {
        Self::from_entries(entries, &mut default_loader)
    }

    /// Draws a sheet region with its top-left corner at `position`, scaled by `scale`.
    pub(crate) fn draw(
        &self,
        region: SpriteRegion,
        position: Vec2,
        scale: f32,
        flip_horizontal: bool,
    ) -> Result<()> {
        let texture = self
            .texture(region.sheet)
            .with_context(|| format!("sheet {} missing from atlas", region.sheet.get()))?;

        let draw_params = DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(
                region.width as f32 * scale,
                region.height as f32 * scale,
            )),
            source: Some(MacroquadRect::new(
                region.x as f32,
                region.y as f32,
                region.width as f32,
                region.height as f32,
            )),
            flip_x: flip_horizontal,
            ..DrawTextureParams::default()
        };

        texture::draw_texture_ex(texture, position.x, position.y, WHITE, draw_params);
        Ok(())
    }

    /// Returns the number of textures stored in the atlas.
    #[must_use]
    pub(crate) fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Retrieves the texture associated with the provided sheet.
    #[must_use]
    pub(crate) fn texture(&self, sheet: SheetId) -> Option<Texture2D> {
        self.textures.get(&sheet).copied()
    }

    fn from_entries(
        entries: &[(SheetId, PathBuf)],
        loader: &mut impl FnMut(SheetId, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (sheet, path) in entries {
            let texture = loader(*sheet, path).with_context(|| {
                format!(
                    "failed to load spritesheet {} from {}",
                    sheet.get(),
                    path.display()
                )
            })?;
            if textures.insert(*sheet, texture).is_some() {
                bail!("duplicate spritesheet entry for sheet {}", sheet.get());
            }
        }
        Ok(Self { textures })
    }
}

fn default_loader(_sheet: SheetId, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read spritesheet at {}", path.display()))?;
    let texture = Texture2D::from_file_with_format(&bytes, None);
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}
