//! Game manifest naming the assets and tuning of a level.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use serde::Deserialize;
use tracing::{debug, warn};
use twotone_core::{GameConfig, Rect, SheetId, SpriteRegion};
use twotone_rendering::Color;
use twotone_system_animation::{Animation, AnimationSet};
use twotone_system_player::Player;
use twotone_world::{Layer, LevelError, TileGrid, TileLayout};

use crate::themes::{Theme, ThemeCycle};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Everything needed to start a session, resolved from a manifest.
#[derive(Debug)]
pub(crate) struct GameAssets {
    pub(crate) title: String,
    pub(crate) config: GameConfig,
    pub(crate) grid: TileGrid,
    pub(crate) sheets: Vec<(SheetId, PathBuf)>,
    pub(crate) themes: ThemeCycle,
    pub(crate) spawn: Vec2,
    pub(crate) player: Player,
}

impl GameAssets {
    /// Loads the manifest at `path`; asset paths resolve relative to its directory.
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_reader(path, |csv| TileLayout::read(csv))
    }

    fn load_with_reader(
        path: impl AsRef<Path>,
        read_layer: impl FnMut(&Path) -> Result<TileLayout, LevelError>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!("failed to read game manifest at {}", manifest_path.display())
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let manifest = parse_manifest(&contents)?;
        assemble(manifest, &base, read_layer)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    #[serde(default = "default_title")]
    title: String,
    sheets: Vec<SheetEntry>,
    layers: Vec<LayerEntry>,
    themes: Vec<ThemeEntry>,
    player: PlayerEntry,
    #[serde(default)]
    config: GameConfig,
}

fn default_title() -> String {
    "Two-Tone".to_owned()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SheetEntry {
    name: String,
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerEntry {
    csv: String,
    sheet: String,
    colour: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeEntry {
    name: String,
    background: [u8; 3],
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlayerEntry {
    sheet: String,
    spawn: [f32; 2],
    size: [f32; 2],
    hitbox: HitboxEntry,
    frame_size: [u32; 2],
    frame_duration: u32,
    animations: AnimationsEntry,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HitboxEntry {
    offset: [f32; 2],
    size: [f32; 2],
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnimationsEntry {
    idle: StripEntry,
    run: StripEntry,
    jump: StripEntry,
    death: StripEntry,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StripEntry {
    count: u32,
    start: [u32; 2],
    #[serde(default)]
    step: u32,
}

fn parse_manifest(contents: &str) -> Result<Manifest> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse game manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported game manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }
    Ok(manifest)
}

fn assemble(
    manifest: Manifest,
    base: &Path,
    mut read_layer: impl FnMut(&Path) -> Result<TileLayout, LevelError>,
) -> Result<GameAssets> {
    let Manifest {
        version: _,
        title,
        sheets: sheet_entries,
        layers: layer_entries,
        themes: theme_entries,
        player: player_entry,
        config,
    } = manifest;

    let mut sheet_ids = HashMap::with_capacity(sheet_entries.len());
    let mut sheets = Vec::with_capacity(sheet_entries.len());
    for (index, entry) in sheet_entries.into_iter().enumerate() {
        let id = SheetId::new(
            u32::try_from(index).context("too many spritesheets in game manifest")?,
        );
        if sheet_ids.insert(entry.name.clone(), id).is_some() {
            bail!("game manifest contains duplicate sheet `{}`", entry.name);
        }
        sheets.push((id, base.join(&entry.path)));
    }
    let sheet_id = |name: &str| {
        sheet_ids
            .get(name)
            .copied()
            .with_context(|| format!("unknown sheet `{name}` in game manifest"))
    };

    let themes = ThemeCycle::new(
        theme_entries
            .into_iter()
            .map(|entry| {
                let [red, green, blue] = entry.background;
                Theme::new(entry.name, Color::from_rgb_u8(red, green, blue))
            })
            .collect(),
    )?;

    if layer_entries.is_empty() {
        bail!("game manifest lists no level layers");
    }
    let mut layers = Vec::with_capacity(layer_entries.len());
    for entry in layer_entries {
        let path = base.join(&entry.csv);
        let layout = read_layer(&path)
            .with_context(|| format!("failed to load level layer {}", path.display()))?;
        let mut layer = Layer::new(layout, sheet_id(&entry.sheet)?);
        if let Some(colour) = entry.colour {
            if !themes.names().any(|name| name == colour) {
                warn!(colour = %colour, layer = %path.display(), "layer_colour_without_theme");
            }
            layer = layer.with_colour(colour);
        }
        debug!(layer = %path.display(), sheet = %entry.sheet, "layer_read");
        layers.push(layer);
    }
    let grid = TileGrid::from_layers(config.world, &layers);

    let player_sheet = sheet_id(&player_entry.sheet)?;
    let animations = player_animations(&player_entry, player_sheet)?;
    let [spawn_x, spawn_y] = player_entry.spawn;
    let [width, height] = player_entry.size;
    let [offset_x, offset_y] = player_entry.hitbox.offset;
    let [hitbox_width, hitbox_height] = player_entry.hitbox.size;
    let player = Player::new(
        Rect::new(spawn_x, spawn_y, width, height),
        Rect::new(offset_x, offset_y, hitbox_width, hitbox_height),
        animations,
    );

    Ok(GameAssets {
        title,
        config,
        grid,
        sheets,
        themes,
        spawn: Vec2::new(spawn_x, spawn_y),
        player,
    })
}

fn player_animations(entry: &PlayerEntry, sheet: SheetId) -> Result<AnimationSet> {
    let [frame_width, frame_height] = entry.frame_size;
    let track = |name: &str, strip: &StripEntry| {
        let [start_x, start_y] = strip.start;
        let frames = SpriteRegion::horizontal_strip(
            sheet,
            frame_width,
            frame_height,
            strip.count,
            start_x,
            start_y,
            strip.step,
        );
        Animation::new(frames, entry.frame_duration)
            .with_context(|| format!("invalid `{name}` animation in game manifest"))
    };

    let strips = &entry.animations;
    Ok(AnimationSet::new(
        track("idle", &strips.idle)?,
        track("run", &strips.run)?,
        track("jump", &strips.jump)?,
        track("death", &strips.death)?,
    ))
}
